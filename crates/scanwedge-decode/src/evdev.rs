//! Linux input-event key codes.
//!
//! Key codes from `linux/input-event-codes.h` follow the physical
//! QWERTY layout row by row, so the letter mapping is three fixed row
//! tables rather than one contiguous range. US layout only; modifier
//! keys and everything a scanner never types decode to
//! [`KeyOutcome::Ignored`].

use crate::outcome::KeyOutcome;

/// `KEY_ENTER`, terminating one barcode.
pub const KEY_ENTER: u16 = 28;

/// `KEY_KPENTER`. Some scanners are configured to send the keypad
/// Enter instead of the main one.
pub const KEY_KPENTER: u16 = 96;

const ROW_TOP: &[u8] = b"QWERTYUIOP"; // codes 16..=25
const ROW_HOME: &[u8] = b"ASDFGHJKL"; // codes 30..=38
const ROW_BOTTOM: &[u8] = b"ZXCVBNM"; // codes 44..=50

/// Decode one key code from a key-down event.
///
/// Mapped codes: `2..=11` → `1`–`9`,`0`, `12`/`13` → `-`/`=`, the three
/// QWERTY letter rows → `A`–`Z`, and both Enter keys → terminator.
#[must_use]
pub fn decode_key(code: u16) -> KeyOutcome {
    match code {
        KEY_ENTER | KEY_KPENTER => KeyOutcome::Terminator,
        2..=10 => KeyOutcome::Character((b'1' + (code - 2) as u8) as char),
        11 => KeyOutcome::Character('0'),
        12 => KeyOutcome::Character('-'),
        13 => KeyOutcome::Character('='),
        16..=25 => KeyOutcome::Character(ROW_TOP[(code - 16) as usize] as char),
        30..=38 => KeyOutcome::Character(ROW_HOME[(code - 30) as usize] as char),
        44..=50 => KeyOutcome::Character(ROW_BOTTOM[(code - 44) as usize] as char),
        _ => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, '1')]
    #[case(10, '9')]
    #[case(11, '0')]
    #[case(12, '-')]
    #[case(13, '=')]
    #[case(16, 'Q')]
    #[case(25, 'P')]
    #[case(30, 'A')]
    #[case(38, 'L')]
    #[case(44, 'Z')]
    #[case(50, 'M')]
    fn test_mapped_keys(#[case] code: u16, #[case] expected: char) {
        assert_eq!(decode_key(code), KeyOutcome::Character(expected));
    }

    #[rstest]
    #[case(KEY_ENTER)]
    #[case(KEY_KPENTER)]
    fn test_enter_keys_are_terminators(#[case] code: u16) {
        assert_eq!(decode_key(code), KeyOutcome::Terminator);
    }

    #[rstest]
    #[case(0)] // KEY_RESERVED
    #[case(1)] // KEY_ESC
    #[case(14)] // KEY_BACKSPACE
    #[case(15)] // KEY_TAB
    #[case(42)] // KEY_LEFTSHIFT
    #[case(57)] // KEY_SPACE
    #[case(26)] // KEY_LEFTBRACE, not part of the wedge alphabet
    fn test_unmapped_keys_are_ignored(#[case] code: u16) {
        assert_eq!(decode_key(code), KeyOutcome::Ignored);
    }

    #[test]
    fn test_every_letter_reachable() {
        let mut letters: Vec<char> = (0u16..=u16::MAX)
            .filter_map(|code| decode_key(code).as_char())
            .filter(char::is_ascii_uppercase)
            .collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), 26);
    }
}
