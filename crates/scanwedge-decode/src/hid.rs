//! USB HID boot-keyboard usage codes.
//!
//! An 8-byte boot-keyboard report carries modifier bits in byte 0, a
//! reserved byte, and six key slots in bytes 2–7. Each slot holds one
//! usage code from the Keyboard/Keypad usage page, or zero when the
//! slot is empty. Scanners in keyboard-emulation mode only ever use
//! the alphanumeric block plus a handful of punctuation keys, so the
//! table below covers exactly that subset; everything else decodes to
//! [`KeyOutcome::Ignored`].

use scanwedge_core::constants::HID_KEY_SLOT_RANGE;

use crate::outcome::KeyOutcome;

/// Usage code sent for Enter / Return, terminating one barcode.
pub const USAGE_ENTER: u8 = 0x28;

/// Decode one usage code from a key slot.
///
/// Mapped codes: `0x04..=0x1d` → `A`–`Z`, `0x1e..=0x27` → `1`–`9`,`0`,
/// `0x28` → terminator, `0x2d..=0x30` → `-` `=` `[` `]`. A zero byte is
/// an empty slot. US layout only.
#[must_use]
pub fn decode_usage(code: u8) -> KeyOutcome {
    match code {
        0x00 => KeyOutcome::Ignored, // empty slot
        0x04..=0x1d => KeyOutcome::Character((b'A' + (code - 0x04)) as char),
        0x1e..=0x26 => KeyOutcome::Character((b'1' + (code - 0x1e)) as char),
        0x27 => KeyOutcome::Character('0'),
        USAGE_ENTER => KeyOutcome::Terminator,
        0x2d => KeyOutcome::Character('-'),
        0x2e => KeyOutcome::Character('='),
        0x2f => KeyOutcome::Character('['),
        0x30 => KeyOutcome::Character(']'),
        _ => KeyOutcome::Ignored,
    }
}

/// Iterate the six key slots of one report, in fixed slot order.
///
/// The modifier and reserved bytes are never yielded. A report shorter
/// than the slot range (malformed frame) yields nothing rather than
/// erroring: a bad frame decodes to zero keys.
///
/// # Examples
///
/// ```
/// use scanwedge_decode::hid;
///
/// let report = [0u8, 0, 0x04, 0x1d, 0, 0, 0, 0];
/// let keys: Vec<u8> = hid::report_keys(&report).collect();
/// assert_eq!(keys, vec![0x04, 0x1d, 0, 0, 0, 0]);
/// ```
pub fn report_keys(report: &[u8]) -> impl Iterator<Item = u8> + '_ {
    report
        .get(HID_KEY_SLOT_RANGE)
        .into_iter()
        .flatten()
        .copied()
}
