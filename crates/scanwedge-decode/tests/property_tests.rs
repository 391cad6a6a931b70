//! Property-based tests for decoder and assembler invariants.
//!
//! These tests use proptest to generate random code sequences and
//! verify that the assembly invariants hold for all of them, not just
//! hand-picked scenarios.

use proptest::prelude::*;
use scanwedge_core::Encoding;
use scanwedge_decode::{BarcodeAssembler, KeyOutcome, decode, hid};

/// Strategy for HID usage codes that map to a character (never the
/// terminator): letters, digits, and the four punctuation keys.
fn mapped_hid_character_code() -> impl Strategy<Value = u8> {
    prop_oneof![0x04u8..=0x27u8, 0x2du8..=0x30u8]
}

/// Strategy for arbitrary HID bytes excluding the Enter usage code.
fn any_hid_code_but_enter() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("not the terminator", |code| *code != hid::USAGE_ENTER)
}

proptest! {
    /// Property: without a terminator, no sequence ever completes a
    /// barcode, whatever mix of mapped and unmapped codes it contains.
    #[test]
    fn prop_no_terminator_no_barcode(codes in prop::collection::vec(any_hid_code_but_enter(), 0..64)) {
        let mut assembler = BarcodeAssembler::new();
        for code in codes {
            prop_assert!(assembler.feed("dev", decode(Encoding::HidRaw, code.into())).is_none());
        }
    }

    /// Property: mapped characters followed by a terminator emit exactly
    /// their concatenation, in input order.
    #[test]
    fn prop_terminator_emits_exact_concatenation(codes in prop::collection::vec(mapped_hid_character_code(), 1..32)) {
        let mut assembler = BarcodeAssembler::new();
        let mut expected = String::new();
        for code in codes {
            let outcome = decode(Encoding::HidRaw, code.into());
            expected.push(outcome.as_char().unwrap());
            prop_assert!(assembler.feed("dev", outcome).is_none());
        }
        let emitted = assembler.feed("dev", KeyOutcome::Terminator);
        prop_assert_eq!(emitted.as_deref(), Some(expected.as_str()));
    }

    /// Property: after any terminator the buffer is empty, whether or
    /// not a barcode was emitted.
    #[test]
    fn prop_terminator_always_resets_buffer(codes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut assembler = BarcodeAssembler::new();
        for code in codes {
            assembler.feed("dev", decode(Encoding::HidRaw, code.into()));
        }
        assembler.feed("dev", KeyOutcome::Terminator);
        prop_assert_eq!(assembler.pending("dev"), 0);
    }

    /// Property: interleaving two devices' input yields the same
    /// barcodes as feeding each device alone; buffers do not observe
    /// each other.
    #[test]
    fn prop_device_buffers_independent(
        a in prop::collection::vec(mapped_hid_character_code(), 1..16),
        b in prop::collection::vec(mapped_hid_character_code(), 1..16),
    ) {
        let mut merged = BarcodeAssembler::new();
        for i in 0..a.len().max(b.len()) {
            if let Some(code) = a.get(i) {
                merged.feed("a", decode(Encoding::HidRaw, (*code).into()));
            }
            if let Some(code) = b.get(i) {
                merged.feed("b", decode(Encoding::HidRaw, (*code).into()));
            }
        }
        let from_a = merged.feed("a", KeyOutcome::Terminator);
        let from_b = merged.feed("b", KeyOutcome::Terminator);

        let expected_a: String = a
            .iter()
            .map(|code| decode(Encoding::HidRaw, (*code).into()).as_char().unwrap())
            .collect();
        let expected_b: String = b
            .iter()
            .map(|code| decode(Encoding::HidRaw, (*code).into()).as_char().unwrap())
            .collect();
        prop_assert_eq!(from_a.as_deref(), Some(expected_a.as_str()));
        prop_assert_eq!(from_b.as_deref(), Some(expected_b.as_str()));
    }
}
