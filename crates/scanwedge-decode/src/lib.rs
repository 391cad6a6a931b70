//! Wire-format layer for keyboard-emulation barcode scanners.
//!
//! A keyboard-emulation scanner types each barcode character as a
//! keystroke and finishes with Enter. This crate turns the two raw
//! frame formats such a scanner can arrive in (USB HID boot-keyboard
//! reports and Linux `input_event` records) into characters, and
//! assembles those characters into complete barcode strings.
//!
//! # Pipeline
//!
//! ```text
//! raw frame ──> key code ──> KeyOutcome ──> BarcodeAssembler ──> String
//!              (hid / evdev)  (Character /    (per-device buffer,
//!                              Terminator /    flushed on Terminator)
//!                              Ignored)
//! ```
//!
//! Everything here is pure and synchronous; device I/O and concurrency
//! live in `scanwedge-device`.
//!
//! # Example
//!
//! ```
//! use scanwedge_core::Encoding;
//! use scanwedge_decode::{decode, BarcodeAssembler};
//!
//! let mut assembler = BarcodeAssembler::new();
//!
//! // HID usage codes for 'A', 'Z', Enter.
//! for code in [0x04, 0x1d] {
//!     assert!(assembler.feed("dev0", decode(Encoding::HidRaw, code)).is_none());
//! }
//! let barcode = assembler.feed("dev0", decode(Encoding::HidRaw, 0x28));
//! assert_eq!(barcode.as_deref(), Some("AZ"));
//! ```

pub mod assembler;
pub mod evdev;
pub mod event;
pub mod hid;
pub mod outcome;

pub use assembler::BarcodeAssembler;
pub use event::{EV_KEY, EventRecord, KEY_DOWN};
pub use outcome::{KeyOutcome, decode};
