use crate::constants::{HID_REPORT_LEN, INPUT_EVENT_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Wire encoding spoken by one scanner device.
///
/// A keyboard-emulation scanner is read through one of two kernel
/// interfaces, each with its own fixed frame size and key-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Raw HID boot-keyboard reports from `/dev/hidrawN` (8 bytes).
    HidRaw,

    /// Linux `struct input_event` records from `/dev/input/eventN`
    /// (24 bytes, native byte order).
    InputEvent,
}

impl Encoding {
    /// Fixed frame size for this encoding, in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use scanwedge_core::Encoding;
    ///
    /// assert_eq!(Encoding::HidRaw.frame_len(), 8);
    /// assert_eq!(Encoding::InputEvent.frame_len(), 24);
    /// ```
    #[must_use]
    pub fn frame_len(&self) -> usize {
        match self {
            Self::HidRaw => HID_REPORT_LEN,
            Self::InputEvent => INPUT_EVENT_LEN,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HidRaw => write!(f, "hidraw"),
            Self::InputEvent => write!(f, "input-event"),
        }
    }
}

/// One completed scan, as kept in the listener status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    /// The decoded barcode text, terminator excluded.
    pub barcode: String,

    /// When the terminator for this barcode was received.
    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    /// Create a record stamped with the current time.
    pub fn new(barcode: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Delivery callback for completed barcodes.
///
/// Invoked synchronously from whichever reader completed the barcode,
/// at most once per completed barcode. Readers for different devices
/// may invoke it concurrently; the callback must either tolerate that
/// or serialize internally.
pub type ScanCallback = Arc<dyn Fn(String) + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Encoding::HidRaw, 8, "hidraw")]
    #[case(Encoding::InputEvent, 24, "input-event")]
    fn test_encoding_frame_len_and_display(
        #[case] encoding: Encoding,
        #[case] len: usize,
        #[case] display: &str,
    ) {
        assert_eq!(encoding.frame_len(), len);
        assert_eq!(encoding.to_string(), display);
    }

    #[test]
    fn test_encoding_serde_roundtrip() {
        let json = serde_json::to_string(&Encoding::HidRaw).unwrap();
        assert_eq!(json, "\"hid_raw\"");
        let back: Encoding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Encoding::HidRaw);
    }

    #[test]
    fn test_scan_record_keeps_barcode() {
        let record = ScanRecord::new("4006381333931");
        assert_eq!(record.barcode, "4006381333931");
    }
}
