//! Raw `struct input_event` parsing.
//!
//! Each record read from `/dev/input/eventN` is a fixed 24-byte image
//! of the kernel's `struct input_event` on 64-bit hosts:
//!
//! ```text
//! offset  size  field
//!      0     8  tv_sec   (i64, native byte order)
//!      8     8  tv_usec  (i64, native byte order)
//!     16     2  type     (u16)
//!     18     2  code     (u16)
//!     20     4  value    (i32)
//! ```
//!
//! Only key-down events (`type == EV_KEY`, `value == KEY_DOWN`) carry a
//! keystroke; key-up and autorepeat events, and non-key event types
//! such as `EV_SYN`, are filtered out by the caller before the key code
//! ever reaches the decoder.

use scanwedge_core::constants::INPUT_EVENT_LEN;

/// Event type for key press/release events (`EV_KEY`).
pub const EV_KEY: u16 = 1;

/// Event value for a key-down transition.
pub const KEY_DOWN: i32 = 1;

/// One parsed input-event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub tv_sec: i64,
    pub tv_usec: i64,
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl EventRecord {
    /// Parse one record from raw bytes (native byte order).
    ///
    /// Returns `None` if the buffer is shorter than one record; a
    /// malformed frame decodes to no event rather than an error.
    #[must_use]
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < INPUT_EVENT_LEN {
            return None;
        }
        Some(Self {
            tv_sec: i64::from_ne_bytes(buf[0..8].try_into().ok()?),
            tv_usec: i64::from_ne_bytes(buf[8..16].try_into().ok()?),
            event_type: u16::from_ne_bytes(buf[16..18].try_into().ok()?),
            code: u16::from_ne_bytes(buf[18..20].try_into().ok()?),
            value: i32::from_ne_bytes(buf[20..24].try_into().ok()?),
        })
    }

    /// Check if this record is a key-down event worth decoding.
    #[must_use]
    pub fn is_key_press(&self) -> bool {
        self.event_type == EV_KEY && self.value == KEY_DOWN
    }
}
