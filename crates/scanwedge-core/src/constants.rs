//! Core constants for the scanwedge listener.
//!
//! This module defines the wire-format sizes, device probe ranges, and
//! timing defaults used throughout the workspace. They are derived from
//! the USB HID boot-keyboard report format and the Linux `input_event`
//! ABI; changing the frame sizes will break frame alignment against real
//! devices.
//!
//! # Wire formats
//!
//! A keyboard-emulation scanner presents itself as a standard USB
//! keyboard. Depending on which kernel interface the listener attaches
//! to, it sees one of two fixed-size frames:
//!
//! ```text
//! /dev/hidrawN        8 bytes:  [modifiers][reserved][key0..key5]
//! /dev/input/eventN  24 bytes:  [tv_sec:8][tv_usec:8][type:2][code:2][value:4]
//! ```
//!
//! # Usage
//!
//! ```
//! use scanwedge_core::constants::*;
//!
//! let mut buf = [0u8; HID_REPORT_LEN];
//! assert_eq!(buf.len(), 8);
//! assert_eq!(HID_KEY_SLOT_RANGE.len(), 6);
//! ```

use std::ops::Range;
use std::time::Duration;

// ============================================================================
// Frame sizes
// ============================================================================

/// Size in bytes of one USB HID boot-keyboard report.
pub const HID_REPORT_LEN: usize = 8;

/// Size in bytes of one Linux `struct input_event` on 64-bit hosts
/// (16-byte timeval + 2-byte type + 2-byte code + 4-byte value).
pub const INPUT_EVENT_LEN: usize = 24;

/// Byte range of the key-code slots inside a HID report.
///
/// Byte 0 carries modifier bits and byte 1 is reserved; neither is
/// decoded. The remaining six bytes each hold one usage code (or zero
/// for an empty slot).
pub const HID_KEY_SLOT_RANGE: Range<usize> = 2..HID_REPORT_LEN;

// ============================================================================
// Device probe ranges
// ============================================================================

/// Path prefix for raw HID character devices.
pub const HIDRAW_PATH_PREFIX: &str = "/dev/hidraw";

/// Path prefix for Linux input-event character devices.
pub const EVENT_PATH_PREFIX: &str = "/dev/input/event";

/// Number of `/dev/hidrawN` indices probed during discovery (0..20).
pub const HIDRAW_PROBE_COUNT: u32 = 20;

/// Number of `/dev/input/eventN` indices probed as fallback (0..10).
pub const EVENT_PROBE_COUNT: u32 = 10;

// ============================================================================
// Timing defaults
// ============================================================================

/// Interval between hot-plug discovery passes.
pub const DEFAULT_RESCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Bounded wait for reader tasks to finish during shutdown.
///
/// Shutdown is best-effort: a reader blocked inside a kernel read call
/// only observes the stop signal at its next I/O event, so `stop()`
/// gives up after this long rather than hanging the caller.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(2);
