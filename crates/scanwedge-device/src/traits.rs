//! Scanner device trait definition.
//!
//! One trait sits between the reader loop and the concrete frame
//! sources (`/dev/hidraw*`, `/dev/input/event*`, and the mock used in
//! tests). It uses native `async fn` methods (Edition 2024 RPITIT), so
//! it is not object-safe; dynamic dispatch goes through the enum
//! wrapper in [`devices`](crate::devices) instead of `Box<dyn ...>`.

#![allow(async_fn_in_trait)]

use scanwedge_core::{Encoding, Result};

/// One open, read-capable scanner input source.
///
/// Implementations own their handle exclusively; dropping the device
/// closes it. Frames are fixed-size per [`Encoding`] and a device never
/// returns a partial frame; a short read is reported as end-of-stream.
pub trait ScannerDevice: Send + Sync {
    /// Read exactly one raw frame.
    ///
    /// Returns `Ok(Some(frame))` with one frame of this device's
    /// encoding, or `Ok(None)` when the device reached end of stream
    /// (a zero-length or short read, meaning it was unplugged).
    ///
    /// # Errors
    ///
    /// Returns an error on any other I/O failure. Both `Ok(None)` and
    /// `Err` are terminal for the reader that owns this device.
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>>;

    /// Stable identifier for this device (its filesystem path).
    fn path(&self) -> &str;

    /// Wire encoding this device speaks.
    fn encoding(&self) -> Encoding;
}
