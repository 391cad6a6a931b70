//! Mock scanner implementation for testing and development.
//!
//! This module provides a simulated scanner device that can be driven
//! programmatically, so reader and supervisor behavior can be tested
//! without physical hardware or device-node permissions.

use scanwedge_core::{Encoding, Error, Result, constants::HID_REPORT_LEN};
use tokio::sync::mpsc;

use crate::traits::ScannerDevice;

/// Mock scanner device for testing and development.
///
/// Frames are injected through a [`MockScannerHandle`]; dropping the
/// handle closes the channel, which the device reports as a disconnect,
/// exactly what a reader sees when a real scanner is unplugged.
///
/// # Examples
///
/// ```
/// use scanwedge_core::Encoding;
/// use scanwedge_device::{MockScanner, ScannerDevice};
///
/// #[tokio::main]
/// async fn main() -> scanwedge_core::Result<()> {
///     let (mut scanner, handle) = MockScanner::new(Encoding::HidRaw);
///
///     handle.send_hid_report(&[0x04]).await?;
///     let frame = scanner.read_frame().await?.unwrap();
///     assert_eq!(frame[2], 0x04);
///
///     drop(handle);
///     assert!(scanner.read_frame().await?.is_none());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockScanner {
    frame_rx: mpsc::Receiver<Vec<u8>>,
    path: String,
    encoding: Encoding,
}

impl MockScanner {
    /// Create a mock scanner with the default path `mock0`.
    pub fn new(encoding: Encoding) -> (Self, MockScannerHandle) {
        Self::with_path("mock0", encoding)
    }

    /// Create a mock scanner with a custom device path.
    pub fn with_path(path: impl Into<String>, encoding: Encoding) -> (Self, MockScannerHandle) {
        let (frame_tx, frame_rx) = mpsc::channel(32);
        let path = path.into();

        let scanner = Self {
            frame_rx,
            path: path.clone(),
            encoding,
        };
        let handle = MockScannerHandle {
            frame_tx,
            path,
            encoding,
        };

        (scanner, handle)
    }
}

impl ScannerDevice for MockScanner {
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        // Channel closed = handle dropped = device unplugged.
        Ok(self.frame_rx.recv().await)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }
}

/// Handle for driving a [`MockScanner`].
///
/// Can be cloned and shared across tasks; dropping every clone
/// simulates unplugging the device.
#[derive(Debug, Clone)]
pub struct MockScannerHandle {
    frame_tx: mpsc::Sender<Vec<u8>>,
    path: String,
    encoding: Encoding,
}

impl MockScannerHandle {
    /// Inject one raw frame, as read from the device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if `frame` is not exactly one
    /// frame of the scanner's encoding, or [`Error::DeviceDisconnected`]
    /// if the scanner side was dropped.
    pub async fn send_frame(&self, frame: Vec<u8>) -> Result<()> {
        let expected = self.encoding.frame_len();
        if frame.len() != expected {
            return Err(Error::invalid_frame(format!(
                "expected {expected} bytes, got {}",
                frame.len()
            )));
        }
        self.frame_tx
            .send(frame)
            .await
            .map_err(|_| Error::disconnected(&self.path))
    }

    /// Inject an 8-byte HID report with `keys` in the key slots.
    pub async fn send_hid_report(&self, keys: &[u8]) -> Result<()> {
        debug_assert!(keys.len() <= HID_REPORT_LEN - 2);
        let mut report = vec![0u8; HID_REPORT_LEN];
        report[2..2 + keys.len()].copy_from_slice(keys);
        self.send_frame(report).await
    }

    /// Inject a 24-byte input-event record.
    pub async fn send_key_event(&self, code: u16, value: i32) -> Result<()> {
        let mut record = Vec::with_capacity(24);
        record.extend_from_slice(&0i64.to_ne_bytes());
        record.extend_from_slice(&0i64.to_ne_bytes());
        record.extend_from_slice(&1u16.to_ne_bytes()); // EV_KEY
        record.extend_from_slice(&code.to_ne_bytes());
        record.extend_from_slice(&value.to_ne_bytes());
        self.send_frame(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frames_arrive_in_order() {
        let (mut scanner, handle) = MockScanner::new(Encoding::HidRaw);

        handle.send_hid_report(&[0x1e]).await.unwrap();
        handle.send_hid_report(&[0x28]).await.unwrap();

        assert_eq!(scanner.read_frame().await.unwrap().unwrap()[2], 0x1e);
        assert_eq!(scanner.read_frame().await.unwrap().unwrap()[2], 0x28);
    }

    #[tokio::test]
    async fn test_dropped_handle_reads_as_disconnect() {
        let (mut scanner, handle) = MockScanner::new(Encoding::InputEvent);
        drop(handle);
        assert!(scanner.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_after_scanner_dropped_errors() {
        let (scanner, handle) = MockScanner::new(Encoding::HidRaw);
        drop(scanner);
        let result = handle.send_hid_report(&[0x04]).await;
        assert!(matches!(result, Err(Error::DeviceDisconnected { .. })));
    }

    #[tokio::test]
    async fn test_wrong_frame_size_is_rejected() {
        let (_scanner, handle) = MockScanner::new(Encoding::HidRaw);
        let result = handle.send_frame(vec![0u8; 24]).await;
        assert!(matches!(result, Err(Error::InvalidFrame { .. })));
    }
}
