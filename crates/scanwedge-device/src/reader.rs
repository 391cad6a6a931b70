//! Per-device reader task.
//!
//! A reader owns exactly one device for its whole lifetime; it is the
//! concurrency and failure boundary of the listener. The lifecycle is
//! `Opening → Reading → (Closed | Errored)` with no retry inside one
//! reader: when the loop exits, for any reason, the device path is
//! released and only the next discovery pass may spawn a fresh reader
//! for it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace, warn};

use scanwedge_core::{Encoding, ScanCallback};
use scanwedge_decode::{BarcodeAssembler, EventRecord, KeyOutcome, decode, hid};

use crate::active::ActiveDeviceSet;
use crate::devices::AnyScannerDevice;
use crate::traits::ScannerDevice;

/// Reads one scanner device until disconnect, error, or stop.
///
/// Frames are decoded and assembled inline; a completed barcode invokes
/// the delivery callback synchronously, so callback execution and the
/// next frame read are strictly sequential for one device (while other
/// readers run undisturbed in parallel).
pub struct DeviceReader {
    path: String,
    encoding: Encoding,
    /// Pre-opened device (mock injection); opened from `path` when absent.
    device: Option<AnyScannerDevice>,
    assembler: BarcodeAssembler,
    callback: ScanCallback,
    active: ActiveDeviceSet,
    running: Arc<AtomicBool>,
}

impl DeviceReader {
    /// Reader that opens the device node at `path` when it runs.
    ///
    /// The caller is expected to have claimed `path` in `active`
    /// beforehand; the reader only ever releases it.
    pub fn new(
        path: impl Into<String>,
        encoding: Encoding,
        callback: ScanCallback,
        active: ActiveDeviceSet,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            path: path.into(),
            encoding,
            device: None,
            assembler: BarcodeAssembler::new(),
            callback,
            active,
            running,
        }
    }

    /// Reader over an already-open device (used with mocks in tests).
    pub fn with_device(
        device: AnyScannerDevice,
        callback: ScanCallback,
        active: ActiveDeviceSet,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            path: device.path().to_owned(),
            encoding: device.encoding(),
            device: Some(device),
            assembler: BarcodeAssembler::new(),
            callback,
            active,
            running,
        }
    }

    /// Run the read loop to completion.
    ///
    /// Consumes the reader; on return the device handle is closed and
    /// the path has been released from the active set, whichever way
    /// the loop ended. The guard also fires if this task is aborted or
    /// the callback panics, so a dead reader can never wedge its path.
    pub async fn run(mut self) {
        let path = self.path.clone();
        let _guard = self.active.removal_guard(&path);

        let mut device = match self.device.take() {
            Some(device) => device,
            None => match AnyScannerDevice::open(&path, self.encoding).await {
                Ok(device) => device,
                Err(e) => {
                    // No retry here: the hot-plug pass re-probes the path.
                    warn!(path = %path, error = %e, "failed to open device");
                    return;
                }
            },
        };

        info!(path = %path, encoding = %self.encoding, "reader started");

        loop {
            if !self.running.load(Ordering::SeqCst) {
                debug!(path = %path, "stop requested, closing reader");
                break;
            }

            match device.read_frame().await {
                Ok(Some(frame)) => self.handle_frame(&path, &frame),
                Ok(None) => {
                    info!(path = %path, "device disconnected");
                    break;
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "read error, closing reader");
                    break;
                }
            }
        }
    }

    /// Decode one frame and feed every keystroke it carries.
    fn handle_frame(&mut self, path: &str, frame: &[u8]) {
        match self.encoding {
            Encoding::HidRaw => {
                // A report may carry zero, one, or several pressed keys.
                for code in hid::report_keys(frame) {
                    self.feed(path, decode(Encoding::HidRaw, code.into()));
                }
            }
            Encoding::InputEvent => {
                let Some(record) = EventRecord::parse(frame) else {
                    trace!(path = %path, len = frame.len(), "malformed event record dropped");
                    return;
                };
                // Key-up, autorepeat, and EV_SYN never reach the decoder.
                if record.is_key_press() {
                    self.feed(path, decode(Encoding::InputEvent, record.code));
                }
            }
        }
    }

    fn feed(&mut self, path: &str, outcome: KeyOutcome) {
        if let Some(barcode) = self.assembler.feed(path, outcome) {
            info!(path = %path, barcode = %barcode, "barcode scanned");
            (self.callback)(barcode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockScanner;
    use std::sync::Mutex;

    fn collector() -> (ScanCallback, Arc<Mutex<Vec<String>>>) {
        let scans = Arc::new(Mutex::new(Vec::new()));
        let sink = scans.clone();
        let callback: ScanCallback = Arc::new(move |barcode| {
            sink.lock().unwrap().push(barcode);
        });
        (callback, scans)
    }

    fn running_flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(true))
    }

    #[tokio::test]
    async fn test_hid_scan_reaches_callback_once() {
        let (callback, scans) = collector();
        let active = ActiveDeviceSet::new();
        let (scanner, handle) = MockScanner::new(Encoding::HidRaw);
        active.insert("mock0");

        let reader =
            DeviceReader::with_device(AnyScannerDevice::Mock(scanner), callback, active.clone(), running_flag());
        let task = tokio::spawn(reader.run());

        handle.send_hid_report(&[0x04]).await.unwrap(); // 'A'
        handle.send_hid_report(&[0x1d]).await.unwrap(); // 'Z'
        handle.send_hid_report(&[0x28]).await.unwrap(); // Enter
        drop(handle); // unplug

        task.await.unwrap();
        assert_eq!(*scans.lock().unwrap(), vec!["AZ".to_string()]);
        assert!(!active.contains("mock0"));
    }

    #[tokio::test]
    async fn test_event_scan_filters_key_ups() {
        let (callback, scans) = collector();
        let active = ActiveDeviceSet::new();
        let (scanner, handle) = MockScanner::new(Encoding::InputEvent);
        active.insert("mock0");

        let reader =
            DeviceReader::with_device(AnyScannerDevice::Mock(scanner), callback, active.clone(), running_flag());
        let task = tokio::spawn(reader.run());

        // '4' is key code 5; press and release both arrive on the wire.
        handle.send_key_event(5, 1).await.unwrap();
        handle.send_key_event(5, 0).await.unwrap();
        handle.send_key_event(2, 1).await.unwrap(); // '1'
        handle.send_key_event(2, 0).await.unwrap();
        handle.send_key_event(28, 1).await.unwrap(); // Enter
        drop(handle);

        task.await.unwrap();
        assert_eq!(*scans.lock().unwrap(), vec!["41".to_string()]);
    }

    #[tokio::test]
    async fn test_disconnect_mid_barcode_emits_nothing_more() {
        let (callback, scans) = collector();
        let active = ActiveDeviceSet::new();
        let (scanner, handle) = MockScanner::new(Encoding::HidRaw);
        active.insert("mock0");

        let reader =
            DeviceReader::with_device(AnyScannerDevice::Mock(scanner), callback, active.clone(), running_flag());
        let task = tokio::spawn(reader.run());

        handle.send_hid_report(&[0x05]).await.unwrap(); // 'B', never terminated
        drop(handle);

        task.await.unwrap();
        assert!(scans.lock().unwrap().is_empty());
        assert!(!active.contains("mock0"));
    }

    #[tokio::test]
    async fn test_stop_flag_checked_at_loop_top() {
        let (callback, scans) = collector();
        let active = ActiveDeviceSet::new();
        let (scanner, _handle) = MockScanner::new(Encoding::HidRaw);
        active.insert("mock0");

        let running = Arc::new(AtomicBool::new(false)); // stop before first read
        let reader =
            DeviceReader::with_device(AnyScannerDevice::Mock(scanner), callback, active.clone(), running);
        reader.run().await;

        assert!(scans.lock().unwrap().is_empty());
        assert!(!active.contains("mock0"));
    }

    #[tokio::test]
    async fn test_open_failure_releases_path() {
        let (callback, _scans) = collector();
        let active = ActiveDeviceSet::new();
        active.insert("/nonexistent/hidraw99");

        let reader = DeviceReader::new(
            "/nonexistent/hidraw99",
            Encoding::HidRaw,
            callback,
            active.clone(),
            running_flag(),
        );
        reader.run().await;

        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn test_two_readers_never_cross_contaminate() {
        let (callback, scans) = collector();
        let active = ActiveDeviceSet::new();
        let running = running_flag();

        let (scanner_a, handle_a) = MockScanner::with_path("mockA", Encoding::HidRaw);
        let (scanner_b, handle_b) = MockScanner::with_path("mockB", Encoding::HidRaw);
        active.insert("mockA");
        active.insert("mockB");

        let reader_a = DeviceReader::with_device(
            AnyScannerDevice::Mock(scanner_a),
            callback.clone(),
            active.clone(),
            running.clone(),
        );
        let reader_b = DeviceReader::with_device(
            AnyScannerDevice::Mock(scanner_b),
            callback,
            active.clone(),
            running,
        );
        let task_a = tokio::spawn(reader_a.run());
        let task_b = tokio::spawn(reader_b.run());

        // Interleave the two devices' keystrokes.
        handle_a.send_hid_report(&[0x04]).await.unwrap(); // A: 'A'
        handle_b.send_hid_report(&[0x05]).await.unwrap(); // B: 'B'
        handle_a.send_hid_report(&[0x1e]).await.unwrap(); // A: '1'
        handle_b.send_hid_report(&[0x1f]).await.unwrap(); // B: '2'
        handle_a.send_hid_report(&[0x28]).await.unwrap();
        handle_b.send_hid_report(&[0x28]).await.unwrap();
        drop(handle_a);
        drop(handle_b);

        task_a.await.unwrap();
        task_b.await.unwrap();

        let mut got = scans.lock().unwrap().clone();
        got.sort();
        assert_eq!(got, vec!["A1".to_string(), "B2".to_string()]);
        assert!(active.is_empty());
    }
}
