//! Real scanner devices backed by kernel character devices.
//!
//! Both device kinds are plain files from the crate's point of view:
//! open read-only, issue one `read` per frame, close on drop. The
//! kernel guarantees whole-report reads on `hidraw` and whole-record
//! reads on `evdev`, so a short count only ever means the device went
//! away mid-stream.

use scanwedge_core::{Encoding, Error, Result};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::trace;

use crate::traits::ScannerDevice;

/// Issue one read of exactly `len` bytes; `None` means end of stream.
async fn read_one_frame(file: &mut File, path: &str, len: usize) -> Result<Option<Vec<u8>>> {
    let mut buf = vec![0u8; len];
    let n = file.read(&mut buf).await?;
    if n < len {
        // 0 = end of stream; anything between 0 and a full frame means
        // the device vanished mid-report.
        trace!(path = %path, read = n, frame = len, "short read, device gone");
        return Ok(None);
    }
    Ok(Some(buf))
}

async fn open_readable(path: &str) -> Result<File> {
    File::open(path)
        .await
        .map_err(|e| Error::unavailable(path, e.to_string()))
}

/// Scanner attached through `/dev/hidrawN`, delivering 8-byte
/// boot-keyboard reports.
#[derive(Debug)]
pub struct RawHidScanner {
    file: File,
    path: String,
}

impl RawHidScanner {
    /// Open the hidraw node at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceUnavailable`] if the open fails
    /// (permission, not found, busy).
    pub async fn open(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let file = open_readable(&path).await?;
        Ok(Self { file, path })
    }
}

impl ScannerDevice for RawHidScanner {
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        read_one_frame(&mut self.file, &self.path, Encoding::HidRaw.frame_len()).await
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn encoding(&self) -> Encoding {
        Encoding::HidRaw
    }
}

/// Scanner attached through `/dev/input/eventN`, delivering 24-byte
/// `input_event` records.
#[derive(Debug)]
pub struct EventScanner {
    file: File,
    path: String,
}

impl EventScanner {
    /// Open the evdev node at `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceUnavailable`] if the open fails.
    pub async fn open(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let file = open_readable(&path).await?;
        Ok(Self { file, path })
    }
}

impl ScannerDevice for EventScanner {
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        read_one_frame(&mut self.file, &self.path, Encoding::InputEvent.frame_len()).await
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn encoding(&self) -> Encoding {
        Encoding::InputEvent
    }
}
