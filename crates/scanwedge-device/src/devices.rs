//! Enum wrapper for scanner device dispatch.
//!
//! Native `async fn` in traits (Edition 2024 RPITIT) is not
//! object-safe, so readers cannot hold `Box<dyn ScannerDevice>`. The
//! enum below provides concrete dispatch over every device kind the
//! supervisor can spawn, with monomorphized calls instead of vtables.

use scanwedge_core::{Encoding, Result};

use crate::mock::MockScanner;
use crate::scanners::{EventScanner, RawHidScanner};
use crate::traits::ScannerDevice;

/// Any scanner input source a reader can own.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyScannerDevice {
    /// Raw HID reports from `/dev/hidrawN`.
    HidRaw(RawHidScanner),

    /// Input-event records from `/dev/input/eventN`.
    Event(EventScanner),

    /// Channel-driven mock for tests and development.
    Mock(MockScanner),
}

impl AnyScannerDevice {
    /// Open the real device node at `path` under the given encoding.
    ///
    /// # Errors
    ///
    /// Returns [`scanwedge_core::Error::DeviceUnavailable`] if the open
    /// fails; the caller decides whether that is worth retrying (it is
    /// the hot-plug pass's job, not the reader's).
    pub async fn open(path: &str, encoding: Encoding) -> Result<Self> {
        match encoding {
            Encoding::HidRaw => Ok(Self::HidRaw(RawHidScanner::open(path).await?)),
            Encoding::InputEvent => Ok(Self::Event(EventScanner::open(path).await?)),
        }
    }
}

impl ScannerDevice for AnyScannerDevice {
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        match self {
            Self::HidRaw(device) => device.read_frame().await,
            Self::Event(device) => device.read_frame().await,
            Self::Mock(device) => device.read_frame().await,
        }
    }

    fn path(&self) -> &str {
        match self {
            Self::HidRaw(device) => device.path(),
            Self::Event(device) => device.path(),
            Self::Mock(device) => device.path(),
        }
    }

    fn encoding(&self) -> Encoding {
        match self {
            Self::HidRaw(device) => device.encoding(),
            Self::Event(device) => device.encoding(),
            Self::Mock(device) => device.encoding(),
        }
    }
}
