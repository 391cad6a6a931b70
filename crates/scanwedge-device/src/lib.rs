//! Device layer for keyboard-emulation barcode scanners.
//!
//! This crate owns everything that touches a device node: probing which
//! scanner paths are accessible, reading fixed-size frames from them,
//! and supervising one reader task per active device with hot-plug
//! rediscovery for devices that appear later.
//!
//! # Architecture
//!
//! ```text
//!                 ┌───────────────────┐
//!                 │ ScannerSupervisor │  discovery pass every 5 s
//!                 └────────┬──────────┘
//!                 spawns   │   tracks ActiveDeviceSet
//!          ┌───────────────┼───────────────┐
//!          ▼               ▼               ▼
//!   ┌────────────┐  ┌────────────┐  ┌────────────┐
//!   │ Reader     │  │ Reader     │  │ Reader     │   one task per device
//!   │ hidraw0    │  │ hidraw3    │  │ event1     │
//!   └─────┬──────┘  └─────┬──────┘  └─────┬──────┘
//!         │ decode + assemble (scanwedge-decode)
//!         ▼
//!     callback(barcode)            invoked synchronously per reader
//! ```
//!
//! Each reader blocks only on its own device read; a read error or
//! disconnect terminates that reader alone, and the next discovery pass
//! re-acquires the device if it comes back. No failure here is fatal to
//! the supervisor or to other readers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scanwedge_device::{ListenerConfig, ScannerSupervisor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut listener = ScannerSupervisor::new(
//!         ListenerConfig::default(),
//!         Arc::new(|barcode| println!("scanned: {barcode}")),
//!     );
//!     listener.start();
//!     tokio::signal::ctrl_c().await.ok();
//!     listener.stop().await;
//! }
//! ```

pub mod active;
pub mod config;
pub mod devices;
pub mod discovery;
pub mod mock;
pub mod reader;
pub mod scanners;
pub mod supervisor;
pub mod traits;

pub use active::ActiveDeviceSet;
pub use config::ListenerConfig;
pub use devices::AnyScannerDevice;
pub use discovery::{DiscoveredDevice, discover};
pub use mock::{MockScanner, MockScannerHandle};
pub use reader::DeviceReader;
pub use scanners::{EventScanner, RawHidScanner};
pub use supervisor::{ListenerStatus, ScannerSupervisor};
pub use traits::ScannerDevice;
