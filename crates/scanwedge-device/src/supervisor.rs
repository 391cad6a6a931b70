//! Listener supervisor.
//!
//! The supervisor orchestrates discovery and reader lifecycle: one
//! discovery pass at startup, one reader task per accessible device,
//! and an always-on hot-plug loop that re-runs discovery on a fixed
//! interval so scanners plugged in later (or recovered after an error)
//! are picked up. Finding zero devices is never a startup failure;
//! the loop simply keeps watching.
//!
//! A path leaves the active set only when its reader exits; discovery
//! not returning a momentarily-busy device on one pass does not evict
//! it. Shutdown is cooperative and best-effort: readers check a stop
//! flag at loop-top, and `stop()` gives up after a bounded timeout on
//! readers still wedged in a kernel read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use scanwedge_core::{ScanCallback, ScanRecord};

use crate::active::ActiveDeviceSet;
use crate::config::ListenerConfig;
use crate::discovery;
use crate::reader::DeviceReader;

/// Point-in-time view of the listener, for status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerStatus {
    /// Whether the supervisor loop is running.
    pub running: bool,

    /// When the listener was last started.
    pub started_at: Option<DateTime<Utc>>,

    /// Device paths currently owned by a live reader.
    pub devices: Vec<String>,

    /// Most recently completed scan, if any.
    pub last_scan: Option<ScanRecord>,
}

/// Orchestrates device discovery and per-device reader tasks.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use scanwedge_device::{ListenerConfig, ScannerSupervisor};
///
/// # async fn example() {
/// let mut listener = ScannerSupervisor::new(
///     ListenerConfig::default(),
///     Arc::new(|barcode| println!("{barcode}")),
/// );
/// listener.start(); // returns immediately
/// // ...
/// println!("active: {:?}", listener.active_devices());
/// listener.stop().await;
/// # }
/// ```
pub struct ScannerSupervisor {
    config: ListenerConfig,
    callback: ScanCallback,
    active: ActiveDeviceSet,
    running: Arc<AtomicBool>,
    last_scan: Arc<Mutex<Option<ScanRecord>>>,
    started_at: Option<DateTime<Utc>>,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl ScannerSupervisor {
    /// Create a supervisor delivering completed barcodes to `callback`.
    ///
    /// The callback is invoked synchronously from whichever reader
    /// completed the barcode; readers for different devices may invoke
    /// it concurrently.
    pub fn new(config: ListenerConfig, callback: ScanCallback) -> Self {
        let last_scan: Arc<Mutex<Option<ScanRecord>>> = Arc::new(Mutex::new(None));

        // Record the last scan for status snapshots, then deliver.
        let record = Arc::clone(&last_scan);
        let delivering: ScanCallback = Arc::new(move |barcode: String| {
            *record.lock().unwrap_or_else(|e| e.into_inner()) =
                Some(ScanRecord::new(barcode.as_str()));
            callback(barcode);
        });

        Self {
            config,
            callback: delivering,
            active: ActiveDeviceSet::new(),
            running: Arc::new(AtomicBool::new(false)),
            last_scan,
            started_at: None,
            shutdown: None,
            task: None,
        }
    }

    /// Start discovery and reader spawning; returns immediately.
    ///
    /// Never fails: inaccessible or absent devices are logged and the
    /// hot-plug loop keeps retrying in the background. Calling `start`
    /// on a running listener is a no-op.
    pub fn start(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("listener already running");
            return;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.shutdown = Some(shutdown_tx);
        self.started_at = Some(Utc::now());

        info!(
            hint = self.config.device_hint.as_deref().unwrap_or("<auto>"),
            rescan_secs = self.config.rescan_interval_secs,
            "scanner listener starting"
        );

        self.task = Some(tokio::spawn(supervise(
            self.config.clone(),
            self.callback.clone(),
            self.active.clone(),
            Arc::clone(&self.running),
            shutdown_rx,
        )));
    }

    /// Signal all readers to terminate and wait, bounded.
    ///
    /// Idempotent; safe to call without a prior `start()`. A reader
    /// blocked in a kernel read may not observe the stop signal until
    /// its next I/O event, so the wait gives up after the configured
    /// stop timeout.
    pub async fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        let Some(task) = self.task.take() else {
            return;
        };
        match tokio::time::timeout(self.config.stop_timeout(), task).await {
            Ok(_) => info!("scanner listener stopped"),
            Err(_) => warn!("timed out waiting for device readers to stop"),
        }
    }

    /// Snapshot of device paths currently owned by a live reader.
    #[must_use]
    pub fn active_devices(&self) -> Vec<String> {
        self.active.snapshot()
    }

    /// Serializable status snapshot.
    #[must_use]
    pub fn status(&self) -> ListenerStatus {
        ListenerStatus {
            running: self.running.load(Ordering::SeqCst),
            started_at: self.started_at,
            devices: self.active.snapshot(),
            last_scan: self
                .last_scan
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        }
    }
}

/// Supervisor loop: discover, spawn readers for new paths, sleep, repeat.
async fn supervise(
    config: ListenerConfig,
    callback: ScanCallback,
    active: ActiveDeviceSet,
    running: Arc<AtomicBool>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut readers: JoinSet<()> = JoinSet::new();
    let interval = config.rescan_interval();
    let mut first_pass = true;

    loop {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let found = discovery::discover(&config).await;
        if first_pass {
            if found.is_empty() {
                info!("no scanner devices found at startup; hot-plug monitor running");
            } else {
                info!(count = found.len(), "scanner devices found at startup");
            }
            first_pass = false;
        }

        for device in found {
            // A path already owned by a reader is never double-spawned;
            // its reader's exit is the only thing that frees it.
            if !active.insert(&device.path) {
                continue;
            }
            debug!(path = %device.path, encoding = %device.encoding, "spawning device reader");
            readers.spawn(
                DeviceReader::new(
                    device.path,
                    device.encoding,
                    callback.clone(),
                    active.clone(),
                    Arc::clone(&running),
                )
                .run(),
            );
        }

        // Reap finished reader tasks without blocking the loop.
        while readers.try_join_next().is_some() {}

        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    // Cooperative stop first (flag is already false); abort whatever is
    // still parked in a blocking read. Each reader's removal guard runs
    // on abort, so the active set drains either way.
    readers.abort_all();
    while readers.join_next().await.is_some() {}
    debug!("listener supervisor stopped");
}
