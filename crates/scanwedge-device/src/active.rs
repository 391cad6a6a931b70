//! Shared registry of devices currently owned by a reader.
//!
//! The supervisor inserts a path before spawning its reader; the reader
//! removes it on exit through an RAII guard, so the entry disappears
//! even when the task is aborted mid-read. The hot-plug pass consults
//! the set to avoid double-spawning a device that is already being
//! read. Discovery never removes entries; a reader's own exit is the
//! sole removal signal.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Thread-safe set of device paths with a live reader.
///
/// Cloning shares the underlying set. Plain set semantics, no ordering
/// across devices; every operation takes the lock briefly and never
/// holds it across I/O.
#[derive(Debug, Clone, Default)]
pub struct ActiveDeviceSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl ActiveDeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `path`. Returns `false` if a reader already owns it.
    pub fn insert(&self, path: &str) -> bool {
        self.lock().insert(path.to_owned())
    }

    /// Release `path`. Returns `true` if it was present.
    pub fn remove(&self, path: &str) -> bool {
        self.lock().remove(path)
    }

    /// Check whether `path` currently has a live reader.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.lock().contains(path)
    }

    /// Point-in-time snapshot of owned paths, in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().iter().cloned().collect();
        paths.sort();
        paths
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Release `path` when the returned guard drops.
    ///
    /// The guard does not insert; claiming the path up front (and
    /// checking for an existing owner) stays with the caller.
    pub fn removal_guard(&self, path: impl Into<String>) -> ActiveGuard {
        ActiveGuard {
            set: self.clone(),
            path: path.into(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means another reader panicked mid-update;
        // the set itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// RAII guard releasing one device path on drop.
#[derive(Debug)]
pub struct ActiveGuard {
    set: ActiveDeviceSet,
    path: String,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.set.remove(&self.path);
    }
}
