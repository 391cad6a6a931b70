//! Listener configuration.

use scanwedge_core::Encoding;
use scanwedge_core::constants::{
    DEFAULT_RESCAN_INTERVAL, DEFAULT_STOP_TIMEOUT, EVENT_PATH_PREFIX, EVENT_PROBE_COUNT,
    HIDRAW_PATH_PREFIX, HIDRAW_PROBE_COUNT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scanner listener.
///
/// Everything has a sensible default; a bare `ListenerConfig::default()`
/// auto-detects scanners on the standard device paths. The prefix and
/// range fields exist for deployments with a relocated devfs (and for
/// tests, which point them at a scratch directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Advisory device path to probe first. If inaccessible it is
    /// skipped like any other candidate; auto-detection still runs.
    #[serde(default)]
    pub device_hint: Option<String>,

    /// Seconds between hot-plug discovery passes.
    #[serde(default = "default_rescan_interval_secs")]
    pub rescan_interval_secs: u64,

    /// Bounded wait, in seconds, for readers to finish during `stop()`.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: u64,

    /// Path prefix for raw HID candidates.
    #[serde(default = "default_hidraw_prefix")]
    pub hidraw_prefix: String,

    /// Number of raw HID indices probed (`<prefix>0` .. `<prefix>N-1`).
    #[serde(default = "default_hidraw_probe_count")]
    pub hidraw_probe_count: u32,

    /// Path prefix for input-event fallback candidates.
    #[serde(default = "default_event_prefix")]
    pub event_prefix: String,

    /// Number of input-event indices probed as fallback.
    #[serde(default = "default_event_probe_count")]
    pub event_probe_count: u32,
}

fn default_rescan_interval_secs() -> u64 {
    DEFAULT_RESCAN_INTERVAL.as_secs()
}

fn default_stop_timeout_secs() -> u64 {
    DEFAULT_STOP_TIMEOUT.as_secs()
}

fn default_hidraw_prefix() -> String {
    HIDRAW_PATH_PREFIX.to_owned()
}

fn default_hidraw_probe_count() -> u32 {
    HIDRAW_PROBE_COUNT
}

fn default_event_prefix() -> String {
    EVENT_PATH_PREFIX.to_owned()
}

fn default_event_probe_count() -> u32 {
    EVENT_PROBE_COUNT
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            device_hint: None,
            rescan_interval_secs: default_rescan_interval_secs(),
            stop_timeout_secs: default_stop_timeout_secs(),
            hidraw_prefix: default_hidraw_prefix(),
            hidraw_probe_count: default_hidraw_probe_count(),
            event_prefix: default_event_prefix(),
            event_probe_count: default_event_probe_count(),
        }
    }
}

impl ListenerConfig {
    pub fn rescan_interval(&self) -> Duration {
        Duration::from_secs(self.rescan_interval_secs)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }

    /// Infer the wire encoding for a device path.
    ///
    /// Paths under the event prefix (or containing `event`, for hint
    /// paths outside both prefixes) speak input-event; everything else
    /// is treated as raw HID.
    #[must_use]
    pub fn encoding_for(&self, path: &str) -> Encoding {
        if path.starts_with(&self.event_prefix) || path.contains("event") {
            Encoding::InputEvent
        } else {
            Encoding::HidRaw
        }
    }
}
