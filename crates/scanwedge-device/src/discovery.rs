//! Scanner device discovery.
//!
//! Discovery probes a bounded, fixed range of candidate device paths
//! and returns the accessible subset. "Accessible" means a read-mode
//! open succeeds; the probe closes the handle immediately and never
//! holds the device. An inaccessible candidate is skipped silently:
//! most indices simply do not exist, and a permission error on one node
//! must not fail the whole pass.
//!
//! Raw HID paths are preferred; the input-event range is only probed
//! when no raw HID candidate was accessible, since a scanner usually
//! surfaces as both and hidraw gives the cleaner frames.

use serde::{Deserialize, Serialize};
use tokio::fs::File;
use tracing::{debug, trace};

use scanwedge_core::Encoding;

use crate::config::ListenerConfig;

/// One accessible scanner candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Filesystem path of the device node.
    pub path: String,

    /// Wire encoding inferred from the path.
    pub encoding: Encoding,
}

/// Check whether a read-mode open of `path` succeeds.
async fn probe(path: &str) -> bool {
    match File::open(path).await {
        Ok(_handle) => true, // dropped immediately, probe never holds the device
        Err(e) => {
            trace!(path = %path, error = %e, "candidate not accessible");
            false
        }
    }
}

/// Run one discovery pass and return the accessible devices.
///
/// The advisory hint (if any) is probed first, then the raw HID range
/// in ascending index order, then, only if no raw HID device was found,
/// the input-event range. The result order is hint first, then
/// ascending index order, regardless of when a device appeared.
pub async fn discover(config: &ListenerConfig) -> Vec<DiscoveredDevice> {
    let mut found: Vec<DiscoveredDevice> = Vec::new();

    if let Some(hint) = &config.device_hint {
        if probe(hint).await {
            found.push(DiscoveredDevice {
                path: hint.clone(),
                encoding: config.encoding_for(hint),
            });
        } else {
            debug!(path = %hint, "configured device hint not accessible");
        }
    }

    for index in 0..config.hidraw_probe_count {
        let path = format!("{}{}", config.hidraw_prefix, index);
        if found.iter().any(|d| d.path == path) {
            continue; // hint already claimed this node
        }
        if probe(&path).await {
            found.push(DiscoveredDevice {
                path,
                encoding: Encoding::HidRaw,
            });
        }
    }

    let any_hidraw = found.iter().any(|d| d.encoding == Encoding::HidRaw);
    if !any_hidraw {
        for index in 0..config.event_probe_count {
            let path = format!("{}{}", config.event_prefix, index);
            if found.iter().any(|d| d.path == path) {
                continue;
            }
            if probe(&path).await {
                found.push(DiscoveredDevice {
                    path,
                    encoding: Encoding::InputEvent,
                });
            }
        }
    }

    debug!(count = found.len(), "discovery pass complete");
    found
}
