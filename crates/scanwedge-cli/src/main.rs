//! scanwedge - keyboard-wedge barcode scanner listener.
//!
//! Attaches to USB HID barcode scanners, prints each completed barcode
//! to stdout, and keeps watching for scanners plugged in later.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use scanwedge_device::{ListenerConfig, ScannerSupervisor, discover};

#[derive(Parser, Debug)]
#[command(name = "scanwedge")]
#[command(about = "Multi-device USB barcode scanner listener")]
#[command(version)]
struct Args {
    /// Device path to probe first (auto-detect otherwise)
    #[arg(short, long)]
    device: Option<String>,

    /// Seconds between hot-plug discovery passes
    #[arg(long, default_value_t = 5)]
    rescan_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run a single discovery pass, print the result, and exit
    #[arg(long)]
    list_devices: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("scanwedge v{}", env!("CARGO_PKG_VERSION"));

    let config = ListenerConfig {
        device_hint: args.device,
        rescan_interval_secs: args.rescan_secs,
        ..ListenerConfig::default()
    };

    if args.list_devices {
        let devices = discover(&config).await;
        println!("Accessible scanner devices: {}", devices.len());
        for device in devices {
            println!("  - {} ({})", device.path, device.encoding);
        }
        return Ok(());
    }

    let mut listener = ScannerSupervisor::new(
        config,
        Arc::new(|barcode| println!("{barcode}")),
    );
    listener.start();

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    listener.stop().await;

    Ok(())
}
