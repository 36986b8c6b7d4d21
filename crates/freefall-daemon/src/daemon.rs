//! Startup sequence and wiring.

use anyhow::{Context, Result};
use freefall_actuator::{ProtectedDisk, UnloadHeadsActuator};
use freefall_event::{DeviceEventSource, EventChannel};
use freefall_rt::RTSetup;
use freefall_watchdog::{FreefallWatchdog, ShutdownSignal, WatchdogConfig, WatchdogError};
use tracing::{info, warn};

use crate::cli::Cli;

/// Validate configuration, acquire the event source and run until shutdown.
///
/// Typed failures are wrapped as [`WatchdogError`] so the caller can map
/// them to an exit status.
pub fn run(cli: &Cli) -> Result<()> {
    let config = WatchdogConfig::builder()
        .protect_secs(cli.protect_secs)
        .grace_secs(cli.grace_secs)
        .build()
        .context("Invalid timing options")?;

    let disk = ProtectedDisk::with_sysfs_root(&cli.device, &cli.sysfs_root)
        .map_err(WatchdogError::from)?;
    disk.probe().map_err(WatchdogError::from)?;

    let source = DeviceEventSource::open(&cli.event_source).map_err(WatchdogError::from)?;
    let channel = EventChannel::new();
    let handle = channel.open().map_err(WatchdogError::from)?;

    if cli.no_realtime {
        info!("Real-time setup skipped");
    } else if let Err(err) = RTSetup::default().apply() {
        warn!(error = %err, "Continuing without full real-time setup");
    }

    source
        .spawn(channel.producer())
        .context("Failed to start event source thread")?;

    let shutdown = ShutdownSignal::new(handle.interrupter());
    let on_signal = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Shutdown signal received");
        on_signal.request();
    })
    .context("Failed to install signal handler")?;

    info!(
        device = disk.device(),
        control_path = %disk.control_path().display(),
        event_source = %cli.event_source.display(),
        "Protecting disk"
    );

    let mut watchdog = FreefallWatchdog::new(config, UnloadHeadsActuator::new(disk), shutdown)?;
    watchdog.run(handle)?;
    Ok(())
}

/// Exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<WatchdogError>()
        .map_or(1, WatchdogError::exit_code)
}
