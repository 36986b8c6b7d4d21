//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use freefall_actuator::{DEFAULT_DEVICE, DEFAULT_SYSFS_ROOT};
use freefall_event::DEFAULT_EVENT_SOURCE;

#[derive(Debug, Parser)]
#[command(name = "freefalld")]
#[command(about = "Park hard disk heads while the accelerometer reports free fall")]
#[command(version)]
#[command(long_about = "
freefalld reads free-fall events from the accelerometer device and parks the
heads of the protected disk for the protect window on every event. Events
inside the grace window renew the park; otherwise it lapses on its own.

Exit status: 0 on SIGINT/SIGTERM, 1 if the actuator or event source fails at
runtime, 2 on a configuration error, 3 if the event source is busy or missing.
")]
pub struct Cli {
    /// Block device to protect
    #[arg(env = "FREEFALLD_DEVICE", default_value = DEFAULT_DEVICE)]
    pub device: String,

    /// Free-fall event device
    #[arg(long, env = "FREEFALLD_EVENT_SOURCE", default_value = DEFAULT_EVENT_SOURCE)]
    pub event_source: PathBuf,

    /// Seconds to park the heads per event
    #[arg(long, env = "FREEFALLD_PROTECT_SECS", default_value_t = 21)]
    pub protect_secs: u32,

    /// Seconds to wait for a further event before letting the park lapse
    #[arg(long, env = "FREEFALLD_GRACE_SECS", default_value_t = 2)]
    pub grace_secs: u32,

    /// Skip SCHED_FIFO and memory locking
    #[arg(long, env = "FREEFALLD_NO_REALTIME")]
    pub no_realtime: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Sysfs mount point (for testing)
    #[arg(long, env = "FREEFALLD_SYSFS_ROOT", default_value = DEFAULT_SYSFS_ROOT, hide = true)]
    pub sysfs_root: PathBuf,
}
