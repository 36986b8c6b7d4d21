//! # freefall-watchdog
//!
//! The real-time consumer of free-fall events. Each drained event parks the
//! disk heads for the protect window and arms a shorter grace timer; events
//! inside the grace window renew the park without an unpark in between.
//! When the grace timer runs out the loop goes idle and lets the last park
//! lapse on its own.
//!
//! ## Architecture
//!
//! - [`watchdog`] - [`FreefallWatchdog`] loop and [`StepOutcome`]
//! - [`config`] - Protect and grace timings
//! - [`timer`] - Single-deadline [`GraceTimer`]
//! - [`state`] - [`GuardState`] and [`WatchdogMetrics`]
//! - [`shutdown`] - Cooperative [`ShutdownSignal`]
//! - [`error`] - [`WatchdogError`] and its [`ErrorCategory`] exit codes
//!
//! ## Example
//!
//! ```rust
//! use freefall_actuator::SimulatedActuator;
//! use freefall_event::EventChannel;
//! use freefall_watchdog::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let channel = EventChannel::new();
//! let producer = channel.producer();
//! let mut handle = channel.open()?;
//!
//! let config = WatchdogConfig::builder().protect_ms(500).grace_ms(50).build()?;
//! let shutdown = ShutdownSignal::new(handle.interrupter());
//! let mut watchdog = FreefallWatchdog::new(config, SimulatedActuator::new("/dev/sda"), shutdown)?;
//!
//! producer.on_hardware_event();
//! assert!(matches!(watchdog.step(&mut handle)?, StepOutcome::Engaged(_)));
//! assert_eq!(watchdog.state(), GuardState::Guarding);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod shutdown;
pub mod state;
pub mod timer;
pub mod watchdog;

pub mod prelude;

pub use config::{MAX_PROTECT_MS, WatchdogConfig, WatchdogConfigBuilder};
pub use error::{ErrorCategory, WatchdogError, WatchdogResult};
pub use shutdown::ShutdownSignal;
pub use state::{GuardState, MetricsSnapshot, WatchdogMetrics};
pub use timer::GraceTimer;
pub use watchdog::{FreefallWatchdog, StepOutcome};
