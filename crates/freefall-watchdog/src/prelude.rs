//! Prelude for freefall-watchdog.

pub use crate::config::WatchdogConfig;
pub use crate::error::{ErrorCategory, WatchdogError, WatchdogResult};
pub use crate::shutdown::ShutdownSignal;
pub use crate::state::{GuardState, MetricsSnapshot};
pub use crate::watchdog::{FreefallWatchdog, StepOutcome};
