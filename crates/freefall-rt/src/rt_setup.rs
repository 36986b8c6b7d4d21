//! Real-time setup configuration.

use tracing::{debug, warn};

use crate::error::RtResult;

#[cfg(not(target_os = "linux"))]
use crate::fallback as platform;
#[cfg(target_os = "linux")]
use crate::linux as platform;

/// Real-time setup configuration.
///
/// Applied once at startup, before the watchdog loop starts, so that the
/// event-to-park latency is not subject to paging or lower-priority work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RTSetup {
    /// Enable high-priority scheduling.
    ///
    /// On Linux: moves the process to `SCHED_FIFO` at the maximum priority.
    pub high_priority: bool,

    /// Enable memory locking (prevent swapping).
    ///
    /// Locks all current and future memory pages.
    pub lock_memory: bool,
}

impl Default for RTSetup {
    fn default() -> Self {
        Self {
            high_priority: true,
            lock_memory: true,
        }
    }
}

impl RTSetup {
    /// Create a new `RTSetup` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a minimal `RTSetup` (no special configuration).
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            high_priority: false,
            lock_memory: false,
        }
    }

    /// Set high priority.
    #[must_use]
    pub fn with_high_priority(mut self, enabled: bool) -> Self {
        self.high_priority = enabled;
        self
    }

    /// Set memory locking.
    #[must_use]
    pub fn with_lock_memory(mut self, enabled: bool) -> Self {
        self.lock_memory = enabled;
        self
    }

    /// Check if any RT features are enabled.
    #[must_use]
    pub fn has_rt_features(&self) -> bool {
        self.high_priority || self.lock_memory
    }

    /// Apply the enabled settings to the calling process.
    ///
    /// Every enabled step is attempted even if an earlier one failed.
    ///
    /// # Errors
    ///
    /// Returns the first failure. On platforms other than Linux, any enabled
    /// step returns [`RtSetupError::Unsupported`](crate::RtSetupError::Unsupported).
    pub fn apply(&self) -> RtResult<()> {
        let mut first_err = None;

        if self.high_priority {
            match platform::set_fifo_max_priority() {
                Ok(priority) => debug!(priority, "SCHED_FIFO priority set"),
                Err(err) => {
                    warn!(error = %err, "High-priority scheduling unavailable");
                    first_err.get_or_insert(err);
                }
            }
        }

        if self.lock_memory {
            match platform::lock_all_memory() {
                Ok(()) => debug!("Memory locked"),
                Err(err) => {
                    warn!(error = %err, "Memory locking unavailable");
                    first_err.get_or_insert(err);
                }
            }
        }

        first_err.map_or(Ok(()), Err)
    }
}
