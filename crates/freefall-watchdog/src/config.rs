//! Configuration types for the free-fall watchdog.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};

/// Longest park the `unload_heads` attribute accepts, in milliseconds.
pub const MAX_PROTECT_MS: u32 = 30_000;

/// Watchdog timing configuration.
///
/// `protect_ms` is the duration requested from the actuator on every event.
/// `grace_ms` is how long the loop waits for a further event before it
/// stops renewing. Grace is strictly shorter than protect, so the heads stay
/// parked for the rest of the protect window after the grace timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Park duration in milliseconds.
    ///
    /// Default: 21000ms.
    pub protect_ms: u32,

    /// Grace window in milliseconds.
    ///
    /// Default: 2000ms.
    pub grace_ms: u32,
}

impl WatchdogConfig {
    /// Create a configuration with explicit timings.
    ///
    /// # Errors
    ///
    /// Returns an error if the timings fail [`WatchdogConfig::validate`].
    pub fn new(protect_ms: u32, grace_ms: u32) -> WatchdogResult<Self> {
        let config = Self {
            protect_ms,
            grace_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `protect_ms` is outside `1..=30000`, if
    /// `grace_ms` is zero, or if `grace_ms` is not below `protect_ms`.
    pub fn validate(&self) -> WatchdogResult<()> {
        if !(1..=MAX_PROTECT_MS).contains(&self.protect_ms) {
            return Err(WatchdogError::invalid_configuration(
                "protect_ms must be between 1 and 30000",
            ));
        }
        if self.grace_ms == 0 {
            return Err(WatchdogError::invalid_configuration(
                "grace_ms must be at least 1",
            ));
        }
        if self.grace_ms >= self.protect_ms {
            return Err(WatchdogError::invalid_configuration(
                "grace_ms must be shorter than protect_ms",
            ));
        }
        Ok(())
    }

    /// Get the protect window as a Duration.
    #[must_use]
    pub fn protect(&self) -> Duration {
        Duration::from_millis(u64::from(self.protect_ms))
    }

    /// Get the grace window as a Duration.
    #[must_use]
    pub fn grace(&self) -> Duration {
        Duration::from_millis(u64::from(self.grace_ms))
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            protect_ms: 21_000,
            grace_ms: 2_000,
        }
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the protect window in milliseconds.
    #[must_use]
    pub fn protect_ms(mut self, ms: u32) -> Self {
        self.config.protect_ms = ms;
        self
    }

    /// Set the grace window in milliseconds.
    #[must_use]
    pub fn grace_ms(mut self, ms: u32) -> Self {
        self.config.grace_ms = ms;
        self
    }

    /// Set the protect window in whole seconds, saturating.
    #[must_use]
    pub fn protect_secs(self, secs: u32) -> Self {
        self.protect_ms(secs.saturating_mul(1000))
    }

    /// Set the grace window in whole seconds, saturating.
    #[must_use]
    pub fn grace_secs(self, secs: u32) -> Self {
        self.grace_ms(secs.saturating_mul(1000))
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
