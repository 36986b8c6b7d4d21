//! Error types for the watchdog.
//!
//! Every failure maps onto an [`ErrorCategory`], which in turn decides the
//! process exit status.

use freefall_actuator::ActuatorError;
use freefall_event::ChannelError;
use thiserror::Error;

/// Errors that end the watchdog or prevent it from starting.
#[derive(Debug, Error)]
pub enum WatchdogError {
    /// Invalid timing configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The protective actuator could not be resolved or written.
    #[error(transparent)]
    Actuator(#[from] ActuatorError),

    /// The event channel could not be acquired.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The event source went away while the loop was running.
    #[error("Event source lost: {0}")]
    SourceLost(String),
}

/// Failure classes, each with its own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad device path, missing control path, invalid timing.
    Configuration,
    /// Another consumer holds the event source, or it cannot be opened.
    ChannelConflict,
    /// Writing the actuator failed at runtime.
    Actuator,
    /// The event source closed or failed at runtime.
    SourceLost,
}

impl ErrorCategory {
    /// Process exit status for this class of failure.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Actuator | Self::SourceLost => 1,
            Self::Configuration => 2,
            Self::ChannelConflict => 3,
        }
    }

    /// Get the category as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::ChannelConflict => "channel_conflict",
            Self::Actuator => "actuator",
            Self::SourceLost => "source_lost",
        }
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a source lost error.
    #[must_use]
    pub fn source_lost(reason: impl Into<String>) -> Self {
        Self::SourceLost(reason.into())
    }

    /// Classify the error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration(_) => ErrorCategory::Configuration,
            Self::Actuator(err) if err.is_configuration() => ErrorCategory::Configuration,
            Self::Actuator(_) => ErrorCategory::Actuator,
            Self::Channel(_) => ErrorCategory::ChannelConflict,
            Self::SourceLost(_) => ErrorCategory::SourceLost,
        }
    }

    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = std::result::Result<T, WatchdogError>;
