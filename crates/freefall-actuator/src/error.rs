//! Error types for actuator operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or driving the actuator.
#[derive(Debug, Error)]
pub enum ActuatorError {
    /// The device path does not name a block device under `/dev/`.
    #[error("Invalid device path '{0}': expected /dev/<name>")]
    InvalidDevice(String),

    /// The head-unload control path does not exist or cannot be opened.
    #[error("Control path {} unavailable: {source}", path.display())]
    ControlPathMissing {
        /// Control path that was probed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the requested duration failed.
    #[error("Failed to write {} to {}: {source}", value_ms, path.display())]
    WriteFailed {
        /// Control path that was written.
        path: PathBuf,
        /// Requested duration in milliseconds.
        value_ms: u64,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ActuatorError {
    /// Create an invalid device error.
    #[must_use]
    pub fn invalid_device(device: impl Into<String>) -> Self {
        Self::InvalidDevice(device.into())
    }

    /// Create a control path missing error.
    #[must_use]
    pub fn control_path_missing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ControlPathMissing {
            path: path.into(),
            source,
        }
    }

    /// Create a write failed error.
    #[must_use]
    pub fn write_failed(path: impl Into<PathBuf>, value_ms: u64, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            value_ms,
            source,
        }
    }

    /// Whether the error is a startup configuration problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidDevice(_) | Self::ControlPathMissing { .. }
        )
    }
}

/// A specialized `Result` type for actuator operations.
pub type ActuatorResult<T> = std::result::Result<T, ActuatorError>;
