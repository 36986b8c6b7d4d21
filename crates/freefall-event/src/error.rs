//! Error types for the event channel.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when acquiring the event channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Another consumer already holds the channel.
    #[error("Event channel is busy: another consumer holds it")]
    Busy,

    /// The event source device could not be opened.
    #[error("Event source {} unavailable: {source}", path.display())]
    SourceUnavailable {
        /// Device path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ChannelError {
    /// Create a source unavailable error.
    #[must_use]
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Outcomes of a read that produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Non-blocking read found no pending events.
    #[error("No events pending")]
    WouldBlock,

    /// Blocking read was cancelled before any event arrived.
    #[error("Read interrupted before events arrived")]
    Interrupted,

    /// The producer side is gone and no events remain.
    #[error("Event source lost: {0}")]
    SourceLost(String),
}

impl ReadError {
    /// Whether this outcome only means "no new data yet".
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::WouldBlock | Self::Interrupted)
    }
}

/// A specialized `Result` type for channel reads.
pub type ReadResult<T> = std::result::Result<T, ReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ReadError::WouldBlock.is_transient());
        assert!(ReadError::Interrupted.is_transient());
        assert!(!ReadError::SourceLost("eof".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = ChannelError::source_unavailable(
            "/dev/freefall",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("/dev/freefall"));
        assert!(ChannelError::Busy.to_string().contains("busy"));
    }
}
