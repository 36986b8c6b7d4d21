//! Error types for real-time setup.

use thiserror::Error;

/// Errors from applying real-time settings.
#[derive(Debug, Error)]
pub enum RtSetupError {
    /// Switching to `SCHED_FIFO` failed, usually for lack of `CAP_SYS_NICE`.
    #[error("Failed to set SCHED_FIFO priority: {0}")]
    Priority(#[source] std::io::Error),

    /// Locking memory failed, usually for lack of `CAP_IPC_LOCK`.
    #[error("Failed to lock memory: {0}")]
    MemoryLock(#[source] std::io::Error),

    /// Real-time setup is not implemented for this platform.
    #[error("Real-time setup is not supported on this platform")]
    Unsupported,
}

/// A specialized `Result` type for real-time setup.
pub type RtResult<T = ()> = Result<T, RtSetupError>;
