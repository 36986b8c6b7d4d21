//! Cooperative shutdown request.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use freefall_event::ReadInterrupter;

/// Asks a running watchdog to disengage and return.
///
/// Clones share the same flag. Safe to call from a signal-handling thread.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    interrupter: ReadInterrupter,
}

impl ShutdownSignal {
    /// Create a signal that interrupts reads through `interrupter`.
    #[must_use]
    pub fn new(interrupter: ReadInterrupter) -> Self {
        Self {
            requested: Arc::new(AtomicBool::new(false)),
            interrupter,
        }
    }

    /// Request shutdown and wake the blocked read.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
        self.interrupter.interrupt();
    }

    /// Check if shutdown was requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
