//! Single-deadline grace timer.
//!
//! The timer never fires on its own. The loop hands its deadline to the
//! blocking read, which returns `Interrupted` once the deadline passes.

use std::time::{Duration, Instant};

/// At most one pending deadline. Arming replaces, it does not stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraceTimer {
    deadline: Option<Instant>,
}

impl GraceTimer {
    /// Create a disarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm for `grace` from `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant, grace: Duration) {
        self.deadline = Some(now.checked_add(grace).unwrap_or(now));
    }

    /// Drop the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// The pending deadline, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check if a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check if the pending deadline has passed at `now`.
    #[must_use]
    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_disarmed() {
        let timer = GraceTimer::new();
        assert!(!timer.is_armed());
        assert!(!timer.expired(Instant::now()));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut timer = GraceTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_secs(2));
        timer.arm(t0 + Duration::from_secs(1), Duration::from_secs(2));

        assert_eq!(timer.deadline(), Some(t0 + Duration::from_secs(3)));
        assert!(!timer.expired(t0 + Duration::from_secs(2)));
        assert!(timer.expired(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = GraceTimer::new();
        let t0 = Instant::now();
        timer.arm(t0, Duration::from_millis(1));
        timer.cancel();
        assert!(!timer.expired(t0 + Duration::from_secs(1)));
        assert_eq!(timer.deadline(), None);
    }
}
