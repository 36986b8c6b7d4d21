//! Guard state and watchdog metrics.

use core::sync::atomic::{AtomicU64, Ordering};

/// Watchdog loop state.
///
/// ```text
/// Idle ──event──► Guarding ──event──► Guarding (renew)
///  ▲                  │
///  └──grace expired───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// No protection requested, no timer armed.
    #[default]
    Idle,
    /// Protection engaged, grace timer armed.
    Guarding,
}

impl GuardState {
    /// Check if the loop is guarding.
    #[must_use]
    pub fn is_guarding(self) -> bool {
        matches!(self, Self::Guarding)
    }

    /// Get the state as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Guarding => "Guarding",
        }
    }
}

impl core::fmt::Display for GuardState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot returned by [`WatchdogMetrics::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Sum of all drained counts.
    pub events_drained: u64,
    /// Idle to Guarding transitions.
    pub engagements: u64,
    /// Renewals while already guarding.
    pub renewals: u64,
    /// Grace windows that ran out without a new event.
    pub grace_expiries: u64,
    /// Largest single drained count.
    pub max_drain: u64,
}

/// Watchdog counters.
///
/// Written by the loop, readable from any thread.
///
/// # RT Safety
///
/// Every `record_*` method is a single relaxed atomic operation.
#[derive(Debug, Default)]
pub struct WatchdogMetrics {
    events_drained: AtomicU64,
    engagements: AtomicU64,
    renewals: AtomicU64,
    grace_expiries: AtomicU64,
    max_drain: AtomicU64,
}

impl WatchdogMetrics {
    /// Create zeroed metrics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events_drained: AtomicU64::new(0),
            engagements: AtomicU64::new(0),
            renewals: AtomicU64::new(0),
            grace_expiries: AtomicU64::new(0),
            max_drain: AtomicU64::new(0),
        }
    }

    /// Record one drain of `count` events.
    #[inline]
    pub fn record_drain(&self, count: u8) {
        let count = u64::from(count);
        self.events_drained.fetch_add(count, Ordering::Relaxed);
        self.max_drain.fetch_max(count, Ordering::Relaxed);
    }

    /// Record an Idle to Guarding transition.
    #[inline]
    pub fn record_engagement(&self) {
        self.engagements.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a renewal.
    #[inline]
    pub fn record_renewal(&self) {
        self.renewals.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a grace expiry.
    #[inline]
    pub fn record_grace_expiry(&self) {
        self.grace_expiries.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_drained: self.events_drained.load(Ordering::Relaxed),
            engagements: self.engagements.load(Ordering::Relaxed),
            renewals: self.renewals.load(Ordering::Relaxed),
            grace_expiries: self.grace_expiries.load(Ordering::Relaxed),
            max_drain: self.max_drain.load(Ordering::Relaxed),
        }
    }
}
