//! Interrupt-safe free-fall event counter.
//!
//! [`EventCounter`] is the only state shared between the interrupt path and
//! the consumer. The producer adds with a single `fetch_add`, the consumer
//! drains with a single `swap(0)`, so an increment is either part of the value
//! a drain observes or remains in the counter for the next drain. It is never
//! lost and never counted twice.
//!
//! # RT Safety
//!
//! All methods are RT-safe:
//! - Single atomic instruction per call
//! - No heap allocation
//! - No blocking
//! - No syscalls

use core::num::NonZeroU8;
use core::sync::atomic::{AtomicU64, Ordering};

/// Atomic count of free-fall events since the last drain.
///
/// # Example
///
/// ```rust
/// use freefall_event::EventCounter;
///
/// let counter = EventCounter::new();
/// counter.increment();
/// counter.increment();
/// assert_eq!(counter.drain(), 2);
/// assert_eq!(counter.drain(), 0);
/// ```
#[derive(Debug, Default)]
pub struct EventCounter {
    pending: AtomicU64,
}

impl EventCounter {
    /// Create a counter with no pending events.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: AtomicU64::new(0),
        }
    }

    /// Count one event.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Single atomic fetch-add instruction.
    #[inline]
    pub fn increment(&self) {
        self.pending.fetch_add(1, Ordering::AcqRel);
    }

    /// Take every pending event, leaving zero behind.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Single atomic swap instruction.
    #[inline]
    #[must_use = "drained events are lost unless the count is used"]
    pub fn drain(&self) -> u64 {
        self.pending.swap(0, Ordering::AcqRel)
    }

    /// Discard every pending event.
    #[inline]
    pub fn reset(&self) {
        self.pending.store(0, Ordering::Release);
    }

    /// Read the pending count without draining it.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.pending.load(Ordering::Acquire)
    }
}

/// Event count returned by a successful read.
///
/// Always in `1..=255`: a raw drain of zero is not data, and anything above
/// 255 is clamped to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrainedCount(NonZeroU8);

impl DrainedCount {
    /// The largest count a single read can report.
    pub const MAX: Self = Self(NonZeroU8::MAX);

    /// Convert a raw drained value, clamping to one byte.
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        let clamped = u8::try_from(raw).unwrap_or(u8::MAX);
        NonZeroU8::new(clamped).map(Self)
    }

    /// The count as a byte.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<DrainedCount> for u8 {
    fn from(count: DrainedCount) -> Self {
        count.get()
    }
}

impl core::fmt::Display for DrainedCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_resets_to_zero() {
        let counter = EventCounter::new();
        counter.increment();
        counter.increment();
        counter.increment();

        assert_eq!(counter.pending(), 3);
        assert_eq!(counter.drain(), 3);
        assert_eq!(counter.pending(), 0);
        assert_eq!(counter.drain(), 0);
    }

    #[test]
    fn test_reset_discards_pending() {
        let counter = EventCounter::new();
        counter.increment();
        counter.reset();
        assert_eq!(counter.drain(), 0);
    }

    #[test]
    fn test_zero_is_not_a_count() {
        assert_eq!(DrainedCount::from_raw(0), None);
    }

    #[test]
    fn test_counts_in_range_are_exact() {
        for raw in 1..=254u64 {
            let count = DrainedCount::from_raw(raw).map(DrainedCount::get);
            assert_eq!(count.map(u64::from), Some(raw));
        }
    }

    #[test]
    fn test_large_counts_clamp_to_byte() {
        assert_eq!(DrainedCount::from_raw(255), Some(DrainedCount::MAX));
        assert_eq!(DrainedCount::from_raw(256), Some(DrainedCount::MAX));
        assert_eq!(DrainedCount::from_raw(u64::MAX), Some(DrainedCount::MAX));
        assert_eq!(DrainedCount::MAX.get(), 255);
    }
}
