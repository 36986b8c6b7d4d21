//! Engagement state and transition tracking.
//!
//! The actuator only knows the last duration it was asked for. Whether the
//! heads are still parked is derived from that request and the clock: an
//! engagement that reached its deadline is reported as disengaged without
//! any further call.

use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Convert a duration to whole milliseconds, saturating at `u64::MAX`.
///
/// A nonzero duration never maps to `0`, which would mean unpark.
#[must_use]
pub fn duration_to_ms(duration: Duration) -> u64 {
    let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if ms == 0 && !duration.is_zero() { 1 } else { ms }
}

/// Whether protection is currently engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngagementState {
    /// Heads are free.
    #[default]
    Disengaged,
    /// Heads are parked until the deadline.
    Engaged {
        /// When the last requested duration lapses.
        until: Instant,
    },
}

impl EngagementState {
    /// Resolve the state at `now`, treating a lapsed deadline as disengaged.
    #[must_use]
    pub fn at(self, now: Instant) -> Self {
        match self {
            Self::Engaged { until } if until > now => self,
            _ => Self::Disengaged,
        }
    }

    /// Check if protection is engaged.
    #[must_use]
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::Engaged { .. })
    }

    /// Get the state as the audit label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disengaged => "unparked",
            Self::Engaged { .. } => "parked",
        }
    }
}

impl core::fmt::Display for EngagementState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an engage call did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Disengaged to engaged.
    Parked,
    /// Engaged, deadline replaced.
    Renewed,
    /// Engaged to disengaged.
    Unparked,
    /// Disengage requested while already disengaged.
    AlreadyClear,
}

impl Transition {
    /// Whether the call changed the engagement state.
    #[must_use]
    pub fn changes_state(self) -> bool {
        matches!(self, Self::Parked | Self::Unparked)
    }
}

/// Last-write-wins engagement bookkeeping shared by actuator implementations.
///
/// Emits one `info!` audit record per state change; renewals are `debug!`.
#[derive(Debug, Clone)]
pub struct EngagementTracker {
    resource: String,
    requested: EngagementState,
}

impl EngagementTracker {
    /// Create a tracker for `resource`, initially disengaged.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            requested: EngagementState::Disengaged,
        }
    }

    /// The protected resource name used in audit records.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The state at `now`.
    #[must_use]
    pub fn state_at(&self, now: Instant) -> EngagementState {
        self.requested.at(now)
    }

    /// Record a completed engage request of `duration` issued at `now`.
    ///
    /// A zero duration disengages.
    pub fn record(&mut self, duration: Duration, now: Instant) -> Transition {
        let was_engaged = self.state_at(now).is_engaged();

        if duration.is_zero() {
            self.requested = EngagementState::Disengaged;
            if was_engaged {
                info!(resource = %self.resource, state = "unparked", "Unparked disk head");
                return Transition::Unparked;
            }
            debug!(resource = %self.resource, "Disengage requested while already unparked");
            return Transition::AlreadyClear;
        }

        let until = now.checked_add(duration).unwrap_or(now);
        self.requested = EngagementState::Engaged { until };
        if was_engaged {
            debug!(
                resource = %self.resource,
                duration_ms = duration_to_ms(duration),
                "Renewed head park"
            );
            Transition::Renewed
        } else {
            info!(
                resource = %self.resource,
                state = "parked",
                duration_ms = duration_to_ms(duration),
                "Parked disk head"
            );
            Transition::Parked
        }
    }
}
