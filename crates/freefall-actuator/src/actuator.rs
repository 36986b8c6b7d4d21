//! Protective actuator trait definition.

use std::time::{Duration, Instant};

use crate::error::ActuatorResult;
use crate::state::{EngagementState, Transition};

/// The protective action applied to the guarded resource.
///
/// Implementations park the disk heads for a requested duration. The
/// hardware releases them on its own once that duration lapses; the caller
/// renews by engaging again.
///
/// # Semantics
///
/// - `engage(d)` is last-write-wins: it replaces any earlier request, it
///   does not add to it.
/// - `engage(Duration::ZERO)` disengages immediately.
/// - Every call that changes [`EngagementState`] emits one audit record.
///
/// # Implementation Requirements
///
/// 1. A failed write MUST be reported, never retried internally.
/// 2. `state()` MUST report [`EngagementState::Disengaged`] once the last
///    requested duration has elapsed.
pub trait ProtectiveActuator: Send {
    /// Request protection for `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying control path cannot be written.
    fn engage(&mut self, duration: Duration) -> ActuatorResult<Transition>;

    /// Release protection immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying control path cannot be written.
    fn disengage(&mut self) -> ActuatorResult<Transition> {
        self.engage(Duration::ZERO)
    }

    /// The engagement state at `now`.
    fn state_at(&self, now: Instant) -> EngagementState;

    /// The current engagement state.
    fn state(&self) -> EngagementState {
        self.state_at(Instant::now())
    }

    /// Check if protection is currently engaged.
    fn is_engaged(&self) -> bool {
        self.state().is_engaged()
    }

    /// Name of the protected resource, for logging.
    fn resource(&self) -> &str;
}
