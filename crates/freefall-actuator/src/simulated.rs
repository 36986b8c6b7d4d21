//! In-memory actuator for tests and dry runs.
//!
//! Clones share one log, so a test can hand one clone to the watchdog and
//! inspect the other.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::actuator::ProtectiveActuator;
use crate::error::{ActuatorError, ActuatorResult};
use crate::state::{EngagementState, EngagementTracker, Transition, duration_to_ms};

/// One engage request as seen by the simulated actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCall {
    /// Requested duration.
    pub duration: Duration,
    /// When the request was made.
    pub at: Instant,
    /// Whether the request succeeded.
    pub succeeded: bool,
}

/// A state change recorded by the simulated actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    /// What happened.
    pub transition: Transition,
    /// When it happened.
    pub at: Instant,
}

#[derive(Debug)]
struct SimState {
    tracker: EngagementTracker,
    calls: Vec<ActuatorCall>,
    transitions: Vec<TransitionRecord>,
    failing: bool,
    fail_after: Option<usize>,
}

/// Simulated protective actuator with fault injection.
#[derive(Debug, Clone)]
pub struct SimulatedActuator {
    resource: Arc<str>,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedActuator {
    /// Create a simulated actuator for `resource`.
    #[must_use]
    pub fn new(resource: &str) -> Self {
        Self {
            resource: Arc::from(resource),
            state: Arc::new(Mutex::new(SimState {
                tracker: EngagementTracker::new(resource),
                calls: Vec::new(),
                transitions: Vec::new(),
                failing: false,
                fail_after: None,
            })),
        }
    }

    /// Make every call after the first `successes` calls fail.
    pub fn fail_after(&self, successes: usize) {
        self.state.lock().fail_after = Some(successes);
    }

    /// Make every subsequent call fail, or stop failing.
    pub fn set_failing(&self, failing: bool) {
        let mut state = self.state.lock();
        state.failing = failing;
        if !failing {
            state.fail_after = None;
        }
    }

    /// All engage requests so far, including failed ones.
    #[must_use]
    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.state.lock().calls.clone()
    }

    /// All recorded state changes and renewals.
    #[must_use]
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.state.lock().transitions.clone()
    }

    /// Count of recorded transitions of a given kind.
    #[must_use]
    pub fn count(&self, kind: Transition) -> usize {
        self.state
            .lock()
            .transitions
            .iter()
            .filter(|record| record.transition == kind)
            .count()
    }
}

impl ProtectiveActuator for SimulatedActuator {
    fn engage(&mut self, duration: Duration) -> ActuatorResult<Transition> {
        let now = Instant::now();
        let mut state = self.state.lock();

        let exhausted = state
            .fail_after
            .is_some_and(|limit| state.calls.iter().filter(|c| c.succeeded).count() >= limit);
        if state.failing || exhausted {
            state.calls.push(ActuatorCall {
                duration,
                at: now,
                succeeded: false,
            });
            return Err(ActuatorError::write_failed(
                format!("simulated:{}", self.resource),
                duration_to_ms(duration),
                std::io::Error::other("injected actuator failure"),
            ));
        }

        state.calls.push(ActuatorCall {
            duration,
            at: now,
            succeeded: true,
        });
        let transition = state.tracker.record(duration, now);
        state.transitions.push(TransitionRecord {
            transition,
            at: now,
        });
        Ok(transition)
    }

    fn state_at(&self, now: Instant) -> EngagementState {
        self.state.lock().tracker.state_at(now)
    }

    fn resource(&self) -> &str {
        &self.resource
    }
}
