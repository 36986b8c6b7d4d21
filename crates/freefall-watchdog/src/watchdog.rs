//! The watchdog loop.
//!
//! # State Machine
//!
//! ```text
//!          event: engage(protect), arm grace
//!   Idle ─────────────────────────────────► Guarding
//!    ▲                                         │  │
//!    │   grace expired, no new event           │  │ event: engage(protect),
//!    └─────────────────────────────────────────┘  │ re-arm grace
//!                                                 ▼
//!                                              Guarding
//! ```
//!
//! Grace expiry does not disengage. The last `engage(protect)` lapses on its
//! own; the grace timer only forces the loop out of the blocking read so it
//! stops renewing.

use std::sync::Arc;
use std::time::Instant;

use freefall_actuator::ProtectiveActuator;
use freefall_event::{DrainedCount, EventHandle, ReadError, ReadMode};
use tracing::{debug, error, info, trace, warn};

use crate::config::WatchdogConfig;
use crate::error::{WatchdogError, WatchdogResult};
use crate::shutdown::ShutdownSignal;
use crate::state::{GuardState, WatchdogMetrics};
use crate::timer::GraceTimer;

/// Result of a single [`FreefallWatchdog::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Events drained while idle; protection engaged.
    Engaged(DrainedCount),
    /// Events drained while guarding; protection renewed.
    Renewed(DrainedCount),
    /// Grace window ran out with no new event; back to idle.
    GraceExpired,
    /// Woken without data and without a reason to change state.
    Spurious,
    /// Shutdown was requested.
    ShutdownRequested,
}

/// Consumes free-fall events and drives a [`ProtectiveActuator`].
#[derive(Debug)]
pub struct FreefallWatchdog<A: ProtectiveActuator> {
    config: WatchdogConfig,
    actuator: A,
    state: GuardState,
    timer: GraceTimer,
    shutdown: ShutdownSignal,
    metrics: Arc<WatchdogMetrics>,
}

impl<A: ProtectiveActuator> FreefallWatchdog<A> {
    /// Create a watchdog in the idle state.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: WatchdogConfig, actuator: A, shutdown: ShutdownSignal) -> WatchdogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            actuator,
            state: GuardState::Idle,
            timer: GraceTimer::new(),
            shutdown,
            metrics: Arc::new(WatchdogMetrics::new()),
        })
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// The grace timer.
    #[must_use]
    pub fn timer(&self) -> &GraceTimer {
        &self.timer
    }

    /// The actuator being driven.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// The timing configuration.
    #[must_use]
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// Shared metrics, readable while the loop runs.
    #[must_use]
    pub fn metrics(&self) -> Arc<WatchdogMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Consume the watchdog, returning the actuator.
    #[must_use]
    pub fn into_actuator(self) -> A {
        self.actuator
    }

    /// Run until shutdown is requested or a fatal error occurs.
    ///
    /// On shutdown the actuator is disengaged before the channel is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator cannot be written or the event
    /// source is lost. A best-effort disengage has already been attempted.
    pub fn run(&mut self, mut handle: EventHandle) -> WatchdogResult<()> {
        info!(
            resource = self.actuator.resource(),
            protect_ms = self.config.protect_ms,
            grace_ms = self.config.grace_ms,
            "Watchdog started"
        );

        loop {
            if self.step(&mut handle)? == StepOutcome::ShutdownRequested {
                break;
            }
        }

        self.shutdown_cleanly()?;
        handle.close();
        Ok(())
    }

    /// Perform one blocking read and the resulting transition.
    ///
    /// While guarding, the read is bounded by the grace deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the actuator cannot be written or the event
    /// source is lost. A best-effort disengage has already been attempted.
    pub fn step(&mut self, handle: &mut EventHandle) -> WatchdogResult<StepOutcome> {
        if self.shutdown.is_requested() {
            return Ok(StepOutcome::ShutdownRequested);
        }

        let mode = match self.timer.deadline() {
            Some(deadline) => ReadMode::BlockingUntil(deadline),
            None => ReadMode::Blocking,
        };

        match handle.read(mode) {
            Ok(count) => self.on_events(count),
            Err(ReadError::Interrupted | ReadError::WouldBlock) => Ok(self.on_wakeup()),
            Err(ReadError::SourceLost(reason)) => Err(self.fail(WatchdogError::source_lost(reason))),
        }
    }

    fn on_events(&mut self, count: DrainedCount) -> WatchdogResult<StepOutcome> {
        self.metrics.record_drain(count.get());
        self.timer.cancel();

        if let Err(err) = self.actuator.engage(self.config.protect()) {
            return Err(self.fail(err.into()));
        }
        self.timer.arm(Instant::now(), self.config.grace());

        let outcome = if self.state.is_guarding() {
            self.metrics.record_renewal();
            StepOutcome::Renewed(count)
        } else {
            self.metrics.record_engagement();
            StepOutcome::Engaged(count)
        };
        self.state = GuardState::Guarding;
        debug!(count = count.get(), ?outcome, "Free-fall events drained");
        Ok(outcome)
    }

    fn on_wakeup(&mut self) -> StepOutcome {
        if self.shutdown.is_requested() {
            return StepOutcome::ShutdownRequested;
        }

        if self.timer.expired(Instant::now()) {
            self.timer.cancel();
            self.state = GuardState::Idle;
            self.metrics.record_grace_expiry();
            debug!(
                resource = self.actuator.resource(),
                "Grace window elapsed, protection left to lapse"
            );
            return StepOutcome::GraceExpired;
        }

        trace!("Spurious wakeup");
        StepOutcome::Spurious
    }

    /// Best-effort disengage, then hand the error back.
    fn fail(&mut self, err: WatchdogError) -> WatchdogError {
        error!(
            resource = self.actuator.resource(),
            state = %self.state,
            category = %err.category(),
            error = %err,
            "Watchdog fatal error"
        );

        // A failed write may still have reached the hardware.
        let state_unknown = matches!(err, WatchdogError::Actuator(_));
        if state_unknown || self.state.is_guarding() || self.actuator.is_engaged() {
            if let Err(disengage_err) = self.actuator.disengage() {
                error!(
                    resource = self.actuator.resource(),
                    error = %disengage_err,
                    "Forced disengage failed"
                );
            }
        }

        self.timer.cancel();
        self.state = GuardState::Idle;
        err
    }

    fn shutdown_cleanly(&mut self) -> WatchdogResult<()> {
        self.timer.cancel();
        self.state = GuardState::Idle;

        if let Err(err) = self.actuator.disengage() {
            warn!(
                resource = self.actuator.resource(),
                error = %err,
                "Disengage on shutdown failed"
            );
            return Err(err.into());
        }

        let metrics = self.metrics.snapshot();
        info!(
            resource = self.actuator.resource(),
            events_drained = metrics.events_drained,
            engagements = metrics.engagements,
            renewals = metrics.renewals,
            grace_expiries = metrics.grace_expiries,
            max_drain = metrics.max_drain,
            "Watchdog stopped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freefall_actuator::{SimulatedActuator, Transition};
    use freefall_event::EventChannel;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn fast_config() -> WatchdogResult<WatchdogConfig> {
        WatchdogConfig::builder().protect_ms(400).grace_ms(50).build()
    }

    #[test]
    fn test_starts_idle_without_engaging() -> TestResult {
        let channel = EventChannel::new();
        let handle = channel.open()?;
        let actuator = SimulatedActuator::new("/dev/sim");
        let watchdog =
            FreefallWatchdog::new(fast_config()?, actuator.clone(), ShutdownSignal::new(handle.interrupter()))?;

        assert_eq!(watchdog.state(), GuardState::Idle);
        assert!(!watchdog.timer().is_armed());
        assert!(actuator.calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_config() -> TestResult {
        let channel = EventChannel::new();
        let handle = channel.open()?;
        let config = WatchdogConfig {
            protect_ms: 100,
            grace_ms: 100,
        };
        let result = FreefallWatchdog::new(
            config,
            SimulatedActuator::new("/dev/sim"),
            ShutdownSignal::new(handle.interrupter()),
        );
        assert!(matches!(result, Err(WatchdogError::InvalidConfiguration(_))));
        Ok(())
    }

    #[test]
    fn test_event_engages_and_arms_timer() -> TestResult {
        let channel = EventChannel::new();
        let producer = channel.producer();
        let mut handle = channel.open()?;
        let actuator = SimulatedActuator::new("/dev/sim");
        let mut watchdog =
            FreefallWatchdog::new(fast_config()?, actuator.clone(), ShutdownSignal::new(handle.interrupter()))?;

        producer.on_hardware_event();
        producer.on_hardware_event();
        let outcome = watchdog.step(&mut handle)?;

        assert!(matches!(outcome, StepOutcome::Engaged(count) if count.get() == 2));
        assert_eq!(watchdog.state(), GuardState::Guarding);
        assert!(watchdog.timer().is_armed());
        assert_eq!(actuator.count(Transition::Parked), 1);
        assert_eq!(watchdog.metrics().snapshot().events_drained, 2);
        Ok(())
    }

    #[test]
    fn test_grace_expiry_returns_to_idle_without_disengage() -> TestResult {
        let channel = EventChannel::new();
        let producer = channel.producer();
        let mut handle = channel.open()?;
        let actuator = SimulatedActuator::new("/dev/sim");
        let mut watchdog =
            FreefallWatchdog::new(fast_config()?, actuator.clone(), ShutdownSignal::new(handle.interrupter()))?;

        producer.on_hardware_event();
        watchdog.step(&mut handle)?;

        let mut outcome = watchdog.step(&mut handle)?;
        while outcome == StepOutcome::Spurious {
            outcome = watchdog.step(&mut handle)?;
        }

        assert_eq!(outcome, StepOutcome::GraceExpired);
        assert_eq!(watchdog.state(), GuardState::Idle);
        assert_eq!(actuator.count(Transition::Unparked), 0);
        assert_eq!(actuator.calls().len(), 1);
        assert!(actuator.is_engaged());
        Ok(())
    }

    #[test]
    fn test_shutdown_requested_before_step() -> TestResult {
        let channel = EventChannel::new();
        let mut handle = channel.open()?;
        let signal = ShutdownSignal::new(handle.interrupter());
        let mut watchdog =
            FreefallWatchdog::new(fast_config()?, SimulatedActuator::new("/dev/sim"), signal.clone())?;

        signal.request();
        assert_eq!(watchdog.step(&mut handle)?, StepOutcome::ShutdownRequested);
        Ok(())
    }
}
