//! Sysfs head-unload actuator.
//!
//! The kernel's `unload_heads` attribute accepts a park duration in
//! milliseconds as ASCII decimal. Writing a new value replaces the previous
//! one; writing `0` unparks immediately. The kernel releases the heads on its
//! own when the duration runs out.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::actuator::ProtectiveActuator;
use crate::disk::ProtectedDisk;
use crate::error::{ActuatorError, ActuatorResult};
use crate::state::{EngagementState, EngagementTracker, Transition, duration_to_ms};

/// Actuator writing to `/sys/block/<dev>/device/unload_heads`.
#[derive(Debug)]
pub struct UnloadHeadsActuator {
    disk: ProtectedDisk,
    tracker: EngagementTracker,
}

impl UnloadHeadsActuator {
    /// Create an actuator for a probed disk.
    #[must_use]
    pub fn new(disk: ProtectedDisk) -> Self {
        let tracker = EngagementTracker::new(disk.device());
        Self { disk, tracker }
    }

    /// The disk being protected.
    #[must_use]
    pub fn disk(&self) -> &ProtectedDisk {
        &self.disk
    }

    fn write_ms(&self, value_ms: u64) -> ActuatorResult<()> {
        let path = self.disk.control_path();
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|err| ActuatorError::write_failed(path, value_ms, err))?;
        file.write_all(value_ms.to_string().as_bytes())
            .map_err(|err| ActuatorError::write_failed(path, value_ms, err))
    }
}

impl ProtectiveActuator for UnloadHeadsActuator {
    fn engage(&mut self, duration: Duration) -> ActuatorResult<Transition> {
        self.write_ms(duration_to_ms(duration))?;
        Ok(self.tracker.record(duration, Instant::now()))
    }

    fn state_at(&self, now: Instant) -> EngagementState {
        self.tracker.state_at(now)
    }

    fn resource(&self) -> &str {
        self.tracker.resource()
    }
}
