//! Prelude for freefall-actuator.

pub use crate::actuator::ProtectiveActuator;
pub use crate::disk::ProtectedDisk;
pub use crate::error::{ActuatorError, ActuatorResult};
pub use crate::simulated::SimulatedActuator;
pub use crate::state::{EngagementState, Transition};
pub use crate::unload_heads::UnloadHeadsActuator;
