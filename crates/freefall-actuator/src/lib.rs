//! # freefall-actuator
//!
//! Disk head parking for free-fall protection.
//!
//! The [`ProtectiveActuator`] trait models a timed protective action with
//! last-write-wins renewal. [`UnloadHeadsActuator`] drives the kernel's
//! `unload_heads` sysfs attribute; [`SimulatedActuator`] records calls in
//! memory and supports fault injection.
//!
//! ## Example
//!
//! ```rust
//! use freefall_actuator::prelude::*;
//! use std::time::Duration;
//!
//! let mut actuator = SimulatedActuator::new("/dev/sda");
//! assert_eq!(actuator.engage(Duration::from_secs(21)).ok(), Some(Transition::Parked));
//! assert_eq!(actuator.engage(Duration::from_secs(21)).ok(), Some(Transition::Renewed));
//! assert_eq!(actuator.disengage().ok(), Some(Transition::Unparked));
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod actuator;
pub mod disk;
pub mod error;
pub mod simulated;
pub mod state;
pub mod unload_heads;

pub mod prelude;

pub use actuator::ProtectiveActuator;
pub use disk::{DEFAULT_DEVICE, DEFAULT_SYSFS_ROOT, ProtectedDisk};
pub use error::{ActuatorError, ActuatorResult};
pub use simulated::{ActuatorCall, SimulatedActuator, TransitionRecord};
pub use state::{EngagementState, EngagementTracker, Transition, duration_to_ms};
pub use unload_heads::UnloadHeadsActuator;
