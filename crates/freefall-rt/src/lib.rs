//! # freefall-rt
//!
//! Real-time process setup for the free-fall watchdog: `SCHED_FIFO` at the
//! maximum priority and `mlockall(MCL_CURRENT | MCL_FUTURE)`.
//!
//! Failures are reported, not fatal. Without `CAP_SYS_NICE` or
//! `CAP_IPC_LOCK` the caller is expected to log and continue.
//!
//! ```rust
//! use freefall_rt::RTSetup;
//!
//! let setup = RTSetup::minimal().with_lock_memory(false);
//! assert!(setup.apply().is_ok());
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

pub mod error;
pub mod rt_setup;

#[cfg(not(target_os = "linux"))]
mod fallback;
#[cfg(target_os = "linux")]
mod linux;

pub use error::{RtResult, RtSetupError};
pub use rt_setup::RTSetup;
