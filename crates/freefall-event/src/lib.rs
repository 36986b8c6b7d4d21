//! # freefall-event
//!
//! Interrupt-safe free-fall event counting with a single-consumer blocking
//! read interface.
//!
//! ## Architecture
//!
//! - [`counter`] - Atomic event counter and the clamped [`DrainedCount`]
//! - [`channel`] - Exclusive-open channel with blocking and non-blocking reads
//! - [`device`] - Bridge from the kernel free-fall device into a channel
//! - [`error`] - Channel and read error types
//!
//! ## Guarantees
//!
//! - **No lost events**: every increment is observed by exactly one drain
//! - **No lost wakeups**: an event racing a reader's park still wakes it
//! - **Exclusivity**: a second `open` fails with [`ChannelError::Busy`]
//! - **Allocation-free producer**: [`EventProducer::on_hardware_event`] is one
//!   atomic increment plus an unpark
//!
//! ## Example
//!
//! ```rust
//! use freefall_event::prelude::*;
//! use std::thread;
//!
//! let channel = EventChannel::new();
//! let producer = channel.producer();
//! let mut handle = channel.open().expect("channel is free");
//!
//! let irq = thread::spawn(move || producer.on_hardware_event());
//! let count = handle.read(ReadMode::Blocking).expect("event arrives");
//! assert_eq!(count.get(), 1);
//! irq.join().expect("producer thread");
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

pub mod channel;
pub mod counter;
pub mod device;
pub mod error;

pub mod prelude;

pub use channel::{EventChannel, EventHandle, EventProducer, ReadInterrupter, ReadMode};
pub use counter::{DrainedCount, EventCounter};
pub use device::{DEFAULT_EVENT_SOURCE, DeviceEventSource};
pub use error::{ChannelError, ReadError, ReadResult};
