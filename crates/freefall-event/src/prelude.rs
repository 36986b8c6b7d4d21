//! Prelude for freefall-event.
//!
//! ```rust
//! use freefall_event::prelude::*;
//!
//! let channel = EventChannel::new();
//! let mut handle = channel.open().expect("channel is free");
//! assert_eq!(handle.read(ReadMode::NonBlocking), Err(ReadError::WouldBlock));
//! ```

pub use crate::channel::{EventChannel, EventHandle, EventProducer, ReadInterrupter, ReadMode};
pub use crate::counter::{DrainedCount, EventCounter};
pub use crate::device::{DEFAULT_EVENT_SOURCE, DeviceEventSource};
pub use crate::error::{ChannelError, ReadError, ReadResult};
