//! Single-consumer event channel.
//!
//! The channel wraps an [`EventCounter`] with three roles:
//!
//! - [`EventProducer`]: the interrupt side. Cloneable, never blocks.
//! - [`EventHandle`]: the one consumer. Obtained from [`EventChannel::open`],
//!   released on drop.
//! - [`ReadInterrupter`]: cancels a blocked read from another thread.
//!
//! # Wakeups
//!
//! The consumer parks on a [`crossbeam::sync::Parker`] and the producer
//! unparks it after every increment. A parker keeps an unpark token when
//! nobody is parked, so an increment landing between the consumer's empty
//! drain and its park makes the park return immediately. No wakeup is lost
//! and no lock is held while the consumer sleeps.
//!
//! A stale token can wake the consumer with nothing pending; the read then
//! drains zero and parks again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam::sync::{Parker, Unparker};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::counter::{DrainedCount, EventCounter};
use crate::error::{ChannelError, ReadError, ReadResult};

/// How a read waits when no events are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Return [`ReadError::WouldBlock`] immediately.
    NonBlocking,
    /// Wait until events arrive or the read is interrupted.
    Blocking,
    /// Like `Blocking`, but the read is also interrupted once the deadline
    /// passes.
    BlockingUntil(Instant),
}

#[derive(Debug)]
struct Shared {
    counter: EventCounter,
    owned: AtomicBool,
    interrupt_pending: AtomicBool,
    source_lost: AtomicBool,
    lost_reason: Mutex<Option<String>>,
    unparker: Unparker,
    parker: Mutex<Option<Parker>>,
}

impl Shared {
    fn signal(&self) {
        self.unparker.unpark();
    }

    fn take_interrupt(&self) -> bool {
        self.interrupt_pending.swap(false, Ordering::AcqRel)
    }

    fn lost_reason(&self) -> Option<String> {
        if !self.source_lost.load(Ordering::Acquire) {
            return None;
        }
        Some(
            self.lost_reason
                .lock()
                .clone()
                .unwrap_or_else(|| String::from("event source closed")),
        )
    }
}

/// The event channel between the interrupt path and the watchdog.
///
/// # Example
///
/// ```rust
/// use freefall_event::prelude::*;
///
/// let channel = EventChannel::new();
/// let producer = channel.producer();
/// let mut handle = channel.open().expect("channel is free");
///
/// producer.on_hardware_event();
/// let count = handle.read(ReadMode::NonBlocking).expect("one event pending");
/// assert_eq!(count.get(), 1);
/// assert_eq!(handle.read(ReadMode::NonBlocking), Err(ReadError::WouldBlock));
/// ```
#[derive(Debug, Clone)]
pub struct EventChannel {
    shared: Arc<Shared>,
}

impl EventChannel {
    /// Create a channel with no pending events and no consumer.
    #[must_use]
    pub fn new() -> Self {
        let parker = Parker::new();
        let unparker = parker.unparker().clone();
        Self {
            shared: Arc::new(Shared {
                counter: EventCounter::new(),
                owned: AtomicBool::new(false),
                interrupt_pending: AtomicBool::new(false),
                source_lost: AtomicBool::new(false),
                lost_reason: Mutex::new(None),
                unparker,
                parker: Mutex::new(Some(parker)),
            }),
        }
    }

    /// Get a producer for the interrupt side.
    #[must_use]
    pub fn producer(&self) -> EventProducer {
        EventProducer {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Acquire the channel for exclusive reading.
    ///
    /// Starts a fresh session: events counted before the open are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Busy`] if a handle is already outstanding.
    pub fn open(&self) -> Result<EventHandle, ChannelError> {
        if self
            .shared
            .owned
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ChannelError::Busy);
        }

        let parker = self.shared.parker.lock().take();
        self.shared.counter.reset();
        self.shared.interrupt_pending.store(false, Ordering::Release);
        debug!("Event channel opened");

        Ok(EventHandle {
            shared: Arc::clone(&self.shared),
            parker,
        })
    }

    /// Whether a consumer currently holds the channel.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.owned.load(Ordering::Acquire)
    }

    /// Events counted but not yet drained.
    #[must_use]
    pub fn pending(&self) -> u64 {
        self.shared.counter.pending()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt-side handle to the channel.
#[derive(Debug, Clone)]
pub struct EventProducer {
    shared: Arc<Shared>,
}

impl EventProducer {
    /// Count one free-fall event and wake the reader.
    ///
    /// # RT Safety
    ///
    /// One atomic increment plus an unpark. No allocation, never waits on
    /// the consumer.
    #[inline]
    pub fn on_hardware_event(&self) {
        self.shared.counter.increment();
        self.shared.signal();
    }

    /// Report that the hardware line is gone.
    ///
    /// Events already counted are still delivered; after that, reads return
    /// [`ReadError::SourceLost`]. Not for use from interrupt context, the
    /// reason string is stored on the heap.
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(%reason, "Event source failed");
        *self.shared.lost_reason.lock() = Some(reason);
        self.shared.source_lost.store(true, Ordering::Release);
        self.shared.signal();
    }
}

/// Cancels a blocked read.
#[derive(Debug, Clone)]
pub struct ReadInterrupter {
    shared: Arc<Shared>,
}

impl ReadInterrupter {
    /// Interrupt the current (or next) blocking read.
    ///
    /// Pending events are untouched; a read that finds events returns them
    /// instead of reporting the interruption.
    pub fn interrupt(&self) {
        self.shared.interrupt_pending.store(true, Ordering::Release);
        self.shared.signal();
    }
}

/// Exclusive consumer handle. Dropping it closes the channel.
#[derive(Debug)]
pub struct EventHandle {
    shared: Arc<Shared>,
    parker: Option<Parker>,
}

impl EventHandle {
    /// Drain pending events.
    ///
    /// # Errors
    ///
    /// - [`ReadError::WouldBlock`]: nothing pending in non-blocking mode.
    /// - [`ReadError::Interrupted`]: a blocking read was interrupted or its
    ///   deadline passed before any event arrived.
    /// - [`ReadError::SourceLost`]: the producer failed and nothing is pending.
    pub fn read(&mut self, mode: ReadMode) -> ReadResult<DrainedCount> {
        let Some(parker) = self.parker.as_ref() else {
            return Err(ReadError::SourceLost(String::from("channel closed")));
        };

        loop {
            if let Some(count) = DrainedCount::from_raw(self.shared.counter.drain()) {
                trace!(count = count.get(), "Drained events");
                return Ok(count);
            }

            if let Some(reason) = self.shared.lost_reason() {
                // Events counted before the failure was recorded come first.
                if let Some(count) = DrainedCount::from_raw(self.shared.counter.drain()) {
                    return Ok(count);
                }
                return Err(ReadError::SourceLost(reason));
            }

            match mode {
                ReadMode::NonBlocking => return Err(ReadError::WouldBlock),
                ReadMode::Blocking => {
                    if self.shared.take_interrupt() {
                        return Err(ReadError::Interrupted);
                    }
                    parker.park();
                }
                ReadMode::BlockingUntil(deadline) => {
                    if self.shared.take_interrupt() || Instant::now() >= deadline {
                        return Err(ReadError::Interrupted);
                    }
                    parker.park_deadline(deadline);
                }
            }
        }
    }

    /// Get an interrupter for this channel.
    #[must_use]
    pub fn interrupter(&self) -> ReadInterrupter {
        ReadInterrupter {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Close the channel explicitly. Same as dropping the handle.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for EventHandle {
    fn drop(&mut self) {
        self.shared.counter.reset();
        self.shared.interrupt_pending.store(false, Ordering::Release);
        if let Some(parker) = self.parker.take() {
            *self.shared.parker.lock() = Some(parker);
        }
        self.shared.owned.store(false, Ordering::Release);
        debug!("Event channel closed");
    }
}
