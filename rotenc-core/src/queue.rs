//! Shared event queue
//!
//! A bounded FIFO of [`Event`]s shared by the encoder and button producers.
//! Pushes never block: when the queue is full the new event is dropped and
//! handed back to the producer in [`PushError::Full`]. Pops wait with a
//! timeout. Events are delivered in the order they were accepted, across all
//! producers, and each event reaches exactly one consumer.
//!
//! The raw mutex type `M` picks the locking flavour. Use
//! `CriticalSectionRawMutex` when producers run in interrupt context.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use portable_atomic::{AtomicBool, Ordering};

use crate::error::{PopError, PushError};
use crate::event::Event;

/// Default queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

/// Bounded, ordered, multi-producer event queue
pub struct EventQueue<M: RawMutex, const N: usize = DEFAULT_QUEUE_CAPACITY> {
    channel: Channel<M, Event, N>,
    /// Set once by `close`, never cleared
    closed: AtomicBool,
    /// Wakes a consumer blocked in `pop` when the queue closes
    close_wake: Signal<M, ()>,
}

impl<M: RawMutex, const N: usize> EventQueue<M, N> {
    const CAPACITY_OK: () = assert!(N > 0, "event queue capacity must be non-zero");

    /// Create an empty queue
    ///
    /// `const` so queues can live in statics.
    pub const fn new() -> Self {
        let () = Self::CAPACITY_OK;
        Self {
            channel: Channel::new(),
            closed: AtomicBool::new(false),
            close_wake: Signal::new(),
        }
    }

    /// Enqueue an event without blocking
    ///
    /// # Errors
    /// * [`PushError::Full`] if the queue is at capacity; the event is dropped
    /// * [`PushError::Closed`] if the queue has been closed
    pub fn try_push(&self, event: Event) -> Result<(), PushError> {
        if self.is_closed() {
            return Err(PushError::Closed(event));
        }
        self.channel.try_send(event).map_err(|e| match e {
            TrySendError::Full(event) => PushError::Full(event),
        })
    }

    /// Take the oldest event if one is waiting
    pub fn try_pop(&self) -> Option<Event> {
        self.channel.try_receive().ok()
    }

    /// Wait up to `timeout` for the next event
    ///
    /// Events pushed before `close` are still delivered; after that the
    /// queue reports [`PopError::Closed`].
    ///
    /// # Errors
    /// * [`PopError::Timeout`] if nothing arrived in time
    /// * [`PopError::Closed`] if the queue is closed and drained
    pub async fn pop(&self, timeout: Duration) -> Result<Event, PopError> {
        if let Some(event) = self.try_pop() {
            return Ok(event);
        }
        if self.is_closed() {
            return Err(PopError::Closed);
        }

        match with_timeout(timeout, select(self.channel.receive(), self.close_wake.wait())).await {
            Ok(Either::First(event)) => Ok(event),
            Ok(Either::Second(())) => {
                // Pass the wakeup on to any other waiting consumer
                self.close_wake.signal(());
                self.try_pop().ok_or(PopError::Closed)
            }
            Err(_) => Err(PopError::Timeout),
        }
    }

    /// Close the queue permanently
    ///
    /// Further pushes fail and waiting consumers wake up.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.close_wake.signal(());
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// True if no events are queued
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Maximum number of queued events
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M: RawMutex, const N: usize> Default for EventQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
