//! Inter-task communication
//!
//! The encoder and button tasks push into one event queue; the consumer task
//! pops from it. The latest position is also published as an atomic so any
//! task can read it without touching the queue.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use portable_atomic::AtomicI32;

use rotenc_core::{EventQueue, DEFAULT_QUEUE_CAPACITY};

/// Event queue capacity
pub const EVENT_QUEUE_SIZE: usize = DEFAULT_QUEUE_CAPACITY;

pub type Queue = EventQueue<CriticalSectionRawMutex, EVENT_QUEUE_SIZE>;

/// Rotation and button events, in push order
pub static EVENT_QUEUE: Queue = EventQueue::new();

/// Latest encoder position, written by the encoder task
pub static POSITION: AtomicI32 = AtomicI32::new(0);
