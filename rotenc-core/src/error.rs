//! Error types
//!
//! Configuration errors are fatal at setup time. Push errors are reported to
//! the producer without blocking it. Pop errors distinguish an expected
//! timeout from the permanent end of the queue.

use core::fmt;

use crate::event::Event;

/// Errors raised while constructing encoders, buttons and queues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO number is out of range for the board
    InvalidPin(u8),
    /// GPIO was already claimed by another input
    PinInUse(u8),
    /// The same GPIO was given for both quadrature signals
    DuplicatePin(u8),
    /// A queue is already attached to this encoder
    QueueAlreadyAttached,
    /// Button debounce interval must be non-zero
    ZeroDebounce,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidPin(pin) => write!(f, "GPIO {} is out of range", pin),
            ConfigError::PinInUse(pin) => write!(f, "GPIO {} is already in use", pin),
            ConfigError::DuplicatePin(pin) => {
                write!(f, "GPIO {} used for both encoder signals", pin)
            }
            ConfigError::QueueAlreadyAttached => write!(f, "Event queue already attached"),
            ConfigError::ZeroDebounce => write!(f, "Debounce interval must be non-zero"),
        }
    }
}

/// Failure to enqueue an event; the rejected event is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushError {
    /// Queue is at capacity, the new event was dropped
    Full(Event),
    /// Queue has been closed
    Closed(Event),
}

impl PushError {
    /// The event that could not be delivered
    pub fn event(&self) -> Event {
        match self {
            PushError::Full(event) | PushError::Closed(event) => *event,
        }
    }
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PushError::Full(_) => write!(f, "Event queue full, event dropped"),
            PushError::Closed(_) => write!(f, "Event queue closed"),
        }
    }
}

/// Outcome of a pop that produced no event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PopError {
    /// No event arrived within the timeout
    Timeout,
    /// Queue is closed and fully drained
    Closed,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PopError::Timeout => write!(f, "Timed out waiting for event"),
            PopError::Closed => write!(f, "Event queue closed"),
        }
    }
}
