//! Error types for the pin drivers.

use core::fmt;

use embedded_hal::digital::ErrorKind;
use rotenc_core::PushError;

/// Errors that can occur while sampling pins and producing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Reading or waiting on a GPIO failed.
    Pin(ErrorKind),

    /// The event queue rejected an event.
    Push(PushError),
}

impl DriverError {
    /// Wrap any `embedded-hal` digital error.
    pub(crate) fn pin<E: embedded_hal::digital::Error>(error: E) -> Self {
        DriverError::Pin(error.kind())
    }
}

// Allow ergonomic `?` propagation from queue pushes.
impl From<PushError> for DriverError {
    fn from(error: PushError) -> Self {
        DriverError::Push(error)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DriverError::Pin(kind) => write!(f, "GPIO error: {:?}", kind),
            DriverError::Push(e) => write!(f, "{}", e),
        }
    }
}
