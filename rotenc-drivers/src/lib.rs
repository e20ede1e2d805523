//! Pin drivers for rotary encoder input
//!
//! Binds the producers from `rotenc-core` to real GPIOs through the
//! `embedded-hal` [`InputPin`](embedded_hal::digital::InputPin) and
//! `embedded-hal-async` [`Wait`](embedded_hal_async::digital::Wait) traits:
//!
//! - [`EncoderPins`] waits for an edge on A or B, samples both levels and
//!   feeds the encoder
//! - [`ButtonPin`] waits for edges on the button and wakes up again when a
//!   pending debounce interval ends
//!
//! # Features
//!
//! - **`defmt`**: log dropped events and pin errors, and derive
//!   [`defmt::Format`] on error types.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod encoder;
pub mod error;

pub use button::ButtonPin;
pub use encoder::EncoderPins;
pub use error::DriverError;

#[cfg(test)]
pub(crate) mod mock;
