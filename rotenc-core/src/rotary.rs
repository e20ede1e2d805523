//! Encoder plus optional button, wired to one queue
//!
//! The two producers stay independent; they only share the queue, so a
//! consumer sees rotation and button events in a single ordered stream.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::button::Button;
use crate::config::{GpioAllocator, RotaryConfig};
use crate::encoder::RotaryEncoder;
use crate::error::ConfigError;
use crate::queue::EventQueue;

/// A configured encoder and its optional button
pub struct RotaryInput<'q, M: RawMutex, const N: usize> {
    /// Rotation producer
    pub encoder: RotaryEncoder<'q, M, N>,
    /// Button producer, if the configuration has one
    pub button: Option<Button<'q, M, N>>,
}

impl<'q, M: RawMutex, const N: usize> RotaryInput<'q, M, N> {
    /// Build everything described by `config` onto `queue`
    ///
    /// Claims all pins, applies half step, flip and reset options, attaches
    /// the queue, and creates the button on the same queue. Any error aborts
    /// the whole setup.
    pub fn init(
        config: &RotaryConfig,
        gpio: &mut GpioAllocator,
        queue: &'q EventQueue<M, N>,
    ) -> Result<Self, ConfigError> {
        let mut encoder = RotaryEncoder::from_config(&config.encoder, gpio)?;
        encoder.attach_queue(queue)?;

        let button = match &config.button {
            Some(button) => match Button::from_config(button, gpio, queue) {
                Ok(button) => Some(button),
                Err(e) => {
                    let (a, b) = encoder.release();
                    gpio.release(a);
                    gpio.release(b);
                    return Err(e);
                }
            },
            None => None,
        };

        Ok(Self { encoder, button })
    }
}
