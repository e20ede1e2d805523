//! Configuration type definitions
//!
//! Plain values supplied once at construction. Pin numbers are raw here and
//! become [`GpioNum`](super::GpioNum)s when claimed.

use embassy_time::Duration;

use crate::quadrature::Resolution;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default button debounce interval (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// Rotary encoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// GPIO for signal A (CLK)
    pub pin_a: u8,
    /// GPIO for signal B (DT)
    pub pin_b: u8,
    /// Track at half step resolution (two steps per detent)
    pub half_steps: bool,
    /// Reverse the clockwise/counter-clockwise sense
    pub flip_direction: bool,
    /// Reset the position to zero once its magnitude exceeds this (0 = never)
    pub reset_at: u32,
}

impl EncoderConfig {
    /// Configuration for the given pins with all options off
    pub fn new(pin_a: u8, pin_b: u8) -> Self {
        Self {
            pin_a,
            pin_b,
            half_steps: false,
            flip_direction: false,
            reset_at: 0,
        }
    }

    /// Decoder resolution selected by `half_steps`
    pub fn resolution(&self) -> Resolution {
        if self.half_steps {
            Resolution::Half
        } else {
            Resolution::Full
        }
    }
}

/// Push button configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Button GPIO
    pub pin: u8,
    /// Pressed reads LOW (pull-up wiring)
    pub active_low: bool,
    /// Time the level must stay stable before a change is accepted (ms)
    pub debounce_ms: u32,
}

impl ButtonConfig {
    /// Active-low button with the default debounce interval
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            active_low: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Debounce interval
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms as u64)
    }
}

/// Complete input configuration: one encoder and an optional button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotaryConfig {
    /// Encoder signals and options
    pub encoder: EncoderConfig,
    /// Button attached to the encoder shaft, if fitted
    pub button: Option<ButtonConfig>,
}

impl RotaryConfig {
    /// Encoder only
    pub fn new(encoder: EncoderConfig) -> Self {
        Self {
            encoder,
            button: None,
        }
    }

    /// Add a button sharing the encoder's event queue
    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = Some(button);
        self
    }
}
