//! Board configuration
//!
//! Pin numbers here must match the peripherals handed to the tasks in
//! `main.rs`; a mismatch fails the build, and the allocator rejects overlaps
//! at boot.

use rotenc_core::config::{ButtonConfig, EncoderConfig, RotaryConfig, DEFAULT_DEBOUNCE_MS};

/// RP2040 user GPIOs (GPIO0..=GPIO29)
pub const GPIO_COUNT: u8 = 30;

/// Encoder A signal (CLK on most KY-040 style modules)
pub const ENCODER_A_GPIO: u8 = 2;
/// Encoder B signal (DT)
pub const ENCODER_B_GPIO: u8 = 3;
/// Encoder push switch (SW), `None` for encoders without one
pub const BUTTON_GPIO: Option<u8> = Some(4);

pub const HALF_STEPS: bool = false;
pub const FLIP_DIRECTION: bool = false;
/// Wrap threshold, 0 = never reset
pub const RESET_AT: u32 = 0;

pub const BUTTON_ACTIVE_LOW: bool = true;
pub const BUTTON_DEBOUNCE_MS: u32 = DEFAULT_DEBOUNCE_MS;

/// Timeout for one consumer wait before it logs a heartbeat
pub const CONSUMER_TIMEOUT_MS: u64 = 5_000;

/// Build the input configuration from the constants above
pub fn rotary_config() -> RotaryConfig {
    let mut encoder = EncoderConfig::new(ENCODER_A_GPIO, ENCODER_B_GPIO);
    encoder.half_steps = HALF_STEPS;
    encoder.flip_direction = FLIP_DIRECTION;
    encoder.reset_at = RESET_AT;

    let config = RotaryConfig::new(encoder);
    match BUTTON_GPIO {
        Some(pin) => config.with_button(ButtonConfig {
            active_low: BUTTON_ACTIVE_LOW,
            debounce_ms: BUTTON_DEBOUNCE_MS,
            ..ButtonConfig::new(pin)
        }),
        None => config,
    }
}
