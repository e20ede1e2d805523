//! Board-agnostic core logic for rotary encoder input
//!
//! This crate contains everything that turns raw pin levels into semantic
//! input events, without depending on a specific chip:
//!
//! - Quadrature decoder state machine (full and half step resolution)
//! - Position accumulator with direction flip and wraparound reset
//! - Button debounce engine
//! - Bounded, ordered event queue shared by all producers
//! - Encoder and button producers bound to that queue
//! - Configuration types and GPIO claiming
//!
//! # Data flow
//!
//! ```text
//! A/B edge ──▶ QuadratureDecoder ──▶ PositionAccumulator ──┐
//!                                                          ├──▶ EventQueue ──▶ consumer
//! button edge ──▶ Debouncer ───────────────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod encoder;
pub mod error;
pub mod event;
pub mod quadrature;
pub mod queue;
pub mod rotary;

pub use button::{Button, ButtonState, Debouncer};
pub use config::{ButtonConfig, EncoderConfig, GpioAllocator, GpioNum, RotaryConfig};
pub use encoder::{EncoderStatus, RotaryEncoder};
pub use error::{ConfigError, PopError, PushError};
pub use event::{Direction, Event};
pub use quadrature::{PositionAccumulator, QuadratureDecoder, RawLevels, Resolution};
pub use queue::{EventQueue, DEFAULT_QUEUE_CAPACITY};
pub use rotary::RotaryInput;
