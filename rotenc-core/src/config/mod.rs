//! Configuration
//!
//! Board-agnostic input configuration and GPIO claiming.

pub mod gpio;
pub mod types;

pub use gpio::{GpioAllocator, GpioNum, MAX_GPIO_COUNT};
pub use types::*;
