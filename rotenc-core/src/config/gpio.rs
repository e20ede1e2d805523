//! GPIO claiming
//!
//! Tracks which GPIO numbers are in use so that every input gets a valid,
//! unique pin before anything is constructed.

use heapless::FnvIndexSet;

use crate::error::ConfigError;

/// Upper bound on GPIO numbers any supported board exposes
pub const MAX_GPIO_COUNT: u8 = 64;

/// A validated GPIO number, obtained from [`GpioAllocator::claim`]
///
/// Move-only: whoever holds it owns the pin until it goes back through
/// [`GpioAllocator::release`].
///
/// ```compile_fail
/// use rotenc_core::GpioAllocator;
///
/// let mut gpio = GpioAllocator::new(30);
/// let pin = gpio.claim(2).unwrap();
/// let owner = pin;
/// let second_owner = pin;
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioNum(u8);

impl GpioNum {
    /// Raw GPIO number
    pub fn number(&self) -> u8 {
        self.0
    }
}

/// GPIO allocator for one board
pub struct GpioAllocator {
    /// Number of GPIOs on the board (valid numbers are `0..gpio_count`)
    gpio_count: u8,
    /// Set of claimed GPIO numbers
    claimed: FnvIndexSet<u8, 64>,
}

impl GpioAllocator {
    /// Create an allocator for a board with `gpio_count` GPIOs
    ///
    /// Counts above [`MAX_GPIO_COUNT`] are clamped.
    pub fn new(gpio_count: u8) -> Self {
        Self {
            gpio_count: gpio_count.min(MAX_GPIO_COUNT),
            claimed: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO
    ///
    /// # Errors
    /// * [`ConfigError::InvalidPin`] if the number is out of range
    /// * [`ConfigError::PinInUse`] if it was already claimed
    pub fn claim(&mut self, pin: u8) -> Result<GpioNum, ConfigError> {
        if pin >= self.gpio_count {
            return Err(ConfigError::InvalidPin(pin));
        }
        if self.claimed.contains(&pin) {
            return Err(ConfigError::PinInUse(pin));
        }
        self.claimed
            .insert(pin)
            .map_err(|_| ConfigError::InvalidPin(pin))?;
        Ok(GpioNum(pin))
    }

    /// Return a GPIO so it can be claimed again
    pub fn release(&mut self, pin: GpioNum) {
        self.claimed.remove(&pin.0);
    }

    /// Check if a GPIO is claimed
    pub fn is_claimed(&self, pin: u8) -> bool {
        self.claimed.contains(&pin)
    }

    /// Number of claimed GPIOs
    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}
