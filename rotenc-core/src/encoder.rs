//! Rotary encoder producer
//!
//! [`RotaryEncoder`] binds a quadrature decoder, a position accumulator and
//! an event queue. Feed it every A/B sample taken on an edge; each validated
//! step updates the position and pushes one `PositionChanged` event.

use embassy_sync::blocking_mutex::raw::RawMutex;
use portable_atomic::{AtomicI32, Ordering};

use crate::config::{EncoderConfig, GpioAllocator, GpioNum};
use crate::error::{ConfigError, PushError};
use crate::event::{Direction, Event};
use crate::quadrature::{PositionAccumulator, QuadratureDecoder, RawLevels, Resolution};
use crate::queue::EventQueue;

/// Position and direction at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderStatus {
    /// Current position
    pub position: i32,
    /// Direction of the last step, `None` before the first one
    pub direction: Direction,
}

/// Quadrature rotary encoder
pub struct RotaryEncoder<'q, M: RawMutex, const N: usize> {
    pin_a: GpioNum,
    pin_b: GpioNum,
    decoder: QuadratureDecoder,
    accumulator: PositionAccumulator,
    queue: Option<&'q EventQueue<M, N>>,
    /// Mirror of the position readable from other tasks
    snapshot: Option<&'q AtomicI32>,
}

impl<'q, M: RawMutex, const N: usize> RotaryEncoder<'q, M, N> {
    /// Create an encoder on two claimed pins
    ///
    /// Starts at position 0, full step resolution, no flip, no reset, and
    /// without a queue: until one is attached steps only move the position.
    ///
    /// # Errors
    /// * [`ConfigError::DuplicatePin`] if A and B are the same GPIO
    pub fn init(pin_a: GpioNum, pin_b: GpioNum) -> Result<Self, ConfigError> {
        if pin_a == pin_b {
            return Err(ConfigError::DuplicatePin(pin_a.number()));
        }

        Ok(Self {
            pin_a,
            pin_b,
            decoder: QuadratureDecoder::new(Resolution::Full),
            accumulator: PositionAccumulator::new(0, false),
            queue: None,
            snapshot: None,
        })
    }

    /// Claim the configured pins and apply every option
    ///
    /// The queue is not attached; see [`attach_queue`](Self::attach_queue).
    pub fn from_config(config: &EncoderConfig, gpio: &mut GpioAllocator) -> Result<Self, ConfigError> {
        if config.pin_a == config.pin_b {
            return Err(ConfigError::DuplicatePin(config.pin_a));
        }

        let pin_a = gpio.claim(config.pin_a)?;
        let pin_b = match gpio.claim(config.pin_b) {
            Ok(pin) => pin,
            Err(e) => {
                gpio.release(pin_a);
                return Err(e);
            }
        };

        let mut encoder = Self::init(pin_a, pin_b)?;
        encoder.enable_half_steps(config.half_steps);
        if config.flip_direction {
            encoder.flip_direction();
        }
        encoder.set_reset_at(config.reset_at);
        Ok(encoder)
    }

    /// Switch between full and half step resolution
    ///
    /// Restarts the decoder at the detent state; the position is kept.
    pub fn enable_half_steps(&mut self, enable: bool) {
        let resolution = if enable {
            Resolution::Half
        } else {
            Resolution::Full
        };
        self.decoder.set_resolution(resolution);
    }

    /// Reverse the sense of rotation; calling it again restores it
    pub fn flip_direction(&mut self) {
        self.accumulator.toggle_flip();
    }

    /// Reset the position to zero whenever its magnitude exceeds `reset_at`
    /// (0 disables the reset)
    pub fn set_reset_at(&mut self, reset_at: u32) {
        self.accumulator.set_reset_at(reset_at);
    }

    /// Attach the queue that receives position events
    ///
    /// # Errors
    /// * [`ConfigError::QueueAlreadyAttached`] if a queue is already attached
    pub fn attach_queue(&mut self, queue: &'q EventQueue<M, N>) -> Result<(), ConfigError> {
        if self.queue.is_some() {
            return Err(ConfigError::QueueAlreadyAttached);
        }
        self.queue = Some(queue);
        Ok(())
    }

    /// Publish every position update to `snapshot`
    pub fn publish_position(&mut self, snapshot: &'q AtomicI32) {
        snapshot.store(self.accumulator.position(), Ordering::Release);
        self.snapshot = Some(snapshot);
    }

    /// Feed one A/B sample
    ///
    /// Returns the event for a validated step. Invalid transitions and
    /// repeated samples return `Ok(None)` and leave the position untouched.
    ///
    /// # Errors
    /// Returns the [`PushError`] if the queue rejected the event. The
    /// position has still moved.
    pub fn on_levels(&mut self, levels: RawLevels) -> Result<Option<Event>, PushError> {
        let step = self.decoder.update(levels);
        let Some(event) = self.accumulator.apply(step) else {
            return Ok(None);
        };

        if let Some(snapshot) = self.snapshot {
            snapshot.store(self.accumulator.position(), Ordering::Release);
        }
        if let Some(queue) = self.queue {
            queue.try_push(event)?;
        }
        Ok(Some(event))
    }

    /// Current position
    pub fn read_position(&self) -> i32 {
        self.accumulator.position()
    }

    /// Current position and last direction
    pub fn status(&self) -> EncoderStatus {
        EncoderStatus {
            position: self.accumulator.position(),
            direction: self.accumulator.last_direction(),
        }
    }

    /// Decoder resolution
    pub fn resolution(&self) -> Resolution {
        self.decoder.resolution()
    }

    /// Whether the direction is flipped
    pub fn is_flipped(&self) -> bool {
        self.accumulator.is_flipped()
    }

    /// Whether a queue is attached
    pub fn has_queue(&self) -> bool {
        self.queue.is_some()
    }

    /// GPIOs for signals A and B
    pub fn pins(&self) -> (&GpioNum, &GpioNum) {
        (&self.pin_a, &self.pin_b)
    }

    /// Tear down the encoder and hand back its pins
    pub fn release(self) -> (GpioNum, GpioNum) {
        (self.pin_a, self.pin_b)
    }
}
