//! Push button producer
//!
//! Converts raw pin levels into debounced `ButtonPressed`/`ButtonReleased`
//! events on the shared queue. Independent of the encoder: the two only
//! share the queue.

pub mod debounce;

pub use debounce::{ButtonEdge, ButtonState, Debouncer};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant};

use crate::config::{ButtonConfig, GpioAllocator, GpioNum};
use crate::error::{ConfigError, PushError};
use crate::event::Event;
use crate::queue::EventQueue;

/// Debounced push button bound to an event queue
pub struct Button<'q, M: RawMutex, const N: usize> {
    pin: GpioNum,
    /// Pressed reads LOW
    active_low: bool,
    debouncer: Debouncer,
    queue: &'q EventQueue<M, N>,
}

impl<'q, M: RawMutex, const N: usize> Button<'q, M, N> {
    /// Create an active-low button on a claimed pin
    ///
    /// # Errors
    /// * [`ConfigError::ZeroDebounce`] if `debounce` is zero
    pub fn init(
        pin: GpioNum,
        queue: &'q EventQueue<M, N>,
        debounce: Duration,
    ) -> Result<Self, ConfigError> {
        if debounce.as_ticks() == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        Ok(Self {
            pin,
            active_low: true,
            debouncer: Debouncer::new(debounce),
            queue,
        })
    }

    /// Claim the configured pin and create the button
    ///
    /// The pin stays unclaimed if the configuration is rejected.
    pub fn from_config(
        config: &ButtonConfig,
        gpio: &mut GpioAllocator,
        queue: &'q EventQueue<M, N>,
    ) -> Result<Self, ConfigError> {
        if config.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        let pin = gpio.claim(config.pin)?;
        let mut button = Self::init(pin, queue, config.debounce())?;
        button.active_low = config.active_low;
        Ok(button)
    }

    /// Feed the raw pin level sampled at `now`
    ///
    /// Returns the event pushed to the queue, if the sample committed a
    /// change.
    ///
    /// # Errors
    /// Returns the [`PushError`] if the queue rejected the event. The
    /// debounced state has still advanced.
    pub fn on_level(&mut self, level: bool, now: Instant) -> Result<Option<Event>, PushError> {
        let pressed = level != self.active_low;

        let event = match self.debouncer.sample(pressed, now) {
            Some(ButtonEdge::Pressed) => Event::ButtonPressed,
            Some(ButtonEdge::Released) => Event::ButtonReleased,
            None => return Ok(None),
        };

        self.queue.try_push(event)?;
        Ok(Some(event))
    }

    /// When the pin should be sampled again to commit a pending change
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Current debounced state
    pub fn state(&self) -> ButtonState {
        self.debouncer.state()
    }

    /// Button GPIO
    pub fn pin(&self) -> &GpioNum {
        &self.pin
    }

    /// Tear down the button and hand back its pin
    pub fn release(self) -> GpioNum {
        self.pin
    }

    /// Whether the button reads LOW when pressed
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type Queue = EventQueue<CriticalSectionRawMutex, 8>;

    const DEBOUNCE: Duration = Duration::from_millis(20);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn button(queue: &Queue) -> Button<'_, CriticalSectionRawMutex, 8> {
        let mut gpio = GpioAllocator::new(30);
        Button::init(gpio.claim(4).unwrap(), queue, DEBOUNCE).unwrap()
    }

    #[test]
    fn test_press_and_release_with_noise() {
        let queue = Queue::new();
        let mut btn = button(&queue);

        // Active low: LOW = pressed. Noise spikes revert mid-interval.
        let samples = [
            (false, 0),
            (true, 5),
            (false, 8),
            (false, 28),
            (true, 60),
            (false, 62),
            (true, 64),
            (true, 84),
        ];
        let mut emitted = heapless::Vec::<Event, 4>::new();
        for (level, ms) in samples {
            if let Some(event) = btn.on_level(level, at(ms)).unwrap() {
                emitted.push(event).unwrap();
            }
        }

        assert_eq!(emitted.as_slice(), &[Event::ButtonPressed, Event::ButtonReleased]);
        assert_eq!(queue.try_pop(), Some(Event::ButtonPressed));
        assert_eq!(queue.try_pop(), Some(Event::ButtonReleased));
        assert_eq!(queue.try_pop(), None);
        assert_eq!(btn.state(), ButtonState::Released);
    }

    #[test]
    fn test_short_glitch_emits_nothing() {
        let queue = Queue::new();
        let mut btn = button(&queue);

        assert_eq!(btn.on_level(false, at(0)), Ok(None));
        assert_eq!(btn.on_level(true, at(19)), Ok(None));
        assert!(queue.is_empty());
        assert_eq!(btn.state(), ButtonState::Released);
    }

    #[test]
    fn test_active_high() {
        let queue = Queue::new();
        let mut gpio = GpioAllocator::new(30);
        let config = ButtonConfig {
            active_low: false,
            ..ButtonConfig::new(7)
        };
        let mut btn = Button::from_config(&config, &mut gpio, &queue).unwrap();
        assert!(!btn.is_active_low());
        assert_eq!(btn.pin().number(), 7);

        btn.on_level(true, at(0)).unwrap();
        assert_eq!(btn.on_level(true, at(20)), Ok(Some(Event::ButtonPressed)));
    }

    #[test]
    fn test_release_returns_pin() {
        let queue = Queue::new();
        let mut gpio = GpioAllocator::new(30);
        let btn = Button::from_config(&ButtonConfig::new(4), &mut gpio, &queue).unwrap();
        assert!(matches!(
            Button::from_config(&ButtonConfig::new(4), &mut gpio, &queue),
            Err(ConfigError::PinInUse(4))
        ));

        gpio.release(btn.release());
        assert!(!gpio.is_claimed(4));
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let queue = Queue::new();
        let mut gpio = GpioAllocator::new(30);
        let config = ButtonConfig {
            debounce_ms: 0,
            ..ButtonConfig::new(4)
        };
        assert!(matches!(
            Button::from_config(&config, &mut gpio, &queue),
            Err(ConfigError::ZeroDebounce)
        ));
        assert!(!gpio.is_claimed(4));
    }

    #[test]
    fn test_invalid_pin_rejected() {
        let queue = Queue::new();
        let mut gpio = GpioAllocator::new(30);
        assert!(matches!(
            Button::from_config(&ButtonConfig::new(40), &mut gpio, &queue),
            Err(ConfigError::InvalidPin(40))
        ));
    }

    #[test]
    fn test_queue_full_reported() {
        let queue: EventQueue<CriticalSectionRawMutex, 1> = EventQueue::new();
        let mut gpio = GpioAllocator::new(30);
        let mut btn = Button::init(gpio.claim(4).unwrap(), &queue, DEBOUNCE).unwrap();

        btn.on_level(false, at(0)).unwrap();
        btn.on_level(false, at(20)).unwrap();
        btn.on_level(true, at(30)).unwrap();
        assert_eq!(
            btn.on_level(true, at(50)),
            Err(PushError::Full(Event::ButtonReleased))
        );
        // State still tracks the pin
        assert_eq!(btn.state(), ButtonState::Released);
    }
}
