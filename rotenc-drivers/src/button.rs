//! Push button pin
//!
//! Waits for edges on the button input. While a change is being debounced
//! it also wakes at the debounce deadline, so a press is committed even if
//! the pin stays quiet after the last bounce.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use rotenc_core::{Button, Event};

use crate::error::DriverError;

/// Back-off after a GPIO error before waiting again
const PIN_ERROR_BACKOFF_MS: u64 = 10;

/// Button input
pub struct ButtonPin<P> {
    pin: P,
}

impl<P: InputPin> ButtonPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Raw level, `true` = HIGH
    pub fn level(&mut self) -> Result<bool, DriverError> {
        self.pin.is_high().map_err(DriverError::pin)
    }

    /// Sample the pin now and feed the button
    pub fn sample_into<M: RawMutex, const N: usize>(
        &mut self,
        button: &mut Button<'_, M, N>,
    ) -> Result<Option<Event>, DriverError> {
        let level = self.level()?;
        Ok(button.on_level(level, Instant::now())?)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin + Wait> ButtonPin<P> {
    /// Wait until the debounced state changes
    ///
    /// Samples the pin once before waiting, so a button already held down
    /// when this is first called still reports the press.
    pub async fn next_event<M: RawMutex, const N: usize>(
        &mut self,
        button: &mut Button<'_, M, N>,
    ) -> Result<Event, DriverError> {
        if let Some(event) = self.sample_into(button)? {
            return Ok(event);
        }

        loop {
            match button.deadline() {
                None => self.pin.wait_for_any_edge().await.map_err(DriverError::pin)?,
                Some(deadline) => {
                    match select(Timer::at(deadline), self.pin.wait_for_any_edge()).await {
                        Either::First(()) => {}
                        Either::Second(result) => result.map_err(DriverError::pin)?,
                    }
                }
            }

            if let Some(event) = self.sample_into(button)? {
                return Ok(event);
            }
        }
    }

    /// Drive the button forever
    pub async fn run<M: RawMutex, const N: usize>(&mut self, button: &mut Button<'_, M, N>) -> ! {
        loop {
            match self.next_event(button).await {
                Ok(_event) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Button: {}", _event);
                }
                Err(DriverError::Push(_e)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Button event dropped: {}", _e);
                }
                Err(DriverError::Pin(_kind)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Button pin error: {}", _kind);
                    Timer::after(Duration::from_millis(PIN_ERROR_BACKOFF_MS)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Bench;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::with_timeout;
    use rotenc_core::{ButtonState, EventQueue, GpioAllocator};

    type Queue = EventQueue<CriticalSectionRawMutex, 4>;

    const DEBOUNCE: Duration = Duration::from_millis(5);

    fn button(queue: &Queue) -> Button<'_, CriticalSectionRawMutex, 4> {
        let mut gpio = GpioAllocator::new(30);
        Button::init(gpio.claim(4).unwrap(), queue, DEBOUNCE).unwrap()
    }

    #[test]
    fn test_press_commits_after_quiet_interval() {
        let queue = Queue::new();
        let mut btn = button(&queue);
        // Pull-up idle HIGH, press pulls LOW
        let bench = Bench::new(0b1);
        bench.push(&[0b0]);
        let mut pin = ButtonPin::new(bench.pin(0));

        let start = Instant::now();
        let event = block_on(pin.next_event(&mut btn)).unwrap();

        assert_eq!(event, Event::ButtonPressed);
        assert!(Instant::now() - start >= DEBOUNCE);
        assert_eq!(btn.state(), ButtonState::Pressed);
        assert_eq!(queue.try_pop(), Some(Event::ButtonPressed));
    }

    #[test]
    fn test_bounce_then_press() {
        let queue = Queue::new();
        let mut btn = button(&queue);
        let bench = Bench::new(0b1);
        bench.push(&[0b0, 0b1, 0b0, 0b1, 0b0]);
        let mut pin = ButtonPin::new(bench.pin(0));

        let event = block_on(pin.next_event(&mut btn)).unwrap();
        assert_eq!(event, Event::ButtonPressed);
        assert_eq!(bench.remaining(), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_bounce_alone_emits_nothing() {
        let queue = Queue::new();
        let mut btn = button(&queue);
        let bench = Bench::new(0b1);
        bench.push(&[0b0, 0b1]);
        let mut pin = ButtonPin::new(bench.pin(0));

        let result = block_on(with_timeout(
            Duration::from_millis(30),
            pin.next_event(&mut btn),
        ));
        assert!(result.is_err());
        assert!(queue.is_empty());
        assert_eq!(btn.state(), ButtonState::Released);
    }

    #[test]
    fn test_held_at_start_reports_press() {
        let queue = Queue::new();
        let mut btn = button(&queue);
        // Already LOW, no edge will ever come
        let bench = Bench::new(0b0);
        let mut pin = ButtonPin::new(bench.pin(0));

        let result = block_on(with_timeout(
            Duration::from_millis(200),
            pin.next_event(&mut btn),
        ));
        assert!(matches!(result, Ok(Ok(Event::ButtonPressed))));
        assert_eq!(btn.state(), ButtonState::Pressed);
    }

    #[test]
    fn test_level_reads_pin() {
        let bench = Bench::new(0b0);
        let mut pin = ButtonPin::new(bench.pin(0));
        assert_eq!(pin.level(), Ok(false));
    }
}
