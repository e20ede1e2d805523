//! Quadrature encoder pins
//!
//! Waits for an edge on either signal, samples both levels and hands the
//! sample to a [`RotaryEncoder`]. Samples are taken after the edge, so a
//! bounce that settles before the read is seen as a repeated sample, which
//! the decoder ignores.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use rotenc_core::{Event, RawLevels, RotaryEncoder};

use crate::error::DriverError;

/// Back-off after a GPIO error before waiting again
const PIN_ERROR_BACKOFF_MS: u64 = 10;

/// A and B signal inputs of one encoder
pub struct EncoderPins<A, B> {
    a: A,
    b: B,
}

impl<A, B> EncoderPins<A, B>
where
    A: InputPin,
    B: InputPin,
{
    /// Wrap the two signal inputs
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Sample both signals
    pub fn levels(&mut self) -> Result<RawLevels, DriverError> {
        let a = self.a.is_high().map_err(DriverError::pin)?;
        let b = self.b.is_high().map_err(DriverError::pin)?;
        Ok(RawLevels::new(a, b))
    }

    /// Sample both signals and feed the encoder
    pub fn sample_into<M: RawMutex, const N: usize>(
        &mut self,
        encoder: &mut RotaryEncoder<'_, M, N>,
    ) -> Result<Option<Event>, DriverError> {
        let levels = self.levels()?;
        Ok(encoder.on_levels(levels)?)
    }

    /// Release the pins
    pub fn release(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A, B> EncoderPins<A, B>
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    /// Wait for an edge on A or B, then sample both
    pub async fn wait_for_edge(&mut self) -> Result<RawLevels, DriverError> {
        match select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await {
            Either::First(result) => result.map_err(DriverError::pin)?,
            Either::Second(result) => result.map_err(DriverError::pin)?,
        }
        self.levels()
    }

    /// Process edges until one completes a step
    pub async fn next_event<M: RawMutex, const N: usize>(
        &mut self,
        encoder: &mut RotaryEncoder<'_, M, N>,
    ) -> Result<Event, DriverError> {
        loop {
            let levels = self.wait_for_edge().await?;
            if let Some(event) = encoder.on_levels(levels)? {
                return Ok(event);
            }
        }
    }

    /// Drive the encoder forever
    ///
    /// Dropped events and pin errors are logged and do not stop the loop.
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        encoder: &mut RotaryEncoder<'_, M, N>,
    ) -> ! {
        loop {
            match self.next_event(encoder).await {
                Ok(_event) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Encoder: {}", _event);
                }
                Err(DriverError::Push(_e)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Encoder event dropped: {}", _e);
                }
                Err(DriverError::Pin(_kind)) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Encoder pin error: {}", _kind);
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
    use rotenc_core::{Direction, EncoderConfig, EventQueue, GpioAllocator, PushError};

    type Queue = EventQueue<CriticalSectionRawMutex, 4>;

    /// (B,A) samples of one clockwise detent from rest
    const CW_DETENT: [u8; 4] = [0b01, 0b00, 0b10, 0b11];
    const CCW_DETENT: [u8; 4] = [0b10, 0b00, 0b01, 0b11];

    fn encoder(queue: &Queue) -> RotaryEncoder<'_, CriticalSectionRawMutex, 4> {
        let mut gpio = GpioAllocator::new(30);
        let mut enc = RotaryEncoder::from_config(&EncoderConfig::new(2, 3), &mut gpio).unwrap();
        enc.attach_queue(queue).unwrap();
        enc
    }

    #[test]
    fn test_levels() {
        let bench = Bench::new(0b10);
        let mut pins = EncoderPins::new(bench.pin(0), bench.pin(1));
        let levels = pins.levels().unwrap();
        assert!(!levels.a());
        assert!(levels.b());
    }

    #[test]
    fn test_next_event_per_detent() {
        let queue = Queue::new();
        let mut enc = encoder(&queue);
        let bench = Bench::new(0b11);
        bench.push(&CW_DETENT);
        bench.push(&CCW_DETENT);
        let mut pins = EncoderPins::new(bench.pin(0), bench.pin(1));

        let first = block_on(pins.next_event(&mut enc)).unwrap();
        assert_eq!(
            first,
            Event::PositionChanged {
                position: 1,
                direction: Direction::Clockwise
            }
        );
        assert_eq!(bench.remaining(), 4);

        let second = block_on(pins.next_event(&mut enc)).unwrap();
        assert_eq!(
            second,
            Event::PositionChanged {
                position: 0,
                direction: Direction::CounterClockwise
            }
        );
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_bounce_is_absorbed() {
        let queue = Queue::new();
        let mut enc = encoder(&queue);
        // Chatter on A at the start of the detent, then a clean turn
        let bench = Bench::new(0b11);
        bench.push(&[0b01, 0b11, 0b01, 0b11, 0b01, 0b00, 0b10, 0b11]);
        let mut pins = EncoderPins::new(bench.pin(0), bench.pin(1));

        let event = block_on(pins.next_event(&mut enc)).unwrap();
        assert!(event.is_rotation());
        assert_eq!(enc.read_position(), 1);
        assert_eq!(bench.remaining(), 0);
    }

    #[test]
    fn test_sample_into_reports_full_queue() {
        let queue: EventQueue<CriticalSectionRawMutex, 1> = EventQueue::new();
        let mut gpio = GpioAllocator::new(30);
        let mut enc = RotaryEncoder::from_config(&EncoderConfig::new(2, 3), &mut gpio).unwrap();
        enc.attach_queue(&queue).unwrap();

        let bench = Bench::new(0b11);
        let mut pins = EncoderPins::new(bench.pin(0), bench.pin(1));
        let mut last = Ok(None);
        for _ in 0..2 {
            for sample in CW_DETENT {
                bench.push(&[sample]);
                block_on(pins.wait_for_edge()).unwrap();
                last = pins.sample_into(&mut enc);
            }
        }

        assert!(matches!(last, Err(DriverError::Push(PushError::Full(_)))));
        assert_eq!(enc.read_position(), 2);
    }
}
