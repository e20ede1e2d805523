//! Event consumer task
//!
//! Drains the event queue in order and logs each event. A quiet period only
//! produces a trace line with the current position.

use defmt::*;
use embassy_time::Duration;
use portable_atomic::Ordering;

use rotenc_core::{Event, PopError};

use crate::channels::{EVENT_QUEUE, POSITION};
use crate::config::CONSUMER_TIMEOUT_MS;

#[embassy_executor::task]
pub async fn consumer_task() {
    info!("Consumer task started");

    let timeout = Duration::from_millis(CONSUMER_TIMEOUT_MS);

    loop {
        match EVENT_QUEUE.pop(timeout).await {
            Ok(Event::PositionChanged {
                position,
                direction,
            }) => {
                info!("Position {} ({})", position, direction);
            }
            Ok(Event::ButtonPressed) => info!("Button pressed"),
            Ok(Event::ButtonReleased) => info!("Button released"),
            Err(PopError::Timeout) => {
                trace!("No input, position {}", POSITION.load(Ordering::Relaxed));
            }
            Err(PopError::Closed) => {
                info!("Event queue closed, consumer stopping");
                return;
            }
        }
    }
}
