//! Encoder task
//!
//! Owns the A/B inputs and the encoder state. Every edge is decoded here;
//! completed steps go to the event queue.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use rotenc_core::RotaryEncoder;
use rotenc_drivers::EncoderPins;

use crate::channels::EVENT_QUEUE_SIZE;

pub type Encoder = RotaryEncoder<'static, CriticalSectionRawMutex, EVENT_QUEUE_SIZE>;

#[embassy_executor::task]
pub async fn encoder_task(mut pins: EncoderPins<Input<'static>, Input<'static>>, mut encoder: Encoder) {
    let (a, b) = encoder.pins();
    info!(
        "Encoder task started (A=GPIO{}, B=GPIO{}, {})",
        a.number(),
        b.number(),
        encoder.resolution()
    );

    pins.run(&mut encoder).await
}
