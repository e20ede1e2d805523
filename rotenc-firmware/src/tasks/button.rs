//! Button task
//!
//! Debounces the encoder push switch and pushes press/release events.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use rotenc_core::Button;
use rotenc_drivers::ButtonPin;

use crate::channels::EVENT_QUEUE_SIZE;

pub type EncoderButton = Button<'static, CriticalSectionRawMutex, EVENT_QUEUE_SIZE>;

#[embassy_executor::task]
pub async fn button_task(mut pin: ButtonPin<Input<'static>>, mut button: EncoderButton) {
    info!(
        "Button task started (GPIO{}, active_low={})",
        button.pin().number(),
        button.is_active_low()
    );

    pin.run(&mut button).await
}
