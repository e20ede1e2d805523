//! rotenc - rotary encoder demo firmware
//!
//! Reads a quadrature encoder with a push switch on an RP2040 and logs the
//! resulting event stream over defmt RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use portable_atomic::Ordering;
use {defmt_rtt as _, panic_probe as _};

use rotenc_core::{GpioAllocator, RotaryInput};
use rotenc_drivers::{ButtonPin, EncoderPins};

use crate::channels::{EVENT_QUEUE, POSITION};

mod channels;
mod config;
mod tasks;

// `main` hands PIN_2/PIN_3/PIN_4 to the tasks; the allocator only sees config.rs
const _: () = assert!(
    config::ENCODER_A_GPIO == 2 && config::ENCODER_B_GPIO == 3,
    "encoder pins in config.rs do not match the peripherals wired in main"
);
const _: () = assert!(
    matches!(config::BUTTON_GPIO, Some(4) | None),
    "button pin in config.rs does not match the peripheral wired in main"
);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rotenc firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Claim pins and build the producers; a bad board config is fatal
    let mut gpio = GpioAllocator::new(config::GPIO_COUNT);
    let RotaryInput {
        mut encoder,
        button,
    } = unwrap!(RotaryInput::init(
        &config::rotary_config(),
        &mut gpio,
        &EVENT_QUEUE
    ));
    encoder.publish_position(&POSITION);
    info!(
        "Input configured: {} pins claimed, queue capacity {}",
        gpio.claimed_count(),
        EVENT_QUEUE.capacity()
    );

    // Setup encoder (GPIO2=A, GPIO3=B, GPIO4=switch), checked against config.rs above
    let pins = EncoderPins::new(Input::new(p.PIN_2, Pull::Up), Input::new(p.PIN_3, Pull::Up));

    spawner.spawn(tasks::consumer_task()).unwrap();
    spawner.spawn(tasks::encoder_task(pins, encoder)).unwrap();

    if let Some(button) = button {
        let pull = if button.is_active_low() {
            Pull::Up
        } else {
            Pull::Down
        };
        let pin = ButtonPin::new(Input::new(p.PIN_4, pull));
        spawner.spawn(tasks::button_task(pin, button)).unwrap();
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Main loop heartbeat, position {}",
            POSITION.load(Ordering::Relaxed)
        );
    }
}
