//! Embassy async tasks
//!
//! Producers and the consumer only meet at the event queue.

pub mod button;
pub mod consumer;
pub mod encoder;

pub use button::button_task;
pub use consumer::consumer_task;
pub use encoder::encoder_task;
