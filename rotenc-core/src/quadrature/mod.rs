//! Quadrature decoding
//!
//! Turns A/B level samples into validated steps and integrates them into a
//! signed position.

pub mod decoder;
pub mod position;

pub use decoder::{decode, EncoderState, QuadratureDecoder, RawLevels, Resolution};
pub use position::PositionAccumulator;
