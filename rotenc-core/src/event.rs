//! Input events delivered through the event queue

/// Rotation direction of a single decoded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// No movement has been decoded yet
    #[default]
    None,
    /// Position increased
    Clockwise,
    /// Position decreased
    CounterClockwise,
}

impl Direction {
    /// Direction of a signed step (-1, 0 or +1)
    pub fn from_delta(delta: i8) -> Self {
        match delta.signum() {
            1 => Direction::Clockwise,
            -1 => Direction::CounterClockwise,
            _ => Direction::None,
        }
    }

    /// Returns the direction as a signed delta (-1, 0, or +1)
    pub fn delta(&self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
            Direction::None => 0,
        }
    }

    /// Opposite sense of rotation
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::None => Direction::None,
        }
    }
}

/// Events produced by the encoder and its button
///
/// Events are plain values: once pushed they belong to the queue, and each
/// one is handed to exactly one consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The encoder moved by one step
    PositionChanged {
        /// Position after the step (after any wraparound reset)
        position: i32,
        /// Direction of the step, after any configured flip
        direction: Direction,
    },
    /// Button press confirmed by the debouncer
    ButtonPressed,
    /// Button release confirmed by the debouncer
    ButtonReleased,
}

impl Event {
    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, Event::PositionChanged { .. })
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(self, Event::ButtonPressed | Event::ButtonReleased)
    }
}
