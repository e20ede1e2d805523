//! Position accumulator
//!
//! Integrates decoder steps into a signed position. The direction flip is
//! applied here and only here, before the step touches the counter.

use crate::event::{Direction, Event};

/// Signed position counter with optional flip and wraparound reset
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionAccumulator {
    /// Current position
    position: i32,
    /// Reset to zero once |position| exceeds this value (0 = never)
    reset_at: u32,
    /// Negate every step
    flip: bool,
    /// Direction of the last applied step
    last_direction: Direction,
}

impl PositionAccumulator {
    /// Create an accumulator at position 0
    pub fn new(reset_at: u32, flip: bool) -> Self {
        Self {
            position: 0,
            reset_at,
            flip,
            last_direction: Direction::None,
        }
    }

    /// Apply one decoder step
    ///
    /// Returns a `PositionChanged` event for a non-zero step, `None` otherwise.
    pub fn apply(&mut self, step: i8) -> Option<Event> {
        if step == 0 {
            return None;
        }

        let delta = if self.flip { -step } else { step };
        let mut position = self.position.wrapping_add(delta as i32);

        if self.reset_at > 0 && position.unsigned_abs() > self.reset_at {
            position = 0;
        }

        let direction = Direction::from_delta(delta);
        self.position = position;
        self.last_direction = direction;

        Some(Event::PositionChanged {
            position,
            direction,
        })
    }

    /// Current position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Direction of the most recent step
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Reset threshold (0 = disabled)
    pub fn reset_at(&self) -> u32 {
        self.reset_at
    }

    /// Change the reset threshold; takes effect on the next step
    pub fn set_reset_at(&mut self, reset_at: u32) {
        self.reset_at = reset_at;
    }

    /// Whether steps are negated
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Reverse the sense of rotation
    pub fn toggle_flip(&mut self) {
        self.flip = !self.flip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_of(event: Option<Event>) -> Option<(i32, Direction)> {
        match event {
            Some(Event::PositionChanged {
                position,
                direction,
            }) => Some((position, direction)),
            _ => None,
        }
    }

    #[test]
    fn test_counts_steps() {
        let mut acc = PositionAccumulator::new(0, false);
        for expected in 1..=4 {
            let (position, direction) = position_of(acc.apply(1)).unwrap();
            assert_eq!(position, expected);
            assert_eq!(direction, Direction::Clockwise);
        }
        assert_eq!(acc.position(), 4);

        let (position, direction) = position_of(acc.apply(-1)).unwrap();
        assert_eq!(position, 3);
        assert_eq!(direction, Direction::CounterClockwise);
        assert_eq!(acc.last_direction(), Direction::CounterClockwise);
    }

    #[test]
    fn test_zero_step_emits_nothing() {
        let mut acc = PositionAccumulator::new(0, false);
        assert!(acc.apply(0).is_none());
        assert_eq!(acc.position(), 0);
        assert_eq!(acc.last_direction(), Direction::None);
    }

    #[test]
    fn test_flip_negates() {
        let mut plain = PositionAccumulator::new(0, false);
        let mut flipped = PositionAccumulator::new(0, true);

        for step in [1, 1, -1, 1] {
            let (p, d) = position_of(plain.apply(step)).unwrap();
            let (fp, fd) = position_of(flipped.apply(step)).unwrap();
            assert_eq!(fp, -p);
            assert_eq!(fd, d.flipped());
        }
    }

    #[test]
    fn test_toggle_flip_twice_restores() {
        let mut acc = PositionAccumulator::new(0, false);
        acc.toggle_flip();
        assert!(acc.is_flipped());
        acc.toggle_flip();
        assert!(!acc.is_flipped());
        assert_eq!(position_of(acc.apply(1)), Some((1, Direction::Clockwise)));
    }

    #[test]
    fn test_reset_when_exceeded() {
        let mut acc = PositionAccumulator::new(3, false);
        for _ in 0..3 {
            acc.apply(1);
        }
        assert_eq!(acc.position(), 3);

        // 4 > 3: wraps to zero and reports it
        assert_eq!(position_of(acc.apply(1)), Some((0, Direction::Clockwise)));
        assert_eq!(acc.position(), 0);
    }

    #[test]
    fn test_reset_negative() {
        let mut acc = PositionAccumulator::new(2, false);
        acc.apply(-1);
        acc.apply(-1);
        assert_eq!(
            position_of(acc.apply(-1)),
            Some((0, Direction::CounterClockwise))
        );
    }

    #[test]
    fn test_threshold_change() {
        let mut acc = PositionAccumulator::new(0, false);
        for _ in 0..10 {
            acc.apply(1);
        }
        acc.set_reset_at(5);
        assert_eq!(acc.reset_at(), 5);
        assert_eq!(position_of(acc.apply(1)), Some((0, Direction::Clockwise)));
    }
}
