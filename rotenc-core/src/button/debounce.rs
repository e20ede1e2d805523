//! Time-based debounce engine
//!
//! A change away from the stable level starts a timer. The change commits
//! only if the level is still at the new value once the interval has elapsed.
//! If it reverts first, the pending change is discarded without an event.
//!
//! ```text
//! Stable(level) --change--> Pending(candidate, since)
//! Pending --revert--> Stable(level)
//! Pending --held >= interval--> Stable(candidate) + edge
//! ```

use embassy_time::{Duration, Instant};

/// Debounced button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Stable, not pressed
    Released,
    /// Stable, pressed
    Pressed,
    /// A change is waiting for the debounce interval
    Debouncing,
}

/// A committed change of the debounced level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// Button went down
    Pressed,
    /// Button came up
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Stable,
    Pending { candidate: bool, since: Instant },
}

/// Debouncer for one button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Last committed level (true = pressed)
    pressed: bool,
    phase: Phase,
    interval: Duration,
}

impl Debouncer {
    /// Create a debouncer; the button is assumed released until observed
    pub fn new(interval: Duration) -> Self {
        Self {
            pressed: false,
            phase: Phase::Stable,
            interval,
        }
    }

    /// Feed one sample taken at `now`
    ///
    /// Returns an edge when a change has been held for the full interval.
    pub fn sample(&mut self, pressed: bool, now: Instant) -> Option<ButtonEdge> {
        match self.phase {
            Phase::Stable => {
                if pressed != self.pressed {
                    self.phase = Phase::Pending {
                        candidate: pressed,
                        since: now,
                    };
                }
                None
            }
            Phase::Pending { candidate, since } => {
                if pressed != candidate {
                    // Bounced back before the interval elapsed
                    self.phase = Phase::Stable;
                    return None;
                }

                if now.saturating_duration_since(since) < self.interval {
                    return None;
                }

                self.pressed = candidate;
                self.phase = Phase::Stable;
                Some(if candidate {
                    ButtonEdge::Pressed
                } else {
                    ButtonEdge::Released
                })
            }
        }
    }

    /// When a pending change can commit, if one is pending
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Pending { since, .. } => Some(since + self.interval),
            Phase::Stable => None,
        }
    }

    /// Current debounced state
    pub fn state(&self) -> ButtonState {
        match (self.phase, self.pressed) {
            (Phase::Pending { .. }, _) => ButtonState::Debouncing,
            (Phase::Stable, true) => ButtonState::Pressed,
            (Phase::Stable, false) => ButtonState::Released,
        }
    }

    /// Debounce interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
