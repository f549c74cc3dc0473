//! Held-duration tracking.
//!
//! Wraps a [`Debouncer`] and remembers when the current press became
//! trusted, so every poll can report how long the button has been held
//! instead of only reporting the edge.

use crate::config::DEBOUNCE_MS;
use crate::debounce::{Debouncer, Edge};
use crate::time::elapsed_ms;

/// Debounced hold state reported once per poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hold {
    /// Stably released.
    Released,
    /// A change (press or release) is waiting out the debounce window.
    Settling,
    /// Stably pressed for the given number of milliseconds.
    ///
    /// `Held(0)` is reported on the poll where the press is committed.
    Held(u32),
}

impl Hold {
    /// Held time in milliseconds, 0 unless stably pressed.
    #[inline]
    pub const fn duration_ms(self) -> u32 {
        match self {
            Self::Held(ms) => ms,
            Self::Released | Self::Settling => 0,
        }
    }

    #[inline]
    pub const fn is_held(self) -> bool {
        matches!(self, Self::Held(_))
    }
}

/// Debouncer plus the timestamp of the last committed press.
#[derive(Clone, Copy, Debug)]
pub struct HeldTracker {
    debouncer: Debouncer,
    pressed_at: u32,
}

impl HeldTracker {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            debouncer: Debouncer::new(window_ms),
            pressed_at: 0,
        }
    }

    /// Drop any pending transition or held session.
    pub fn reset(&mut self) {
        self.debouncer.reset();
    }

    #[inline]
    pub const fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    #[inline]
    pub fn set_window_ms(&mut self, window_ms: u32) {
        self.debouncer.set_window_ms(window_ms);
    }

    /// Feed one polarity-corrected sample taken at `now_ms`.
    ///
    /// A release bounce that is cancelled by the debouncer leaves the press
    /// start untouched, so the reported duration picks up where it was.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Hold {
        if self.debouncer.classify(pressed, now_ms) == Edge::Pressed {
            self.pressed_at = now_ms;
        }

        if self.debouncer.is_settling() {
            Hold::Settling
        } else if self.debouncer.is_pressed() {
            Hold::Held(elapsed_ms(now_ms, self.pressed_at))
        } else {
            Hold::Released
        }
    }
}

impl Default for HeldTracker {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_released() {
        let mut tracker = HeldTracker::new(50);
        assert_eq!(tracker.update(false, 0), Hold::Released);
        assert_eq!(tracker.update(false, 1000), Hold::Released);
    }

    #[test]
    fn test_settling_reports_zero() {
        let mut tracker = HeldTracker::new(50);
        let hold = tracker.update(true, 0);
        assert_eq!(hold, Hold::Settling);
        assert_eq!(hold.duration_ms(), 0);
        assert!(!hold.is_held());
    }

    #[test]
    fn test_duration_counts_from_commit() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);
        assert_eq!(tracker.update(true, 51), Hold::Held(0));
        assert_eq!(tracker.update(true, 52), Hold::Held(1));
        assert_eq!(tracker.update(true, 551), Hold::Held(500));
    }

    #[test]
    fn test_duration_is_monotonic_while_held() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);

        let mut last = 0;
        for now in (51..5000).step_by(7) {
            let hold = tracker.update(true, now);
            assert!(hold.is_held());
            assert!(hold.duration_ms() >= last);
            last = hold.duration_ms();
        }
    }

    #[test]
    fn test_release_settles_to_released() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);
        tracker.update(true, 51);

        assert_eq!(tracker.update(false, 100), Hold::Settling);
        assert_eq!(tracker.update(false, 150), Hold::Settling);
        assert_eq!(tracker.update(false, 151), Hold::Released);
        assert_eq!(tracker.update(false, 152), Hold::Released);
    }

    #[test]
    fn test_release_bounce_keeps_press_start() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);
        tracker.update(true, 51);

        // Contact chatter while held, back to pressed before the check
        assert_eq!(tracker.update(false, 200), Hold::Settling);
        assert_eq!(tracker.update(true, 210), Hold::Settling);
        assert_eq!(tracker.update(true, 251), Hold::Held(200));
    }

    #[test]
    fn test_new_press_restarts_duration() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);
        tracker.update(true, 51);
        tracker.update(false, 100);
        tracker.update(false, 151);

        tracker.update(true, 300);
        assert_eq!(tracker.update(true, 351), Hold::Held(0));
        assert_eq!(tracker.update(true, 400), Hold::Held(49));
    }

    #[test]
    fn test_duration_across_clock_wrap() {
        let mut tracker = HeldTracker::new(50);
        let start = u32::MAX - 100;
        tracker.update(true, start);
        tracker.update(true, start.wrapping_add(51));
        assert_eq!(tracker.update(true, start.wrapping_add(251)), Hold::Held(200));
    }

    #[test]
    fn test_reset_ends_held_session() {
        let mut tracker = HeldTracker::new(50);
        tracker.update(true, 0);
        tracker.update(true, 51);

        tracker.reset();
        assert!(!tracker.debouncer().is_pressed());
        // Still pressed after reset: a fresh press has to settle again
        assert_eq!(tracker.update(true, 60), Hold::Settling);
        assert_eq!(tracker.update(true, 111), Hold::Held(0));
    }

    #[test]
    fn test_default_uses_default_debounce() {
        let mut tracker = HeldTracker::default();
        assert_eq!(tracker.debouncer().window_ms(), DEBOUNCE_MS);
        tracker.update(true, 0);
        assert_eq!(tracker.update(true, DEBOUNCE_MS), Hold::Settling);
        assert_eq!(tracker.update(true, DEBOUNCE_MS + 1), Hold::Held(0));
    }
}
