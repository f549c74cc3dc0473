//! Settle-window debouncing.
//!
//! A change of the raw input starts a settle window. When the window has
//! elapsed the input is sampled again: if it still differs from the last
//! trusted state the change is committed, otherwise the bounce is dropped.
//! Sampling at commit time rather than at detection time means a contact
//! that bounces back to its original level never produces an edge.

use crate::config::DEBOUNCE_MS;
use crate::time::elapsed_ms;

/// Result of classifying one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Nothing was committed by this sample.
    #[default]
    NoChange,
    /// The button became stably pressed.
    Pressed,
    /// The button became stably released.
    Released,
}

/// Debounce state for one logical input.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window_ms: u32,
    /// Last trusted pressed state.
    stable: bool,
    /// A change was seen and the window has not been checked yet.
    settling: bool,
    /// When the pending change was first seen.
    transition_at: u32,
}

impl Debouncer {
    /// Create a debouncer in the released state.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            stable: false,
            settling: false,
            transition_at: 0,
        }
    }

    /// Drop any pending transition and return to the released state.
    pub fn reset(&mut self) {
        self.stable = false;
        self.settling = false;
    }

    #[inline]
    pub const fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Change the settle window. Applies from the next sample.
    #[inline]
    pub fn set_window_ms(&mut self, window_ms: u32) {
        self.window_ms = window_ms;
    }

    /// Last trusted pressed state.
    #[inline]
    pub const fn is_pressed(&self) -> bool {
        self.stable
    }

    /// True while a detected change is waiting out its window.
    #[inline]
    pub const fn is_settling(&self) -> bool {
        self.settling
    }

    /// Feed one polarity-corrected sample taken at `now_ms`.
    pub fn classify(&mut self, pressed: bool, now_ms: u32) -> Edge {
        if !self.settling {
            if pressed != self.stable {
                self.settling = true;
                self.transition_at = now_ms;
                trace!("debounce: settle started at {}", now_ms);
            }
            return Edge::NoChange;
        }

        if elapsed_ms(now_ms, self.transition_at) <= self.window_ms {
            return Edge::NoChange;
        }

        self.settling = false;
        if pressed == self.stable {
            trace!("debounce: bounce cancelled at {}", now_ms);
            return Edge::NoChange;
        }

        self.stable = pressed;
        let edge = if pressed { Edge::Pressed } else { Edge::Released };
        debug!("debounce: {} at {}", edge, now_ms);
        edge
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}
