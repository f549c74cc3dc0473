//! Autorepeat timing.
//!
//! [`AutoRepeat`] consumes the [`Hold`] reported by the held tracker every
//! poll and decides whether a key-press event fires. The first event of a
//! press (the primary press) fires on the poll where the press settles.
//! While the button stays held past the initial delay, further events fire
//! according to the [`RepeatPolicy`]:
//!
//! | Policy | Fires again when `now - last_fire` exceeds |
//! |---|---|
//! | `Fixed` | `period` |
//! | `TwoSpeed` | `fast_period` once held past `accelerate_after`, else `period` |
//! | `Accelerating` | `current_period + min_period`, where `current_period` shrinks by `step` per repeat |
//!
//! Timing is wall-clock driven. If polling stalls, the first poll afterwards
//! fires at most one catch-up event.

use crate::config::{ACCELERATE_AFTER_MS, ACCELERATION_STEP_MS, ConfigError, FAST_PERIOD_MS, MIN_PERIOD_MS};
use crate::held::Hold;
use crate::time::elapsed_ms;

/// Which kind of key-press event fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyPress {
    /// First event of a physical press.
    Press,
    /// Synthesized autorepeat event.
    Repeat,
}

/// Autorepeat acceleration behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepeatPolicy {
    /// Repeat at the base period for as long as the button is held.
    #[default]
    Fixed,
    /// Switch from the base period to `fast_period_ms` once held longer
    /// than `accelerate_after_ms`.
    TwoSpeed {
        accelerate_after_ms: u32,
        fast_period_ms: u32,
    },
    /// Shorten the period by `step_ms` on every repeat, on top of a fixed
    /// `min_period_ms` floor.
    ///
    /// `accelerate_after_ms` is carried for configuration symmetry and
    /// validated, but acceleration starts with the first repeat.
    Accelerating {
        accelerate_after_ms: u32,
        step_ms: u32,
        min_period_ms: u32,
    },
}

impl RepeatPolicy {
    /// Two-speed policy with default thresholds.
    pub const fn two_speed() -> Self {
        Self::TwoSpeed {
            accelerate_after_ms: ACCELERATE_AFTER_MS,
            fast_period_ms: FAST_PERIOD_MS,
        }
    }

    /// Accelerating policy with default step and floor.
    pub const fn accelerating() -> Self {
        Self::Accelerating {
            accelerate_after_ms: ACCELERATE_AFTER_MS,
            step_ms: ACCELERATION_STEP_MS,
            min_period_ms: MIN_PERIOD_MS,
        }
    }

    /// Accelerate-after threshold, if the policy has one.
    pub const fn accelerate_after_ms(&self) -> Option<u32> {
        match *self {
            Self::Fixed => None,
            Self::TwoSpeed { accelerate_after_ms, .. } | Self::Accelerating { accelerate_after_ms, .. } => {
                Some(accelerate_after_ms)
            }
        }
    }

    /// Check that acceleration starts after the initial repeat delay.
    pub fn validate(&self, initial_delay_ms: u32) -> Result<(), ConfigError> {
        match self.accelerate_after_ms() {
            Some(accelerate_after_ms) if accelerate_after_ms <= initial_delay_ms => {
                Err(ConfigError::AccelerateBeforeRepeat {
                    accelerate_after_ms,
                    initial_delay_ms,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Autorepeat state for one button.
#[derive(Clone, Copy, Debug)]
pub struct AutoRepeat {
    initial_delay_ms: u32,
    period_ms: u32,
    policy: RepeatPolicy,
    /// Primary press already reported for the current held session.
    fired_this_press: bool,
    last_fire_ms: u32,
    /// Shrinking period of the accelerating policy.
    current_period_ms: u32,
}

impl AutoRepeat {
    /// # Panics
    ///
    /// In debug builds, if `policy` accelerates before `initial_delay_ms`.
    pub fn new(initial_delay_ms: u32, period_ms: u32, policy: RepeatPolicy) -> Self {
        debug_assert!(
            policy.validate(initial_delay_ms).is_ok(),
            "accelerate-after must exceed the repeat delay"
        );
        Self {
            initial_delay_ms,
            period_ms,
            policy,
            fired_this_press: false,
            last_fire_ms: 0,
            current_period_ms: period_ms,
        }
    }

    /// Re-arm the primary press. Timing fields are reinitialised by the
    /// next primary press.
    pub fn reset(&mut self) {
        self.fired_this_press = false;
    }

    /// Advance one poll.
    ///
    /// Fires at most one event. Re-arms only on a settled release, so a
    /// cancelled release bounce does not produce a second primary press.
    pub fn tick(&mut self, hold: Hold, now_ms: u32) -> Option<KeyPress> {
        let held_ms = match hold {
            Hold::Held(ms) => ms,
            Hold::Settling => return None,
            Hold::Released => {
                self.fired_this_press = false;
                return None;
            }
        };

        if !self.fired_this_press {
            self.fired_this_press = true;
            self.last_fire_ms = now_ms;
            self.current_period_ms = self.period_ms;
            trace!("repeat: primary press at {}", now_ms);
            return Some(KeyPress::Press);
        }

        if held_ms <= self.initial_delay_ms {
            return None;
        }

        let interval_ms = match self.policy {
            RepeatPolicy::Fixed => self.period_ms,
            RepeatPolicy::TwoSpeed {
                accelerate_after_ms,
                fast_period_ms,
            } => {
                if held_ms > accelerate_after_ms {
                    fast_period_ms
                } else {
                    self.period_ms
                }
            }
            RepeatPolicy::Accelerating { min_period_ms, .. } => self.current_period_ms.saturating_add(min_period_ms),
        };

        if elapsed_ms(now_ms, self.last_fire_ms) <= interval_ms {
            return None;
        }

        if let RepeatPolicy::Accelerating { step_ms, .. } = self.policy
            && self.current_period_ms >= step_ms
        {
            self.current_period_ms -= step_ms;
        }
        self.last_fire_ms = now_ms;
        trace!("repeat: fired at {} (interval {})", now_ms, interval_ms);
        Some(KeyPress::Repeat)
    }

    #[inline]
    pub const fn policy(&self) -> RepeatPolicy {
        self.policy
    }

    /// Replace the policy. Takes effect on the next poll.
    ///
    /// # Panics
    ///
    /// In debug builds, if `policy` accelerates before the repeat delay.
    pub fn set_policy(&mut self, policy: RepeatPolicy) {
        debug_assert!(
            policy.validate(self.initial_delay_ms).is_ok(),
            "accelerate-after must exceed the repeat delay"
        );
        self.policy = policy;
    }

    #[inline]
    pub const fn initial_delay_ms(&self) -> u32 {
        self.initial_delay_ms
    }

    #[inline]
    pub fn set_initial_delay_ms(&mut self, initial_delay_ms: u32) {
        self.initial_delay_ms = initial_delay_ms;
    }

    #[inline]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[inline]
    pub fn set_period_ms(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    /// Current shrinking period of the accelerating policy. Equals the base
    /// period for the other policies.
    #[inline]
    pub const fn current_period_ms(&self) -> u32 {
        self.current_period_ms
    }

    /// Accelerate-after threshold, `None` for [`RepeatPolicy::Fixed`].
    #[inline]
    pub const fn accelerate_after_ms(&self) -> Option<u32> {
        self.policy.accelerate_after_ms()
    }

    /// Set the accelerate-after threshold. No effect on [`RepeatPolicy::Fixed`].
    ///
    /// # Panics
    ///
    /// In debug builds, if the threshold does not exceed the repeat delay.
    pub fn set_accelerate_after_ms(&mut self, ms: u32) {
        match &mut self.policy {
            RepeatPolicy::Fixed => {}
            RepeatPolicy::TwoSpeed { accelerate_after_ms, .. }
            | RepeatPolicy::Accelerating { accelerate_after_ms, .. } => {
                debug_assert!(ms > self.initial_delay_ms, "accelerate-after must exceed the repeat delay");
                *accelerate_after_ms = ms;
            }
        }
    }

    /// Fast period of [`RepeatPolicy::TwoSpeed`], `None` for the other policies.
    pub const fn fast_period_ms(&self) -> Option<u32> {
        match self.policy {
            RepeatPolicy::TwoSpeed { fast_period_ms, .. } => Some(fast_period_ms),
            _ => None,
        }
    }

    /// Set the fast period. Only affects [`RepeatPolicy::TwoSpeed`].
    pub fn set_fast_period_ms(&mut self, ms: u32) {
        if let RepeatPolicy::TwoSpeed { fast_period_ms, .. } = &mut self.policy {
            *fast_period_ms = ms;
        }
    }

    /// Per-repeat decrement of [`RepeatPolicy::Accelerating`].
    pub const fn step_ms(&self) -> Option<u32> {
        match self.policy {
            RepeatPolicy::Accelerating { step_ms, .. } => Some(step_ms),
            _ => None,
        }
    }

    /// Set the per-repeat decrement. Only affects [`RepeatPolicy::Accelerating`].
    pub fn set_step_ms(&mut self, ms: u32) {
        if let RepeatPolicy::Accelerating { step_ms, .. } = &mut self.policy {
            *step_ms = ms;
        }
    }

    /// Floor period of [`RepeatPolicy::Accelerating`].
    pub const fn min_period_ms(&self) -> Option<u32> {
        match self.policy {
            RepeatPolicy::Accelerating { min_period_ms, .. } => Some(min_period_ms),
            _ => None,
        }
    }

    /// Set the floor period. Only affects [`RepeatPolicy::Accelerating`].
    pub fn set_min_period_ms(&mut self, ms: u32) {
        if let RepeatPolicy::Accelerating { min_period_ms, .. } = &mut self.policy {
            *min_period_ms = ms;
        }
    }
}
