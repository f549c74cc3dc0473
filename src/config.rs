//! Timing configuration and defaults.
//!
//! All values are milliseconds. The defaults suit a typical tactile switch
//! polled every millisecond or so.
//!
//! # Preconditions
//!
//! For the two-speed and accelerating policies the accelerate-after
//! threshold must be greater than the initial repeat delay. Constructors and
//! setters only check this with `debug_assert!`; firmware that takes timing
//! from an untrusted source should call [`RepeatConfig::validate`] first.

use crate::repeat::RepeatPolicy;

// =============================================================================
// Defaults
// =============================================================================

/// Settle window before a raw transition is trusted.
pub const DEBOUNCE_MS: u32 = 50;

/// Hold time before autorepeat starts.
pub const REPEAT_DELAY_MS: u32 = 500;

/// Autorepeat period.
pub const REPEAT_PERIOD_MS: u32 = 200;

/// Hold time after which two-speed repeat switches to the fast period.
/// Also stored by the accelerating policy.
pub const ACCELERATE_AFTER_MS: u32 = 2000;

/// Fast autorepeat period of the two-speed policy.
pub const FAST_PERIOD_MS: u32 = 50;

/// Amount the accelerating policy shortens its period on every repeat.
pub const ACCELERATION_STEP_MS: u32 = 10;

/// Floor period of the accelerating policy, added to the shrinking period.
pub const MIN_PERIOD_MS: u32 = 20;

// =============================================================================
// Configuration
// =============================================================================

/// Timing shared by every autorepeat policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatConfig {
    /// Debounce settle window.
    pub debounce_ms: u32,
    /// Held time before the first repeat.
    pub initial_delay_ms: u32,
    /// Base repeat period.
    pub period_ms: u32,
}

impl RepeatConfig {
    pub const fn new(debounce_ms: u32, initial_delay_ms: u32, period_ms: u32) -> Self {
        Self {
            debounce_ms,
            initial_delay_ms,
            period_ms,
        }
    }

    /// Check the configuration against the policy it will be used with.
    pub fn validate(&self, policy: &RepeatPolicy) -> Result<(), ConfigError> {
        policy.validate(self.initial_delay_ms)
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS, REPEAT_DELAY_MS, REPEAT_PERIOD_MS)
    }
}

/// Configuration rejected by [`RepeatConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("accelerate-after ({accelerate_after_ms} ms) must exceed the repeat delay ({initial_delay_ms} ms)")]
    AccelerateBeforeRepeat {
        accelerate_after_ms: u32,
        initial_delay_ms: u32,
    },
}
