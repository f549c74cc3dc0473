//! Millisecond time base.
//!
//! All timestamps are `u32` milliseconds from a free-running counter. The
//! counter is allowed to wrap (every ~49.7 days); intervals are always taken
//! with [`elapsed_ms`], which stays correct across the wrap as long as the
//! measured interval itself fits in a `u32`.

/// Source of the current time in milliseconds.
///
/// Must be monotonically non-decreasing, apart from the `u32` wrap.
pub trait Clock {
    /// Current counter value in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    #[inline]
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Milliseconds from `since` to `now`, tolerant of counter wraparound.
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Clock backed by the embassy time driver.
///
/// Truncates the 64-bit tick count to `u32` milliseconds, which wraps the
/// same way a hardware millisecond counter would.
#[cfg(feature = "embassy-time")]
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
