//! Push button with autorepeat.
//!
//! [`AutoRepeatButton`] runs the pin through the held tracker and the
//! repeat policy on every poll, and invokes the registered callback for
//! the primary press and for every synthesized repeat.
//!
//! The callback type defaults to `fn()`, which keeps the button nameable in
//! a `static` and lets the callback be swapped at runtime:
//!
//! ```ignore
//! fn volume_up() { /* ... */ }
//!
//! let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
//!     pin,
//!     Polarity::ActiveLow,
//!     EmbassyClock,
//!     RepeatConfig::default(),
//!     RepeatPolicy::accelerating(),
//! );
//! button.register_callback(volume_up);
//! loop {
//!     button.poll()?;
//! }
//! ```

use embedded_hal::digital::InputPin;

use crate::callback::Callback;
use crate::config::RepeatConfig;
use crate::held::{Hold, HeldTracker};
use crate::input::{Polarity, PolarizedPin};
use crate::repeat::{AutoRepeat, KeyPress, RepeatPolicy};
use crate::time::Clock;

/// Debounced button that fires a callback on press and while held.
pub struct AutoRepeatButton<P, K, C = fn()> {
    input: PolarizedPin<P>,
    clock: K,
    tracker: HeldTracker,
    repeat: AutoRepeat,
    callback: Option<C>,
    /// Hold state computed by the last poll.
    hold: Hold,
}

impl<P, K, C> AutoRepeatButton<P, K, C>
where
    P: InputPin,
    K: Clock,
    C: Callback,
{
    /// Create a button without a callback.
    ///
    /// # Panics
    ///
    /// In debug builds, if `policy` accelerates before `config.initial_delay_ms`.
    pub fn new(pin: P, polarity: Polarity, clock: K, config: RepeatConfig, policy: RepeatPolicy) -> Self {
        Self {
            input: PolarizedPin::new(pin, polarity),
            clock,
            tracker: HeldTracker::new(config.debounce_ms),
            repeat: AutoRepeat::new(config.initial_delay_ms, config.period_ms, policy),
            callback: None,
            hold: Hold::Released,
        }
    }

    /// Builder form of [`register_callback`](Self::register_callback).
    pub fn with_callback(mut self, callback: C) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Set the action invoked for every key-press event, replacing any
    /// previous one.
    pub fn register_callback(&mut self, callback: C) {
        self.callback = Some(callback);
    }

    /// Remove the callback. Polling continues to track state and report
    /// events through the return value.
    pub fn clear_callback(&mut self) -> Option<C> {
        self.callback.take()
    }

    /// Return to idle, discarding any pending transition or held session.
    ///
    /// Safe to call at any time, e.g. after changing the debounce window.
    pub fn init(&mut self) {
        self.tracker.reset();
        self.repeat.reset();
        self.hold = Hold::Released;
        debug!("autorepeat: init");
    }

    /// Sample the pin, advance the timing and invoke the callback if an
    /// event fired. Never blocks. Fires at most one event per call.
    pub fn poll(&mut self) -> Result<Option<KeyPress>, P::Error> {
        let pressed = self.input.is_pressed()?;
        let now_ms = self.clock.now_ms();

        self.hold = self.tracker.update(pressed, now_ms);
        let fired = self.repeat.tick(self.hold, now_ms);

        if fired.is_some()
            && let Some(callback) = self.callback.as_mut()
        {
            callback.call();
        }
        Ok(fired)
    }

    /// Held time computed by the last poll; 0 when released or settling.
    #[inline]
    pub fn held_duration_ms(&self) -> u32 {
        self.hold.duration_ms()
    }

    /// Hold state computed by the last poll.
    #[inline]
    pub fn hold(&self) -> Hold {
        self.hold
    }

    /// Last debounced pressed state.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.tracker.debouncer().is_pressed()
    }

    /// Instantaneous pressed state, not debounced.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        self.input.is_pressed()
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.input.polarity()
    }

    #[inline]
    pub fn repeat(&self) -> &AutoRepeat {
        &self.repeat
    }

    // =========================================================================
    // Configuration (each setter applies from the next poll)
    // =========================================================================

    #[inline]
    pub fn debounce_ms(&self) -> u32 {
        self.tracker.debouncer().window_ms()
    }

    pub fn set_debounce_ms(&mut self, debounce_ms: u32) {
        self.tracker.set_window_ms(debounce_ms);
    }

    #[inline]
    pub fn repeat_delay_ms(&self) -> u32 {
        self.repeat.initial_delay_ms()
    }

    pub fn set_repeat_delay_ms(&mut self, delay_ms: u32) {
        self.repeat.set_initial_delay_ms(delay_ms);
    }

    #[inline]
    pub fn repeat_period_ms(&self) -> u32 {
        self.repeat.period_ms()
    }

    pub fn set_repeat_period_ms(&mut self, period_ms: u32) {
        self.repeat.set_period_ms(period_ms);
    }

    #[inline]
    pub fn policy(&self) -> RepeatPolicy {
        self.repeat.policy()
    }

    /// # Panics
    ///
    /// In debug builds, if `policy` accelerates before the repeat delay.
    pub fn set_policy(&mut self, policy: RepeatPolicy) {
        self.repeat.set_policy(policy);
    }

    /// `None` for [`RepeatPolicy::Fixed`].
    #[inline]
    pub fn accelerate_after_ms(&self) -> Option<u32> {
        self.repeat.accelerate_after_ms()
    }

    /// # Panics
    ///
    /// In debug builds, if `ms` does not exceed the repeat delay.
    pub fn set_accelerate_after_ms(&mut self, ms: u32) {
        self.repeat.set_accelerate_after_ms(ms);
    }

    /// `None` unless the policy is [`RepeatPolicy::TwoSpeed`].
    #[inline]
    pub fn fast_period_ms(&self) -> Option<u32> {
        self.repeat.fast_period_ms()
    }

    pub fn set_fast_period_ms(&mut self, ms: u32) {
        self.repeat.set_fast_period_ms(ms);
    }

    /// `None` unless the policy is [`RepeatPolicy::Accelerating`].
    #[inline]
    pub fn acceleration_step_ms(&self) -> Option<u32> {
        self.repeat.step_ms()
    }

    pub fn set_acceleration_step_ms(&mut self, ms: u32) {
        self.repeat.set_step_ms(ms);
    }

    /// `None` unless the policy is [`RepeatPolicy::Accelerating`].
    #[inline]
    pub fn min_period_ms(&self) -> Option<u32> {
        self.repeat.min_period_ms()
    }

    pub fn set_min_period_ms(&mut self, ms: u32) {
        self.repeat.set_min_period_ms(ms);
    }

    /// Give back the pin, clock and callback.
    pub fn release(self) -> (P, K, Option<C>) {
        (self.input.release(), self.clock, self.callback)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};

    use super::*;

    /// Active-low mock pin pressed for the polls in `press` (by poll index).
    fn pin_pressed_for(polls: usize, press: core::ops::Range<usize>) -> PinMock {
        let expectations: Vec<_> = (0..polls)
            .map(|i| PinTransaction::get(if press.contains(&i) { PinState::Low } else { PinState::High }))
            .collect();
        PinMock::new(&expectations)
    }

    #[test]
    fn test_callback_fires_for_press_and_repeats() {
        // One poll per 10 ms, pressed for the first second
        let mut pin = pin_pressed_for(150, 0..100);
        let now = Cell::new(0u32);
        let count = Cell::new(0u32);
        let mut button = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::Fixed,
        )
        .with_callback(|| count.set(count.get() + 1));

        let mut fired = Vec::new();
        for i in 0..150u32 {
            now.set(i * 10);
            if let Some(press) = button.poll().unwrap() {
                fired.push((now.get(), press));
            }
        }

        assert_eq!(
            fired,
            vec![
                (60, KeyPress::Press),
                (570, KeyPress::Repeat),
                (780, KeyPress::Repeat),
                (990, KeyPress::Repeat),
            ]
        );
        assert_eq!(count.get(), 4);
        assert_eq!(button.held_duration_ms(), 0);
        assert!(!button.is_held());

        pin.done();
    }

    #[test]
    fn test_poll_without_callback() {
        let mut pin = pin_pressed_for(2, 0..2);
        let now = Cell::new(0u32);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::Fixed,
        );

        assert_eq!(button.poll().unwrap(), None);
        now.set(51);
        assert_eq!(button.poll().unwrap(), Some(KeyPress::Press));

        pin.done();
    }

    #[test]
    fn test_callback_can_be_replaced_and_cleared() {
        static FIRST: AtomicCount = AtomicCount::new();
        static SECOND: AtomicCount = AtomicCount::new();

        fn first() {
            FIRST.bump();
        }
        fn second() {
            SECOND.bump();
        }

        // One press settled at 51 ms, released from poll index 2
        let mut pin = pin_pressed_for(9, 0..2);
        let now = Cell::new(0u32);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::Fixed,
        );

        button.register_callback(first);
        button.poll().unwrap();
        now.set(51);
        button.poll().unwrap();
        assert_eq!(FIRST.get(), 1);

        // Release (pin high from poll index 2)
        now.set(100);
        button.poll().unwrap();
        now.set(151);
        button.poll().unwrap();

        button.register_callback(second);
        button.init();
        assert!(button.clear_callback().is_some());
        assert!(button.clear_callback().is_none());
        for t in [200, 251, 300, 400, 500] {
            now.set(t);
            button.poll().unwrap();
        }
        assert_eq!(FIRST.get(), 1);
        assert_eq!(SECOND.get(), 0);

        pin.done();
    }

    #[test]
    fn test_callback_rebound_during_held_press() {
        static OLD: AtomicCount = AtomicCount::new();
        static NEW: AtomicCount = AtomicCount::new();

        fn on_old() {
            OLD.bump();
        }
        fn on_new() {
            NEW.bump();
        }

        let mut pin = pin_pressed_for(4, 0..4);
        let now = Cell::new(0u32);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::Fixed,
        );
        button.register_callback(on_old);

        button.poll().unwrap();
        now.set(51);
        assert_eq!(button.poll().unwrap(), Some(KeyPress::Press));

        // Swap while still held, the repeats go to the new callback
        button.register_callback(on_new);
        now.set(600);
        assert_eq!(button.poll().unwrap(), Some(KeyPress::Repeat));
        now.set(900);
        assert_eq!(button.poll().unwrap(), Some(KeyPress::Repeat));

        assert_eq!(OLD.get(), 1);
        assert_eq!(NEW.get(), 2);

        pin.done();
    }

    #[test]
    fn test_held_duration_reported_per_poll() {
        let mut pin = pin_pressed_for(4, 0..4);
        let now = Cell::new(0u32);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::Fixed,
        );

        button.poll().unwrap();
        assert_eq!(button.hold(), Hold::Settling);
        assert_eq!(button.held_duration_ms(), 0);

        now.set(51);
        button.poll().unwrap();
        assert_eq!(button.hold(), Hold::Held(0));

        now.set(151);
        button.poll().unwrap();
        assert_eq!(button.held_duration_ms(), 100);

        // Reinitialising drops the held session
        button.init();
        assert_eq!(button.held_duration_ms(), 0);
        now.set(200);
        button.poll().unwrap();
        assert_eq!(button.hold(), Hold::Settling);

        pin.done();
    }

    #[test]
    fn test_configuration_accessors() {
        let mut pin = pin_pressed_for(0, 0..0);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveHigh,
            || 0u32,
            RepeatConfig::new(30, 400, 150),
            RepeatPolicy::two_speed(),
        );

        assert_eq!(button.polarity(), Polarity::ActiveHigh);
        assert_eq!(button.debounce_ms(), 30);
        assert_eq!(button.repeat_delay_ms(), 400);
        assert_eq!(button.repeat_period_ms(), 150);
        assert_eq!(button.accelerate_after_ms(), Some(2000));
        assert_eq!(button.fast_period_ms(), Some(50));
        assert_eq!(button.acceleration_step_ms(), None);

        button.set_debounce_ms(10);
        button.set_repeat_delay_ms(300);
        button.set_repeat_period_ms(100);
        button.set_accelerate_after_ms(1000);
        button.set_fast_period_ms(40);
        assert_eq!(button.debounce_ms(), 10);
        assert_eq!(button.repeat_delay_ms(), 300);
        assert_eq!(button.repeat_period_ms(), 100);
        assert_eq!(button.accelerate_after_ms(), Some(1000));
        assert_eq!(button.fast_period_ms(), Some(40));

        button.set_policy(RepeatPolicy::accelerating());
        button.set_acceleration_step_ms(5);
        button.set_min_period_ms(25);
        assert_eq!(button.acceleration_step_ms(), Some(5));
        assert_eq!(button.min_period_ms(), Some(25));
        assert_eq!(button.fast_period_ms(), None);

        pin.done();
    }

    #[test]
    fn test_accelerating_button_speeds_up() {
        let polls = 3000;
        let mut pin = pin_pressed_for(polls, 0..polls);
        let now = Cell::new(0u32);
        let mut button: AutoRepeatButton<_, _> = AutoRepeatButton::new(
            pin.clone(),
            Polarity::ActiveLow,
            || now.get(),
            RepeatConfig::default(),
            RepeatPolicy::accelerating(),
        );

        let mut times = Vec::new();
        for t in 0..polls as u32 {
            now.set(t);
            if button.poll().unwrap() == Some(KeyPress::Repeat) {
                times.push(t);
            }
        }

        let gaps: Vec<_> = times.windows(2).map(|w| w[1] - w[0]).collect();
        assert!(gaps.len() > 5);
        assert!(gaps[1] < gaps[0]);
        assert!(gaps.windows(2).all(|w| w[1] <= w[0]));
        assert!(button.repeat().current_period_ms() < button.repeat_period_ms());

        pin.done();
    }

    /// Counter usable from a plain `fn()` callback.
    struct AtomicCount(core::sync::atomic::AtomicU32);

    impl AtomicCount {
        const fn new() -> Self {
            Self(core::sync::atomic::AtomicU32::new(0))
        }

        fn bump(&self) {
            self.0.fetch_add(1, core::sync::atomic::Ordering::Relaxed);
        }

        fn get(&self) -> u32 {
            self.0.load(core::sync::atomic::Ordering::Relaxed)
        }
    }
}
