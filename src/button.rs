//! Plain debounced push button.
//!
//! [`PushButton`] owns the input pin and a clock and reports debounced
//! press/release edges. Call [`PushButton::poll`] once per loop iteration.
//!
//! ```ignore
//! let mut button = PushButton::new(pin, Polarity::ActiveLow, EmbassyClock);
//! loop {
//!     match button.poll()? {
//!         Edge::Pressed => led.set_high(),
//!         Edge::Released => led.set_low(),
//!         Edge::NoChange => {}
//!     }
//! }
//! ```

use embedded_hal::digital::InputPin;

use crate::config::DEBOUNCE_MS;
use crate::debounce::{Debouncer, Edge};
use crate::input::{Polarity, PolarizedPin};
use crate::time::Clock;

/// Debounced button emitting [`Edge`]s.
pub struct PushButton<P, K> {
    input: PolarizedPin<P>,
    clock: K,
    debouncer: Debouncer,
}

impl<P, K> PushButton<P, K>
where
    P: InputPin,
    K: Clock,
{
    /// Create a button with the default debounce window.
    ///
    /// The pin must already be configured as an input with the pull
    /// matching `polarity` (pull-up for [`Polarity::ActiveLow`]).
    pub fn new(pin: P, polarity: Polarity, clock: K) -> Self {
        Self::with_debounce(pin, polarity, clock, DEBOUNCE_MS)
    }

    pub fn with_debounce(pin: P, polarity: Polarity, clock: K, debounce_ms: u32) -> Self {
        Self {
            input: PolarizedPin::new(pin, polarity),
            clock,
            debouncer: Debouncer::new(debounce_ms),
        }
    }

    /// Return to the released state, discarding any pending transition.
    ///
    /// Safe to call at any time, e.g. after changing the debounce window.
    pub fn init(&mut self) {
        self.debouncer.reset();
        debug!("button: init");
    }

    /// Sample the pin and classify the result. Never blocks.
    pub fn poll(&mut self) -> Result<Edge, P::Error> {
        let pressed = self.input.is_pressed()?;
        Ok(self.debouncer.classify(pressed, self.clock.now_ms()))
    }

    /// Instantaneous pressed state, not debounced.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        self.input.is_pressed()
    }

    /// Last debounced pressed state.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.debouncer.is_pressed()
    }

    #[inline]
    pub fn debounce_ms(&self) -> u32 {
        self.debouncer.window_ms()
    }

    /// Change the debounce window. Applies from the next poll.
    #[inline]
    pub fn set_debounce_ms(&mut self, debounce_ms: u32) {
        self.debouncer.set_window_ms(debounce_ms);
    }

    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.input.polarity()
    }

    /// Give back the pin and clock.
    pub fn release(self) -> (P, K) {
        (self.input.release(), self.clock)
    }
}
