//! Raw input normalisation.
//!
//! Buttons are wired either to ground (pull-up, reads low when pressed) or
//! to the supply (pull-down, reads high when pressed). [`Polarity`] records
//! which, and [`PolarizedPin`] turns the pin level into a logical "pressed"
//! value before any debounce logic sees it.

use embedded_hal::digital::InputPin;

/// How the button is physically wired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Button connects the pin to ground; needs a pull-up. Low means pressed.
    #[default]
    ActiveLow,
    /// Button connects the pin to the supply; needs a pull-down. High means pressed.
    ActiveHigh,
}

impl Polarity {
    /// Map a pin level to the logical pressed state.
    #[inline]
    pub const fn is_pressed(self, level_high: bool) -> bool {
        match self {
            Self::ActiveLow => !level_high,
            Self::ActiveHigh => level_high,
        }
    }
}

/// An input pin read through a fixed [`Polarity`].
pub struct PolarizedPin<P> {
    pin: P,
    polarity: Polarity,
}

impl<P> PolarizedPin<P> {
    /// Wrap a pin. The pin must already be configured as an input with the
    /// pull matching `polarity`.
    pub const fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Level that counts as pressed.
    #[inline]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> PolarizedPin<P> {
    /// Instantaneous (not debounced) pressed state.
    #[inline]
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(self.polarity.is_pressed(high))
    }
}
