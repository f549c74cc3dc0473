//! Debounced push-button input with autorepeat for polled embedded loops.
//!
//! Turns a bouncing digital input into clean press/release edges and,
//! optionally, synthesizes repeated key-press events while the button is
//! held. Everything runs inside a single non-blocking `poll()` call made
//! from the host loop; there is no interrupt or scheduler involvement.
//!
//! # Layers
//!
//! - [`debounce`]: settle-window edge classification ([`Debouncer`])
//! - [`held`]: continuous held-duration on top of the debouncer ([`HeldTracker`])
//! - [`repeat`]: autorepeat timing policies ([`AutoRepeat`], [`RepeatPolicy`])
//! - [`button`]: pin + clock driver emitting edges ([`PushButton`])
//! - [`autorepeat`]: pin + clock driver firing a callback ([`AutoRepeatButton`])
//!
//! The state machines take `(pressed, now_ms)` samples and never touch
//! hardware, so they can be driven from any input source. The driver types
//! wrap an [`embedded_hal::digital::InputPin`] and a [`Clock`].
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware builds the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
#![allow(clippy::cast_possible_truncation)]

#[macro_use]
mod log;

pub mod autorepeat;
pub mod button;
pub mod callback;
pub mod config;
pub mod debounce;
pub mod held;
pub mod input;
pub mod repeat;
pub mod time;

pub use autorepeat::AutoRepeatButton;
pub use button::PushButton;
pub use callback::Callback;
pub use config::{ConfigError, RepeatConfig};
pub use debounce::{Debouncer, Edge};
pub use held::{Hold, HeldTracker};
pub use input::{Polarity, PolarizedPin};
pub use repeat::{AutoRepeat, KeyPress, RepeatPolicy};
#[cfg(feature = "embassy-time")]
pub use time::EmbassyClock;
pub use time::{Clock, elapsed_ms};
