//! Async tasks for the demo firmware.
//!
//! - `led`: RGB LED pulse on every key-press event

pub mod led;

pub use led::{ButtonId, led_task, notify};
