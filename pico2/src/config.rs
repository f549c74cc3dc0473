//! Firmware configuration constants.
//!
//! # PIM715 Pinout
//!
//! - Buttons (active-low, internal pull-up): A=GPIO12, B=GPIO13, X=GPIO14, Y=GPIO15
//! - RGB LED (active-low): Red=GPIO26, Green=GPIO27, Blue=GPIO28

use pushbutton::RepeatConfig;
use pushbutton::config::{DEBOUNCE_MS, REPEAT_DELAY_MS, REPEAT_PERIOD_MS};

// =============================================================================
// Timing Configuration
// =============================================================================

/// Main loop sleep between button polls.
/// Repeat timing is wall-clock driven, so this only sets the jitter.
pub const POLL_INTERVAL_MS: u64 = 1;

/// How long the LED stays lit for each key-press event.
pub const LED_PULSE_MS: u64 = 15;

/// Debounce and repeat timing shared by the autorepeat buttons.
pub const REPEAT_CONFIG: RepeatConfig = RepeatConfig::new(DEBOUNCE_MS, REPEAT_DELAY_MS, REPEAT_PERIOD_MS);

// =============================================================================
// Event Queue
// =============================================================================

/// Key-press events buffered for the LED task. Pulses beyond this are dropped
/// (the per-button counters still advance).
pub const EVENT_QUEUE_DEPTH: usize = 8;
