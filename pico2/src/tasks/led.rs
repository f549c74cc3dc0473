//! RGB LED feedback task.
//!
//! Autorepeat callbacks run synchronously inside `poll()`, so they only
//! count the event and queue it. This task drains the queue and pulses the
//! LED colour assigned to the button.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::info;
use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;

use crate::config::{EVENT_QUEUE_DEPTH, LED_PULSE_MS};

/// Buttons that run an autorepeat policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum ButtonId {
    /// Fixed-rate repeat (red).
    B,
    /// Two-speed repeat (green).
    X,
    /// Accelerating repeat (blue).
    Y,
}

/// Key-press events waiting for an LED pulse.
static EVENTS: Channel<CriticalSectionRawMutex, ButtonId, EVENT_QUEUE_DEPTH> = Channel::new();

/// Key-press events seen per button, indexed by `ButtonId as usize`.
static PRESS_COUNTS: [AtomicU32; 3] = [const { AtomicU32::new(0) }; 3];

/// Record a key-press event. Called from the button callbacks.
pub fn notify(id: ButtonId) {
    let count = PRESS_COUNTS[id as usize].fetch_add(1, Ordering::Relaxed) + 1;
    info!("{}: key press #{}", id, count);

    // LED task is behind: skip the pulse, the count above is what matters
    let _ = EVENTS.try_send(id);
}

/// Pulse the LED for each queued event. LEDs are active-low (Low = ON).
#[embassy_executor::task]
pub async fn led_task(mut red: Output<'static>, mut green: Output<'static>, mut blue: Output<'static>) {
    info!("LED task started");

    loop {
        let id = EVENTS.receive().await;
        let led = match id {
            ButtonId::B => &mut red,
            ButtonId::X => &mut green,
            ButtonId::Y => &mut blue,
        };

        led.set_low();
        Timer::after_millis(LED_PULSE_MS).await;
        led.set_high();
    }
}
