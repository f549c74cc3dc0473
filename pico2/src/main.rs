//! Push-button demo firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Polls the four buttons of the Pimoroni PIM715 Display Pack through the
//! `pushbutton` library and reports every event over defmt RTT.
//!
//! # Button Controls
//!
//! - **A**: Plain debounced button. Logs press/release edges and, on press,
//!   cycles the repeat policy of X (Fixed → TwoSpeed → Accelerating)
//! - **B**: Fixed-rate autorepeat (red LED)
//! - **X**: Two-speed autorepeat by default (green LED)
//! - **Y**: Accelerating autorepeat (blue LED)

#![no_std]
#![no_main]

mod config;
mod tasks;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Timer;
use pushbutton::{AutoRepeatButton, Edge, EmbassyClock, KeyPress, Polarity, PushButton, RepeatPolicy};
use {defmt_rtt as _, panic_probe as _};

use crate::config::{POLL_INTERVAL_MS, REPEAT_CONFIG};
use crate::tasks::{ButtonId, led_task, notify};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-pushbutton"),
    embassy_rp::binary_info::rp_program_description!(c"Debounce and autorepeat demo on PIM715 buttons"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Autorepeat button on an RP2350 GPIO with a plain `fn()` callback.
type RepeatButton = AutoRepeatButton<Input<'static>, EmbassyClock>;

fn on_b_press() {
    notify(ButtonId::B);
}

fn on_x_press() {
    notify(ButtonId::X);
}

fn on_y_press() {
    notify(ButtonId::Y);
}

/// Next policy in the Fixed → TwoSpeed → Accelerating cycle.
const fn next_policy(policy: RepeatPolicy) -> RepeatPolicy {
    match policy {
        RepeatPolicy::Fixed => RepeatPolicy::two_speed(),
        RepeatPolicy::TwoSpeed { .. } => RepeatPolicy::accelerating(),
        RepeatPolicy::Accelerating { .. } => RepeatPolicy::Fixed,
    }
}

/// Active-low button input with the internal pull-up enabled.
fn button_input(pin: embassy_rp::Peri<'static, impl embassy_rp::gpio::Pin>) -> Input<'static> {
    Input::new(pin, Pull::Up)
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("pushbutton demo starting");

    // Initialize RGB LED (active-low: High = OFF)
    let led_r = Output::new(p.PIN_26, Level::High);
    let led_g = Output::new(p.PIN_27, Level::High);
    let led_b = Output::new(p.PIN_28, Level::High);
    spawner.spawn(led_task(led_r, led_g, led_b)).unwrap();
    info!("LED task spawned");

    // Initialize buttons
    let mut btn_a = PushButton::new(button_input(p.PIN_12), Polarity::ActiveLow, EmbassyClock);

    let mut btn_b: RepeatButton = AutoRepeatButton::new(
        button_input(p.PIN_13),
        Polarity::ActiveLow,
        EmbassyClock,
        REPEAT_CONFIG,
        RepeatPolicy::Fixed,
    );
    btn_b.register_callback(on_b_press);

    let mut btn_x: RepeatButton = AutoRepeatButton::new(
        button_input(p.PIN_14),
        Polarity::ActiveLow,
        EmbassyClock,
        REPEAT_CONFIG,
        RepeatPolicy::two_speed(),
    );
    btn_x.register_callback(on_x_press);

    let mut btn_y: RepeatButton = AutoRepeatButton::new(
        button_input(p.PIN_15),
        Polarity::ActiveLow,
        EmbassyClock,
        REPEAT_CONFIG,
        RepeatPolicy::accelerating(),
    );
    btn_y.register_callback(on_y_press);

    info!("Buttons initialized!");

    loop {
        // GPIO reads are infallible on RP2350
        let Ok(edge) = btn_a.poll();
        match edge {
            Edge::Pressed => {
                let policy = next_policy(btn_x.policy());
                btn_x.set_policy(policy);
                btn_x.init();
                info!("A pressed, X policy: {}", policy);
            }
            Edge::Released => info!("A released"),
            Edge::NoChange => {}
        }

        let Ok(_) = btn_b.poll();
        let Ok(_) = btn_x.poll();

        let Ok(fired) = btn_y.poll();
        if fired == Some(KeyPress::Repeat) {
            info!(
                "Y period: {} ms (held {} ms)",
                btn_y.repeat().current_period_ms(),
                btn_y.held_duration_ms()
            );
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
