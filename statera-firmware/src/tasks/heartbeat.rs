//! Heartbeat LED task
//!
//! Flashes the onboard LED at 3 Hz with a short pulse to show the firmware
//! is running without lighting the LED noticeably.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker, Timer};

/// Flash rate (Hz)
const FLASH_FREQ_HZ: u64 = 3;

/// LED on-time per flash (ms)
const PULSE_MS: u64 = 5;

/// Heartbeat task - flashes the onboard LED
#[embassy_executor::task]
pub async fn heartbeat_task(mut led: Output<'static>) {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(1000 / FLASH_FREQ_HZ));

    loop {
        ticker.next().await;
        led.set_high();
        Timer::after_millis(PULSE_MS).await;
        led.set_low();
    }
}
