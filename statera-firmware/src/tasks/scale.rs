//! Scale scheduler task
//!
//! Owns the channel registry. Runs the periodic acquisition tick at the
//! chips' conversion cadence and applies console commands between ticks,
//! so a command can never interleave with a pulse train.

use core::fmt::Write;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};
use heapless::Vec;

use statera_core::config::UPDATE_FREQ_HZ;
use statera_core::console::{self, Command, ReportLine};
use statera_core::registry::{Registry, MAX_CHANNELS};
use statera_drivers::Hx711;
use statera_hal::lock::CriticalSectionLock;
use statera_hal_rp2040::{EmbassyTimebase, RpInputPin, RpOutputPin};

use crate::channels::{COMMAND_CHANNEL, REPORT_CHANNEL};

/// Identification text printed by the `z` command
const FIRMWARE: &str = "Statera Bridge Scale";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tick interval matching the chips' 10 Hz conversion rate
const TICK_INTERVAL_MS: u64 = 1000 / UPDATE_FREQ_HZ as u64;

/// The concrete channel type the firmware acquires from
pub type ScaleChannel = Hx711<RpOutputPin, RpInputPin, EmbassyTimebase, CriticalSectionLock>;

/// The firmware's channel registry
pub type ScaleRegistry = Registry<ScaleChannel, MAX_CHANNELS>;

/// Scale task - periodic acquisition plus command dispatch
#[embassy_executor::task]
pub async fn scale_task(mut registry: ScaleRegistry) {
    info!("Scale task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    // Periodic report interval in seconds; 0 means no periodic reports
    let mut report_interval_s: u16 = 0;
    let mut ticks_since_report: u32 = 0;

    loop {
        match select(ticker.next(), COMMAND_CHANNEL.receive()).await {
            Either::First(_) => {
                registry.tick();

                if report_interval_s > 0 {
                    ticks_since_report += 1;
                    if ticks_since_report >= report_interval_s as u32 * UPDATE_FREQ_HZ {
                        ticks_since_report = 0;
                        send_report(&registry);
                    }
                }
            }
            Either::Second(command) => {
                debug!("Command: {:?}", command);
                match command {
                    Command::ReportOnce => send_report(&registry),
                    Command::ReportEvery(seconds) => {
                        report_interval_s = seconds;
                        ticks_since_report = 0;
                    }
                    Command::ZeroAll => registry.zero_all(),
                    Command::SetScales(scales) => registry.set_scales(&scales),
                    Command::Identify => send_identification(),
                    Command::Shutdown => {
                        registry.shutdown_all();
                        send_line("Shutdown complete.");
                        info!("Scale task stopped");
                        return;
                    }
                }
            }
        }
    }
}

/// Format and queue one report line
fn send_report(registry: &ScaleRegistry) {
    let values: Vec<f32, MAX_CHANNELS> = registry.iter().map(|c| c.value()).collect();
    if REPORT_CHANNEL.try_send(console::format_report(&values)).is_err() {
        warn!("Report channel full, dropping report");
    }
}

/// Queue the identification/version text
fn send_identification() {
    send_line(FIRMWARE);
    let mut version = ReportLine::new();
    let _ = write!(version, "{VERSION}");
    if REPORT_CHANNEL.try_send(version).is_err() {
        warn!("Report channel full, dropping version line");
    }
}

fn send_line(text: &str) {
    let mut line = ReportLine::new();
    let _ = line.push_str(text);
    if REPORT_CHANNEL.try_send(line).is_err() {
        warn!("Report channel full, dropping line");
    }
}
