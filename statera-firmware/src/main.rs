//! Statera - Bridge Scale Acquisition Firmware
//!
//! Main firmware binary for an RP2040-based laboratory scale built on two
//! HX711 bridge amplifiers. Channels are read at the chips' own 10 Hz
//! cadence by a scheduler task; a line-oriented console on UART0 accepts
//! report, zero, scale, identify, and shutdown commands.
//!
//! Named after the Latin "statera", a beam balance.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use statera_core::config::ChannelConfig;
use statera_drivers::Hx711;
use statera_hal::lock::CriticalSectionLock;
use statera_hal_rp2040::{EmbassyTimebase, RpInputPin, RpOutputPin};

use crate::tasks::ScaleRegistry;

mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// GPIO assignments for the two bridge amplifiers
const HX1_CLOCK: u8 = 27;
const HX1_DATA: u8 = 26;
const HX2_CLOCK: u8 = 7;
const HX2_DATA: u8 = 6;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Statera firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART0 for the console
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Console UART initialized");

    // Construct the two acquisition channels. Construction resets each chip
    // and blocks briefly while pushing the configured gain, so the channels
    // are converting by the time the scheduler starts.
    info!(
        "Bridge pins: hx1 clock={} data={}, hx2 clock={} data={}",
        HX1_CLOCK, HX1_DATA, HX2_CLOCK, HX2_DATA
    );

    let bridge1 = match Hx711::new(
        "hx1",
        RpOutputPin::new(p.PIN_27),
        RpInputPin::new(p.PIN_26),
        EmbassyTimebase,
        CriticalSectionLock,
        ChannelConfig::default(),
    ) {
        Ok(channel) => channel,
        Err(e) => defmt::panic!("hx1 configuration rejected: {:?}", e),
    };

    let bridge2 = match Hx711::new(
        "hx2",
        RpOutputPin::new(p.PIN_7),
        RpInputPin::new(p.PIN_6),
        EmbassyTimebase,
        CriticalSectionLock,
        ChannelConfig::default(),
    ) {
        Ok(channel) => channel,
        Err(e) => defmt::panic!("hx2 configuration rejected: {:?}", e),
    };

    let mut registry = ScaleRegistry::new();
    for bridge in [bridge1, bridge2] {
        if registry.register(bridge).is_err() {
            defmt::panic!("channel registry full");
        }
    }

    info!("{} channels registered", registry.len());

    // Onboard LED flashed by the heartbeat task
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(tasks::scale_task(registry)).unwrap();
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(tx)).unwrap();
    spawner.spawn(tasks::heartbeat_task(led)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
