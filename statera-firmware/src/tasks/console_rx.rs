//! Console UART receive task
//!
//! Accumulates bytes into lines and hands parsed commands to the scale
//! task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use heapless::String;

use statera_core::console;

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Longest accepted command line; excess input is dropped until a line end
const LINE_LEN: usize = 64;

/// Console RX task - reads lines and parses commands
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut line: String<LINE_LEN> = String::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match byte {
                        b'\r' | b'\n' => {
                            dispatch(line.as_str());
                            line.clear();
                        }
                        b' '..=b'~' => {
                            let _ = line.push(byte as char);
                        }
                        _ => {
                            // Ignore other control bytes
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Parse one line and queue the command, dropping if the channel is full
fn dispatch(line: &str) {
    let Some(command) = console::parse(line) else {
        if !line.trim().is_empty() {
            warn!("Unrecognized command: {}", line);
        }
        return;
    };

    if COMMAND_CHANNEL.try_send(command).is_err() {
        warn!("Command channel full, dropping command");
    }
}
