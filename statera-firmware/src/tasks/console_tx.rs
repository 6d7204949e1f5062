//! Console UART transmit task
//!
//! Writes queued report lines to the console, one per CRLF-terminated
//! line.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::REPORT_CHANNEL;

/// Console TX task - drains the report channel to the UART
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx) {
    info!("Console TX task started");

    loop {
        let line = REPORT_CHANNEL.receive().await;

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("UART write error: {:?}", e);
        }
    }
}
