//! Time facilities backed by the embassy time driver

use embassy_time::{block_for, Duration, Instant};

use statera_hal::time::Timebase;

/// [`Timebase`] over `embassy-time`
///
/// `delay_us` busy-waits on the hardware timer without yielding, which is
/// what the bit-banged pulse train needs; tasks that can tolerate yielding
/// should await `embassy_time::Timer` instead of calling `delay_ms`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimebase;

impl Timebase for EmbassyTimebase {
    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }

    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
