//! Delay and monotonic-time abstractions
//!
//! The channel driver needs microsecond busy-delays for clock pulses,
//! millisecond delays for its coarse polling loops, and a monotonic
//! millisecond clock to track settling and data-ready windows.

/// Busy-delay and monotonic clock facility
///
/// `delay_us` is used inside the bit-banged pulse train and must not yield
/// or sleep; single-digit-microsecond accuracy is expected. `delay_ms` is
/// only called from slow polling paths and may be looser.
pub trait Timebase {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Monotonic milliseconds since some fixed epoch (e.g. boot)
    fn now_ms(&self) -> u64;
}

/// A one-shot expiry instant derived from [`Timebase::now_ms`]
///
/// Stands in for a callback one-shot timer: the owner holds at most one
/// `Option<Deadline>` per timed window, replacing it cancels the old one,
/// and expiry takes effect at the owner's next check site. This keeps timer
/// lifetime tied to the owner instead of to a detached callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at_ms: u64,
}

impl Deadline {
    /// Create a deadline `duration_ms` after `now_ms`
    pub const fn after(now_ms: u64, duration_ms: u32) -> Self {
        Self {
            at_ms: now_ms.saturating_add(duration_ms as u64),
        }
    }

    /// Check whether the deadline has passed
    pub const fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_expiry() {
        let d = Deadline::after(100, 50);
        assert!(!d.expired(100));
        assert!(!d.expired(149));
        assert!(d.expired(150));
        assert!(d.expired(151));
    }

    #[test]
    fn test_deadline_zero_duration() {
        let d = Deadline::after(100, 0);
        assert!(d.expired(100));
    }

    #[test]
    fn test_deadline_saturates() {
        let d = Deadline::after(u64::MAX, 1000);
        assert!(d.expired(u64::MAX));
    }
}
