//! Scoped mutual exclusion
//!
//! The bridge-ADC pulse train has single-digit-microsecond timing tolerance,
//! so the driver wraps it in a scoped lock that, on target, doubles as a
//! critical section: nothing may preempt between successive clock pulses.

/// Scoped acquire/release mutual exclusion
///
/// The lock is held exactly for the duration of the closure. Implementations
/// must not allow the closure to be preempted by anything that could touch
/// the same pins.
pub trait ScopedLock {
    /// Run `f` with the lock held
    fn with<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Lock that does nothing
///
/// For single-context use (host tests, or drivers owned exclusively by one
/// task that tolerates pulse-train preemption).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLock;

impl ScopedLock for NoopLock {
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Lock backed by a global critical section
///
/// Disables interrupts for the duration of the closure, so the pulse train
/// runs to completion without preemption.
#[cfg(feature = "critical-section")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalSectionLock;

#[cfg(feature = "critical-section")]
impl ScopedLock for CriticalSectionLock {
    fn with<R>(&self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}
