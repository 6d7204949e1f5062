//! Hardware abstraction traits for the Statera acquisition firmware
//!
//! The channel driver bit-bangs its wire protocol directly on GPIO, so the
//! facilities it consumes are deliberately small: digital pins, a timebase
//! with microsecond delays and a monotonic millisecond clock, and a scoped
//! mutual-exclusion primitive that keeps the pulse train non-preemptible.
//! Chip-specific crates implement these traits over their vendor HALs.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod lock;
pub mod time;

pub use gpio::{InputPin, OutputPin};
pub use lock::ScopedLock;
pub use time::{Deadline, Timebase};
