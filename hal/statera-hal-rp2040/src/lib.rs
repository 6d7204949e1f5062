//! RP2040-specific HAL for the Statera acquisition firmware
//!
//! Implements the shared `statera-hal` traits on top of `embassy-rp`:
//!
//! - GPIO output/input wrappers for the ADC clock and data lines
//! - Busy-delay and monotonic time from the embassy time driver
//!
//! The pulse-train lock is not chip-specific; firmware uses
//! [`statera_hal::lock::CriticalSectionLock`] directly.

#![no_std]

pub mod gpio;
pub mod time;

pub use gpio::{RpInputPin, RpOutputPin};
pub use time::EmbassyTimebase;
