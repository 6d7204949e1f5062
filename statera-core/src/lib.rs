//! Board-agnostic core logic for the Statera bridge-ADC firmware
//!
//! This crate contains all acquisition logic that does not depend on
//! specific hardware implementations:
//!
//! - Channel health/status flag model
//! - Gain/channel configuration types and raw-count arithmetic
//! - Channel registry and per-tick read scheduling
//! - Console command parsing and report formatting

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod registry;
pub mod status;
pub mod traits;
