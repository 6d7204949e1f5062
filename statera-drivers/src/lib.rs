//! Chip driver implementations for the Statera acquisition firmware
//!
//! Drivers are generic over the `statera-hal` traits, so the same protocol
//! code runs against real GPIO on target and simulated chips in host tests.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;

pub use bridge::Hx711;
