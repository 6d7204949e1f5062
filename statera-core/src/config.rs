//! Channel configuration types and raw-count arithmetic
//!
//! The HX711-class chips select their input channel and PGA gain by the
//! number of trailing clock pulses appended to every 24-bit read. Exactly
//! three selections exist, so the configuration is an exhaustive enum and
//! raw codes are validated totally at the boundary.
//!
//! All timing constants assume the chip's RATE pin held low (10 samples per
//! second); the 80 SPS mode is not supported.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nominal conversion rate with RATE held low (Hz)
pub const UPDATE_FREQ_HZ: u32 = 10;

/// Settling time after power up, reset, or configuration change (ms)
pub const SETTLING_TIME_MS: u32 = 400;

/// Maximum time the data line may stay high before the channel flags a
/// data-ready timeout (ms). The tick period always leaves the chip enough
/// time to finish a conversion, so readiness should never take this long.
pub const DATA_READY_TIMEOUT_MS: u32 = 2000 / UPDATE_FREQ_HZ;

/// Clock must stay high at least this long for the chip to power down (µs)
pub const POWER_DOWN_HOLD_US: u32 = 60;

/// Nominal clock pulse width (µs); the chip accepts 0.2-50 µs
pub const CLOCK_PULSE_US: u32 = 1;

/// Maximum positive 24-bit count the chip can output
pub const MAX_RAW: i32 = 0x7f_ffff;

/// Minimum (most negative) 24-bit count the chip can output
pub const MIN_RAW: i32 = -0x80_0000;

/// Subtracted from a 24-bit pattern above `MAX_RAW` to extend the sign
pub const SIGN_EXTEND: i32 = 0x100_0000;

/// Default number of settled readings averaged to find the zero offset
pub const DEFAULT_ZEROS_TO_AVERAGE: u32 = 50;

/// Configuration errors reported synchronously to the caller
///
/// Unlike the transient conditions in [`crate::status::Status`], these are
/// real errors: the operation is rejected and no state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The gain/channel code is not one of the three the chip understands
    InvalidGain(u8),
}

/// PGA gain and input channel selection
///
/// The variant's code is the number of clock pulses appended after the
/// mandatory 25th pulse of each read; it selects the configuration used for
/// the chip's *next* conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gain {
    /// Input channel A, gain 128 (chip default)
    #[default]
    A128,
    /// Input channel B, gain 32
    B32,
    /// Input channel A, gain 64
    A64,
}

impl Gain {
    /// Trailing pulse count for this selection
    pub const fn code(self) -> u8 {
        match self {
            Gain::A128 => 0,
            Gain::B32 => 1,
            Gain::A64 => 2,
        }
    }

    /// Validate a raw configuration code
    pub const fn from_code(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Gain::A128),
            1 => Ok(Gain::B32),
            2 => Ok(Gain::A64),
            n => Err(ConfigError::InvalidGain(n)),
        }
    }
}

/// Initial settings for one acquisition channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelConfig {
    /// Raw gain/channel code, validated at construction
    pub gain_code: u8,
    /// Multiplier converting offset-corrected counts to meaningful units
    pub scale: f32,
    /// Exponential smoothing coefficient in [0, 1); 0 disables filtering
    pub filter: f32,
    /// Number of settled readings averaged when finding the zero offset
    pub zeros_to_average: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            gain_code: Gain::A128.code(),
            scale: 1.0,
            filter: 0.0,
            zeros_to_average: DEFAULT_ZEROS_TO_AVERAGE,
        }
    }
}

/// Sign-extend a 24-bit two's-complement pattern to `i32`
///
/// Values above `MAX_RAW` are negative counts; the result always lies in
/// `[MIN_RAW, MAX_RAW]`.
pub const fn sign_extend_24(raw: u32) -> i32 {
    let raw = (raw & 0x00ff_ffff) as i32;
    if raw > MAX_RAW {
        raw - SIGN_EXTEND
    } else {
        raw
    }
}

/// Integer division rounded to the nearest quotient, halves away from zero
///
/// Used for the zero-offset average so the offset stays an exact count.
pub const fn round_div(numerator: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return 0;
    }
    let half = divisor / 2;
    if (numerator < 0) != (divisor < 0) {
        (numerator - half) / divisor
    } else {
        (numerator + half) / divisor
    }
}
