//! Channel status flag model
//!
//! A channel's health is a bitset of independent transient conditions, not a
//! single linear state: several faults can hold at once (e.g. powered down
//! and therefore not settled). Flags are set and cleared as conditions come
//! and go; none of them is an error that stops the channel, and a read cycle
//! commits a new value only while the whole set is empty.

use core::ops::BitOr;

/// Bitset of channel fault/lifecycle conditions
///
/// The nominal state is the empty set. There is no "nominal bit":
/// `contains(Status::NOMINAL)` is true only when no flag at all is set,
/// while `contains(x)` for any nonzero `x` is true on any overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u16);

impl Status {
    /// No unusual conditions; the empty set, not a flag
    pub const NOMINAL: Status = Status(0);
    /// The channel instance is being constructed
    pub const INITIALIZING: Status = Status(1 << 0);
    /// The chip is powered down (clock line held high)
    pub const POWERED_DOWN: Status = Status(1 << 1);
    /// The power-up sequence is in progress
    pub const POWERING_UP: Status = Status(1 << 2);
    /// The settling window since power-up or reconfiguration has not elapsed
    pub const NOT_SETTLED: Status = Status(1 << 3);
    /// The data line was high (conversion not complete) at the last check
    pub const DATA_NOT_READY: Status = Status(1 << 4);
    /// The data line stayed high beyond the allowed window
    pub const DATA_READY_TIMEOUT: Status = Status(1 << 5);
    /// The last attempted read found no data available
    pub const NO_DATA: Status = Status(1 << 6);
    /// The data line failed to go high on the 25th clock pulse
    pub const STUCK_LOW: Status = Status(1 << 7);
    /// Readings are being accumulated to determine the zero offset
    pub const ZEROING: Status = Status(1 << 8);
    /// The raw count sits at the minimum or maximum representable value
    pub const OUT_OF_RANGE: Status = Status(1 << 9);

    /// Every individual flag, in bit order
    pub const ALL: [Status; 10] = [
        Status::INITIALIZING,
        Status::POWERED_DOWN,
        Status::POWERING_UP,
        Status::NOT_SETTLED,
        Status::DATA_NOT_READY,
        Status::DATA_READY_TIMEOUT,
        Status::NO_DATA,
        Status::STUCK_LOW,
        Status::ZEROING,
        Status::OUT_OF_RANGE,
    ];

    /// Raw bit pattern
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Set the given flags
    pub fn set(&mut self, flags: Status) {
        self.0 |= flags.0;
    }

    /// Clear the given flags
    pub fn clear(&mut self, flags: Status) {
        self.0 &= !flags.0;
    }

    /// Check whether any of the given flags is set
    ///
    /// `contains(Status::NOMINAL)` asks "is everything nominal?" and is true
    /// only when the whole set is empty.
    pub const fn contains(self, flags: Status) -> bool {
        if flags.0 == 0 {
            self.0 == 0
        } else {
            self.0 & flags.0 != 0
        }
    }

    /// True when no flag at all is set
    pub const fn is_nominal(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the individual flags currently set
    pub fn iter(self) -> impl Iterator<Item = Status> {
        Status::ALL.into_iter().filter(move |f| self.0 & f.0 != 0)
    }

    /// Human-readable description of a single flag (or of `NOMINAL`)
    pub const fn describe(flag: Status) -> &'static str {
        match flag.0 {
            0 => "No unusual status conditions are present",
            0b00_0000_0001 => "The channel is being initialized",
            0b00_0000_0010 => "The chip is powered down",
            0b00_0000_0100 => "The chip is powering up",
            0b00_0000_1000 => {
                "The chip hasn't had time to settle since the last power up or configuration change"
            }
            0b00_0001_0000 => "Data is not ready",
            0b00_0010_0000 => "Data was not ready for too long",
            0b00_0100_0000 => "Data wasn't available on the last attempted read",
            0b00_1000_0000 => "The data pin failed to go high on the 25th clock pulse",
            0b01_0000_0000 => "Collecting readings to determine the zero offset",
            0b10_0000_0000 => "The chip output is at its minimum or maximum possible value",
            _ => "Multiple status conditions are present",
        }
    }
}

impl BitOr for Status {
    type Output = Status;

    fn bitor(self, rhs: Status) -> Status {
        Status(self.0 | rhs.0)
    }
}
