//! GPIO pin abstractions
//!
//! Traits for the two pins a bridge-ADC channel owns: the clock output
//! (PD_SCK) and the data input (DOUT). Implementations handle the actual
//! register manipulation for the specific chip.

/// Digital output pin
///
/// Drives the ADC clock line. Pulse timing is the caller's responsibility;
/// implementations must not add latency of their own.
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check the level the pin is currently driven to
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Samples the ADC data line.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
