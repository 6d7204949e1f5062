//! GPIO pin wrappers
//!
//! Thin adapters from `embassy-rp` pins to the `statera-hal` pin traits.
//! The ADC's data line idles high, so the input is constructed with a
//! pull-up; a disconnected chip then reads as data-never-ready instead of
//! floating.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::Peri;

use statera_hal::gpio::{InputPin, OutputPin};

/// Push-pull output driving an ADC clock line
pub struct RpOutputPin {
    pin: Output<'static>,
}

impl RpOutputPin {
    /// Configure a pin as the clock output, initially low (chip powered)
    pub fn new(pin: Peri<'static, impl embassy_rp::gpio::Pin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for RpOutputPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Input sampling an ADC data line
pub struct RpInputPin {
    pin: Input<'static>,
}

impl RpInputPin {
    /// Configure a pin as the data input with a pull-up
    pub fn new(pin: Peri<'static, impl embassy_rp::gpio::Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for RpInputPin {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
