//! Bridge input pins
//!
//! Pins from a config string such as `"!gpio5"` are active-low; the
//! inversion is applied here so the motor driver always works in logical
//! levels.

use dualbridge_hal::OutputPin;
use embassy_rp::gpio::Output;

/// Number of user GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Output pin with optional inversion
pub struct RpOutput {
    pin: Output<'static>,
    inverted: bool,
}

impl RpOutput {
    /// Wrap an output, driving it to the logical low level
    pub fn new(pin: Output<'static>, inverted: bool) -> Self {
        let mut out = Self { pin, inverted };
        out.set_low();
        out
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        if self.inverted {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }

    fn set_low(&mut self) {
        if self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}
