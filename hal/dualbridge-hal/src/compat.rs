//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! Lets any HAL that implements the `embedded-hal` traits drive a motor
//! without a dedicated binding crate.
//!
//! - [`EhOutput`] wraps a `digital::OutputPin`
//! - [`EhPwm`] wraps a `pwm::SetDutyCycle` channel
//!
//! `embedded-hal` has no frequency API, so [`EhPwm`] expects the channel to
//! be configured for the right frequency before it is wrapped. Peripheral
//! errors are dropped; the motor contract has no hardware fault channel.

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::gpio::OutputPin;
use crate::pwm::{PwmError, PwmOutput};

/// Output pin adapter that remembers the last written level
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> EhOutput<P> {
    /// Wrap a pin, driving it low
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, high: false }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// PWM channel adapter with a pre-configured frequency
pub struct EhPwm<P> {
    channel: P,
    duty: u16,
    frequency_hz: u32,
}

impl<P: SetDutyCycle> EhPwm<P> {
    /// Wrap a channel already running at `frequency_hz`, driving it off
    pub fn new(mut channel: P, frequency_hz: u32) -> Self {
        let _ = channel.set_duty_cycle_fully_off();
        Self {
            channel,
            duty: 0,
            frequency_hz,
        }
    }

    /// Release the wrapped channel
    pub fn into_inner(self) -> P {
        self.channel
    }
}

impl<P: SetDutyCycle> PwmOutput for EhPwm<P> {
    /// Accepts only the frequency given at construction
    fn set_frequency(&mut self, hz: u32) -> Result<(), PwmError> {
        match hz {
            0 => Err(PwmError::FrequencyTooLow),
            hz if hz == self.frequency_hz => Ok(()),
            hz if hz > self.frequency_hz => Err(PwmError::FrequencyTooHigh),
            _ => Err(PwmError::FrequencyTooLow),
        }
    }

    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.max_duty());
        let _ = self.channel.set_duty_cycle(duty);
        self.duty = duty;
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}
