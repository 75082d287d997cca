//! Host test bench
//!
//! Fake PWM channel, bridge inputs and clock that record every write into
//! one shared [`Bench`].

use core::cell::Cell;

use dualbridge_core::config::MotorConfig;
use dualbridge_hal::{Millis, MonotonicClock, OutputPin, PwmError, PwmOutput};

use crate::motor::HBridgeMotor;

pub(crate) const MAX_DUTY: u16 = 1023;

/// Shared record of everything the motor did to its peripherals
#[derive(Default)]
pub(crate) struct Bench {
    pub now: Cell<Millis>,
    pub frequency: Cell<u32>,
    pub duty: Cell<u16>,
    pub pwm_writes: Cell<u32>,
    pub forward: Cell<bool>,
    pub reverse: Cell<bool>,
    pub pin_writes: Cell<u32>,
    /// Pin writes that left both inputs high
    pub both_high: Cell<u32>,
}

impl Bench {
    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn writes(&self) -> (u32, u32) {
        (self.pwm_writes.get(), self.pin_writes.get())
    }

    pub fn inputs(&self) -> (bool, bool) {
        (self.forward.get(), self.reverse.get())
    }
}

impl MonotonicClock for Bench {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

pub(crate) struct BenchPwm<'a>(pub &'a Bench);

impl PwmOutput for BenchPwm<'_> {
    fn set_frequency(&mut self, hz: u32) -> Result<(), PwmError> {
        match hz {
            0 => Err(PwmError::FrequencyTooLow),
            hz if hz > 100_000 => Err(PwmError::FrequencyTooHigh),
            hz => {
                self.0.frequency.set(hz);
                Ok(())
            }
        }
    }

    fn max_duty(&self) -> u16 {
        MAX_DUTY
    }

    fn set_duty(&mut self, duty: u16) {
        self.0.duty.set(duty.min(MAX_DUTY));
        self.0.pwm_writes.set(self.0.pwm_writes.get() + 1);
    }

    fn duty(&self) -> u16 {
        self.0.duty.get()
    }
}

pub(crate) struct BenchPin<'a> {
    bench: &'a Bench,
    forward: bool,
}

impl<'a> BenchPin<'a> {
    pub fn forward(bench: &'a Bench) -> Self {
        Self {
            bench,
            forward: true,
        }
    }

    pub fn reverse(bench: &'a Bench) -> Self {
        Self {
            bench,
            forward: false,
        }
    }

    fn level(&self) -> &Cell<bool> {
        if self.forward {
            &self.bench.forward
        } else {
            &self.bench.reverse
        }
    }
}

impl OutputPin for BenchPin<'_> {
    fn set_high(&mut self) {
        self.level().set(true);
        self.bench.pin_writes.set(self.bench.pin_writes.get() + 1);
        if self.bench.forward.get() && self.bench.reverse.get() {
            self.bench.both_high.set(self.bench.both_high.get() + 1);
        }
    }

    fn set_low(&mut self) {
        self.level().set(false);
        self.bench.pin_writes.set(self.bench.pin_writes.get() + 1);
    }

    fn is_set_high(&self) -> bool {
        self.level().get()
    }
}

pub(crate) type BenchMotor<'a> =
    HBridgeMotor<BenchPwm<'a>, BenchPin<'a>, BenchPin<'a>, &'a Bench>;

pub(crate) fn motor_with(bench: &Bench, config: MotorConfig) -> BenchMotor<'_> {
    HBridgeMotor::new(
        config,
        BenchPwm(bench),
        BenchPin::forward(bench),
        BenchPin::reverse(bench),
        bench,
    )
    .unwrap()
}

pub(crate) fn motor(bench: &Bench) -> BenchMotor<'_> {
    motor_with(bench, MotorConfig::new("A", 220).unwrap())
}
