//! Bridge enable line on an RP2040 PWM slice
//!
//! Each slice has one counter and two compare outputs. A motor owns one
//! output; the slice frequency is derived from `clk_sys` with
//! [`PwmTiming::for_frequency`].
//!
//! The slice runs at `top + 1` counts per period, so a compare value of
//! `top + 1` keeps the output high for the whole period.

use dualbridge_hal::{PwmError, PwmOutput, PwmTiming};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

/// Compare output of a PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    /// Even GPIO of the slice
    A,
    /// Odd GPIO of the slice
    B,
}

/// Slice and compare output a GPIO is wired to
///
/// GPIOs map onto slices in pairs (even pin on A, odd on B), wrapping
/// after slice 7.
pub fn pwm_slot(gpio: u8) -> (u8, PwmChannel) {
    let slice = (gpio / 2) % 8;
    let channel = if gpio % 2 == 0 {
        PwmChannel::A
    } else {
        PwmChannel::B
    };
    (slice, channel)
}

/// PWM output for one motor enable line
pub struct RpPwm {
    pwm: Pwm<'static>,
    config: Config,
    channel: PwmChannel,
    timing: Option<PwmTiming>,
}

impl RpPwm {
    /// Wrap a slice created with `Pwm::new_output_a` / `new_output_b`
    ///
    /// The output stays off until a frequency is configured.
    pub fn new(mut pwm: Pwm<'static>, channel: PwmChannel) -> Self {
        let mut config = Config::default();
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            channel,
            timing: None,
        }
    }

    fn compare_mut(&mut self) -> &mut u16 {
        match self.channel {
            PwmChannel::A => &mut self.config.compare_a,
            PwmChannel::B => &mut self.config.compare_b,
        }
    }
}

impl PwmOutput for RpPwm {
    fn set_frequency(&mut self, hz: u32) -> Result<(), PwmError> {
        let timing = PwmTiming::for_frequency(clk_sys_freq(), hz)?;

        self.config.divider = timing.divider.into();
        self.config.top = timing.top;
        *self.compare_mut() = 0;
        self.pwm.set_config(&self.config);
        self.timing = Some(timing);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PWM {}: {} Hz (div {}, top {})",
            self.channel,
            timing.actual_frequency_hz(clk_sys_freq()),
            timing.divider,
            timing.top
        );

        Ok(())
    }

    fn max_duty(&self) -> u16 {
        match self.timing {
            Some(timing) => timing.max_duty(),
            None => self.config.top,
        }
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.max_duty());
        *self.compare_mut() = duty;
        self.pwm.set_config(&self.config);
    }

    fn duty(&self) -> u16 {
        match self.channel {
            PwmChannel::A => self.config.compare_a,
            PwmChannel::B => self.config.compare_b,
        }
    }
}
