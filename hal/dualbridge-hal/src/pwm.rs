//! PWM output abstractions
//!
//! The bridge enable line is driven by a PWM channel whose frequency is fixed
//! when the motor is constructed and whose duty is rewritten on every speed
//! change.
//!
//! # Frequency synthesis
//!
//! Counter-based PWM slices (RP2040 and similar) produce
//! `freq = clk / (divider * (top + 1))`. [`PwmTiming::for_frequency`] picks
//! the smallest integer divider that lets `top` fit in 16 bits, which keeps
//! the duty resolution as high as possible.

/// Largest usable counter wrap value
///
/// One below `u16::MAX` so that `top + 1` (the always-on compare value)
/// still fits in a `u16`.
pub const MAX_TOP: u16 = u16::MAX - 1;

/// Largest integer clock divider
pub const MAX_DIVIDER: u8 = u8::MAX;

/// Fewest duty steps accepted, so every 1% speed step maps to a distinct duty
pub const MIN_DUTY_STEPS: u32 = 100;

/// Errors that can occur when configuring a PWM channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Frequency is zero or needs a divider above [`MAX_DIVIDER`]
    FrequencyTooLow,
    /// Frequency leaves fewer than [`MIN_DUTY_STEPS`] duty steps
    FrequencyTooHigh,
}

/// PWM output channel
///
/// Duty values range from 0 (always off) to [`PwmOutput::max_duty`]
/// (always on).
pub trait PwmOutput {
    /// Configure the PWM frequency in Hz
    ///
    /// May change [`PwmOutput::max_duty`]; callers must rewrite the duty
    /// afterwards.
    fn set_frequency(&mut self, hz: u32) -> Result<(), PwmError>;

    /// Duty value corresponding to 100%
    fn max_duty(&self) -> u16;

    /// Set the raw duty value (clamped to `max_duty` by implementations)
    fn set_duty(&mut self, duty: u16);

    /// Currently applied raw duty value
    fn duty(&self) -> u16;

    /// Drive the channel fully on
    fn set_full(&mut self) {
        let max = self.max_duty();
        self.set_duty(max);
    }

    /// Drive the channel fully off
    fn set_off(&mut self) {
        self.set_duty(0);
    }
}

/// Divider and wrap value for a counter-based PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider (1..=255)
    pub divider: u8,
    /// Counter wrap value; the period is `top + 1` counts
    pub top: u16,
}

impl PwmTiming {
    /// Calculate the divider and wrap value for a target frequency
    ///
    /// # Arguments
    /// - `clk_hz`: Clock feeding the PWM slice (125 MHz on a stock RP2040)
    /// - `freq_hz`: Requested PWM frequency
    pub fn for_frequency(clk_hz: u32, freq_hz: u32) -> Result<Self, PwmError> {
        if freq_hz == 0 {
            return Err(PwmError::FrequencyTooLow);
        }

        let cycles = clk_hz / freq_hz;
        let period_max = MAX_TOP as u32 + 1;

        // Smallest divider that keeps the period within 16 bits
        let divider = cycles.div_ceil(period_max).max(1);
        if divider > MAX_DIVIDER as u32 {
            return Err(PwmError::FrequencyTooLow);
        }

        let period = cycles / divider;
        if period < MIN_DUTY_STEPS {
            return Err(PwmError::FrequencyTooHigh);
        }

        Ok(Self {
            divider: divider as u8,
            top: (period - 1) as u16,
        })
    }

    /// Duty value for an always-on output
    pub fn max_duty(&self) -> u16 {
        self.top + 1
    }

    /// Frequency actually produced (integer division truncates)
    pub fn actual_frequency_hz(&self, clk_hz: u32) -> u32 {
        clk_hz / (self.divider as u32 * self.max_duty() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLK: u32 = 125_000_000;

    #[test]
    fn test_low_frequency_uses_smallest_divider() {
        let timing = PwmTiming::for_frequency(CLK, 220).unwrap();
        assert_eq!(timing.divider, 9);
        assert_eq!(timing.top, 63130);
        assert_eq!(timing.actual_frequency_hz(CLK), 220);

        let timing = PwmTiming::for_frequency(CLK, 110).unwrap();
        assert_eq!(timing.divider, 18);
        assert_eq!(timing.actual_frequency_hz(CLK), 110);
    }

    #[test]
    fn test_kilohertz_range() {
        let timing = PwmTiming::for_frequency(CLK, 1_000).unwrap();
        assert_eq!(timing.divider, 2);
        assert_eq!(timing.top, 62499);
        assert_eq!(timing.max_duty(), 62500);
    }

    #[test]
    fn test_no_divider_needed() {
        let timing = PwmTiming::for_frequency(CLK, 20_000).unwrap();
        assert_eq!(timing.divider, 1);
        assert_eq!(timing.top, 6249);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        assert_eq!(
            PwmTiming::for_frequency(CLK, 0),
            Err(PwmError::FrequencyTooLow)
        );
    }

    #[test]
    fn test_frequency_below_divider_range() {
        // 125 MHz / (255 * 65535) ≈ 7.48 Hz is the floor
        assert_eq!(
            PwmTiming::for_frequency(CLK, 7),
            Err(PwmError::FrequencyTooLow)
        );
        assert!(PwmTiming::for_frequency(CLK, 8).is_ok());
    }

    #[test]
    fn test_frequency_above_resolution_limit() {
        // Exactly 100 counts per period is still accepted
        let timing = PwmTiming::for_frequency(CLK, 1_250_000).unwrap();
        assert_eq!(timing.max_duty(), 100);

        assert_eq!(
            PwmTiming::for_frequency(CLK, 2_000_000),
            Err(PwmError::FrequencyTooHigh)
        );
    }
}
