//! Hardware configuration types
//!
//! These types describe a motor, the bridge channel it is wired to, and the
//! dual bridge as a whole. Everything here is fixed at construction time.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pins::{PinAllocator, PinConfig};
use super::ConfigError;

/// Maximum motor label length
pub const MAX_LABEL_LEN: usize = 8;

/// Channels on a dual bridge chip
pub const MAX_CHANNELS: usize = 2;

/// Default interval between acceleration steps
pub const DEFAULT_RAMP_STEP_MS: u32 = 10;

/// Default PWM frequency for brushed motors on an L298N
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 1_000;

/// Per-motor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Motor name used in logs (e.g., "A", "B")
    pub label: String<MAX_LABEL_LEN>,
    /// PWM frequency on the enable line (Hz)
    pub pwm_frequency_hz: u32,
    /// Step interval used by `accelerate_default` (ms)
    pub ramp_step_ms: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
            ramp_step_ms: DEFAULT_RAMP_STEP_MS,
        }
    }
}

impl MotorConfig {
    /// Create a motor config with the default ramp interval
    pub fn new(label: &str, pwm_frequency_hz: u32) -> Result<Self, ConfigError> {
        let mut l = String::new();
        l.push_str(label).map_err(|_| ConfigError::LabelTooLong)?;

        let config = Self {
            label: l,
            pwm_frequency_hz,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the default acceleration step interval
    pub fn with_ramp_step_ms(mut self, ramp_step_ms: u32) -> Self {
        self.ramp_step_ms = ramp_step_ms;
        self
    }

    /// Validate the motor configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(())
    }
}

/// One bridge channel: a motor and the three pins driving it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelConfig {
    /// Motor settings
    pub motor: MotorConfig,
    /// PWM-capable pin on the bridge enable input (ENA/ENB)
    pub enable_pin: PinConfig,
    /// Direction input asserted for clockwise rotation (IN1/IN3)
    pub forward_pin: PinConfig,
    /// Direction input asserted for counter-clockwise rotation (IN2/IN4)
    pub reverse_pin: PinConfig,
}

impl ChannelConfig {
    /// Pins used by this channel
    pub fn pins(&self) -> [PinConfig; 3] {
        [self.enable_pin, self.forward_pin, self.reverse_pin]
    }

    /// Validate the channel, claiming its pins from `pins`
    pub fn validate(&self, pins: &mut PinAllocator) -> Result<(), ConfigError> {
        self.motor.validate()?;
        for pin in self.pins() {
            pins.allocate(pin.pin)?;
        }
        Ok(())
    }
}

/// Dual H-bridge configuration
///
/// The two channels are independent motors; the only shared constraint is
/// that no pin is used twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Configured channels (at most [`MAX_CHANNELS`])
    pub channels: Vec<ChannelConfig, MAX_CHANNELS>,
}

impl BridgeConfig {
    /// Append a channel
    pub fn add_channel(&mut self, channel: ChannelConfig) -> Result<(), ConfigError> {
        self.channels
            .push(channel)
            .map_err(|_| ConfigError::TooManyChannels)
    }

    /// Validate all channels for a chip with `gpio_count` pins
    pub fn validate(&self, gpio_count: u8) -> Result<(), ConfigError> {
        let mut pins = PinAllocator::new(gpio_count);

        for (i, channel) in self.channels.iter().enumerate() {
            channel.validate(&mut pins)?;

            let label = &channel.motor.label;
            if self.channels[..i].iter().any(|c| &c.motor.label == label) {
                return Err(ConfigError::DuplicateLabel);
            }
        }

        Ok(())
    }

    /// Find a channel by motor label
    pub fn find_channel(&self, label: &str) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.motor.label.as_str() == label)
    }
}
