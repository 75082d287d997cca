//! Board wiring
//!
//! Raspberry Pi Pico driving one L298N dual H-bridge module.
//!
//! ```text
//!   Pico            L298N
//!   GPIO0  ───────▶ ENA      Motor A
//!   GPIO4  ───────▶ IN1
//!   GPIO5  ───────▶ IN2
//!   GPIO13 ───────▶ ENB      Motor B
//!   GPIO12 ───────▶ IN3
//!   GPIO14 ───────▶ IN4
//!   GPIO25          onboard LED
//! ```
//!
//! The config is validated at boot, and `main` halts if the peripherals it
//! takes differ from the pins listed here.

use dualbridge_core::config::{
    parse_pin_spec, BridgeConfig, ChannelConfig, ConfigError, MotorConfig, DEFAULT_RAMP_STEP_MS,
};

/// Heartbeat period
pub const LED_PERIOD_MS: u64 = 1000;

/// Heartbeat on-time within each period
pub const LED_PULSE_MS: u64 = 50;

/// One channel as written on the wiring diagram
struct ChannelSpec {
    label: &'static str,
    pwm_frequency_hz: u32,
    ramp_step_ms: u32,
    enable: &'static str,
    forward: &'static str,
    reverse: &'static str,
}

const CHANNELS: [ChannelSpec; 2] = [
    ChannelSpec {
        label: "A",
        pwm_frequency_hz: 220,
        ramp_step_ms: DEFAULT_RAMP_STEP_MS,
        enable: "gpio0",
        forward: "gpio4",
        reverse: "gpio5",
    },
    ChannelSpec {
        label: "B",
        pwm_frequency_hz: 110,
        ramp_step_ms: 60,
        enable: "gpio13",
        forward: "gpio12",
        reverse: "gpio14",
    },
];

impl ChannelSpec {
    fn to_config(&self) -> Result<ChannelConfig, ConfigError> {
        Ok(ChannelConfig {
            motor: MotorConfig::new(self.label, self.pwm_frequency_hz)?
                .with_ramp_step_ms(self.ramp_step_ms),
            enable_pin: parse_pin_spec(self.enable)?,
            forward_pin: parse_pin_spec(self.forward)?,
            reverse_pin: parse_pin_spec(self.reverse)?,
        })
    }
}

/// Build and validate the bridge configuration
pub fn bridge_config(gpio_count: u8) -> Result<BridgeConfig, ConfigError> {
    let mut config = BridgeConfig::default();
    for spec in &CHANNELS {
        config.add_channel(spec.to_config()?)?;
    }
    config.validate(gpio_count)?;
    Ok(config)
}
