//! Dualbridge - Dual H-Bridge Motor Demo Firmware
//!
//! Two brushed DC motors on an L298N run different motion sequences at the
//! same time while the onboard LED blinks once per second. Everything is
//! driven from a single loop; no motor operation ever blocks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use dualbridge_core::config::ChannelConfig;
use dualbridge_core::traits::DcMotorDriver;
use dualbridge_drivers::motor::HBridgeMotor;
use dualbridge_drivers::sequence::{RampCycle, Shuttle};
use dualbridge_hal::MonotonicClock;
use dualbridge_hal_rp2040::{pwm_slot, EmbassyClock, PwmChannel, RpOutput, RpPwm, GPIO_COUNT};

use crate::board::{LED_PERIOD_MS, LED_PULSE_MS};
use crate::sequences::Heartbeat;

mod board;
mod sequences;

/// Loop period
const POLL_INTERVAL_MS: u64 = 1;

/// Halt unless `channel` names the pins taken for it in `main`
///
/// `pins` is enable, forward, reverse; `pwm` is the slice and output the
/// enable pin was opened on.
fn check_wiring(channel: &ChannelConfig, pins: [u8; 3], pwm: (u8, PwmChannel)) {
    defmt::assert_eq!(channel.enable_pin.pin, pins[0]);
    defmt::assert_eq!(channel.forward_pin.pin, pins[1]);
    defmt::assert_eq!(channel.reverse_pin.pin, pins[2]);
    defmt::assert_eq!(pwm_slot(pins[0]), pwm);
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Dualbridge firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = unwrap!(board::bridge_config(GPIO_COUNT));
    let a = unwrap!(config.find_channel("A"));
    let b = unwrap!(config.find_channel("B"));
    info!(
        "Bridge config: A at {} Hz, B at {} Hz",
        a.motor.pwm_frequency_hz, b.motor.pwm_frequency_hz
    );

    check_wiring(a, [0, 4, 5], (0, PwmChannel::A));
    check_wiring(b, [13, 12, 14], (6, PwmChannel::B));

    let clock = EmbassyClock;

    // Motor A: ENA on GPIO0 (slice 0, channel A)
    let mut motor_a = unwrap!(HBridgeMotor::new(
        a.motor.clone(),
        RpPwm::new(
            Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, PwmConfig::default()),
            PwmChannel::A,
        ),
        RpOutput::new(Output::new(p.PIN_4, Level::Low), a.forward_pin.inverted),
        RpOutput::new(Output::new(p.PIN_5, Level::Low), a.reverse_pin.inverted),
        &clock,
    ));

    // Motor B: ENB on GPIO13 (slice 6, channel B)
    let mut motor_b = unwrap!(HBridgeMotor::new(
        b.motor.clone(),
        RpPwm::new(
            Pwm::new_output_b(p.PWM_SLICE6, p.PIN_13, PwmConfig::default()),
            PwmChannel::B,
        ),
        RpOutput::new(Output::new(p.PIN_12, Level::Low), b.forward_pin.inverted),
        RpOutput::new(Output::new(p.PIN_14, Level::Low), b.reverse_pin.inverted),
        &clock,
    ));

    let mut led = Output::new(p.PIN_25, Level::Low);
    let heartbeat = Heartbeat::new(LED_PERIOD_MS, LED_PULSE_MS);

    let mut shuttle = Shuttle::new(30, 1000, 500);
    let mut ramp_cycle = RampCycle::default();

    info!("Motors ready: {}, {}", motor_a.status(), motor_b.status());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        led.set_level(Level::from(heartbeat.is_on(clock.now_ms())));

        shuttle.poll(&mut motor_a);
        ramp_cycle.poll(&mut motor_b);

        ticker.next().await;
    }
}
