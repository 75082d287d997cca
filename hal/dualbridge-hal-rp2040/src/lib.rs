//! RP2040-specific HAL for dualbridge
//!
//! Implements the `dualbridge-hal` capability traits on top of `embassy-rp`:
//!
//! - [`gpio::RpOutput`] - bridge direction inputs, optionally active-low
//! - [`pwm::RpPwm`] - bridge enable line on one channel of a PWM slice
//! - [`clock::EmbassyClock`] - millisecond time base from `embassy-time`

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod pwm;

pub use clock::EmbassyClock;
pub use gpio::{RpOutput, GPIO_COUNT};
pub use pwm::{pwm_slot, PwmChannel, RpPwm};
