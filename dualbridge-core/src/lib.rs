//! Board-agnostic core logic for dualbridge motor control
//!
//! This crate contains all motor logic that does not depend on specific
//! hardware implementations:
//!
//! - Motor driver trait and shared motor types
//! - Speed clamping and PWM duty mapping
//! - Poll-driven timers (countdowns and acceleration ramps)
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

// proptest macros expand to `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod speed;
pub mod timing;
pub mod traits;

pub use speed::Speed;
