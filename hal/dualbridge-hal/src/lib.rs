//! Dualbridge Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities a motor controller consumes.
//! Chip-specific HALs (RP2040, ...) implement them so the same motor logic
//! runs on any board, and on the host with fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (dualbridge-firmware)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dualbridge-drivers (HBridgeMotor)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dualbridge-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ dualbridge-hal- │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (bridge direction inputs)
//! - [`pwm::PwmOutput`] - PWM channel (bridge enable line)
//! - [`clock::MonotonicClock`] - Millisecond time base for poll-driven timers

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
#[cfg(feature = "embedded-hal")]
pub mod compat;
pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use clock::{Millis, MonotonicClock};
pub use gpio::OutputPin;
pub use pwm::{PwmError, PwmOutput, PwmTiming};
