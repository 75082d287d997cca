//! Motor driver implementations
//!
//! - H-bridge DC motors: direction inputs plus a PWM enable line, with
//!   poll-driven timed runs, waits and acceleration ramps

pub mod dc;

pub use dc::HBridgeMotor;
