//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dualbridge-core:
//!
//! - H-bridge DC motor (direction pins + PWM enable, L298N class)
//! - Motion sequences built from the poll-driven motor operations

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod motor;
pub mod sequence;

#[cfg(test)]
mod testing;
