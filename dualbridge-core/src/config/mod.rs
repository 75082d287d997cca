//! Configuration types
//!
//! Board-agnostic configuration structures for motors and the bridge
//! channels they are wired to, plus validation helpers.

pub mod hardware;
pub mod pins;

pub use hardware::*;
pub use pins::{parse_pin_spec, PinAllocator, PinConfig, GPIO_LIMIT};

/// Errors that can occur when validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Motor label longer than [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// Two channels share a label
    DuplicateLabel,
    /// More than [`MAX_CHANNELS`] channels
    TooManyChannels,
    /// PWM frequency of zero
    ZeroFrequency,
    /// Pin number outside the allocatable range
    InvalidPin(u8),
    /// Pin assigned more than once
    PinConflict(u8),
    /// Pin specification string could not be parsed
    InvalidPinSpec,
}
