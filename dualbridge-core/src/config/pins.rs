//! Pin assignment and allocation
//!
//! Pins are identified by GPIO number. Specs written in config files look
//! like `"gpio4"`, or `"!gpio4"` for an active-low (inverted) output.

use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Upper bound (exclusive) on GPIO numbers tracked by [`PinAllocator`]
pub const GPIO_LIMIT: u8 = 32;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Parse a pin spec string
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, inverted (active-low)
pub fn parse_pin_spec(s: &str) -> Result<PinConfig, ConfigError> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let number = s
        .strip_prefix("gpio")
        .ok_or(ConfigError::InvalidPinSpec)?;
    let pin: u8 = number.parse().map_err(|_| ConfigError::InvalidPinSpec)?;

    Ok(if inverted {
        PinConfig::inverted(pin)
    } else {
        PinConfig::new(pin)
    })
}

/// Tracks which GPIO pins are in use to prevent conflicts
pub struct PinAllocator {
    /// Pins below this number are allocatable
    limit: u8,
    /// Set of allocated GPIO pins
    allocated: FnvIndexSet<u8, 32>,
}

impl PinAllocator {
    /// Create an allocator for a chip with `gpio_count` pins
    ///
    /// Counts above [`GPIO_LIMIT`] are capped.
    pub fn new(gpio_count: u8) -> Self {
        Self {
            limit: gpio_count.min(GPIO_LIMIT),
            allocated: FnvIndexSet::new(),
        }
    }

    /// Allocate a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), ConfigError> {
        if pin >= self.limit {
            return Err(ConfigError::InvalidPin(pin));
        }
        if self.allocated.contains(&pin) {
            return Err(ConfigError::PinConflict(pin));
        }
        self.allocated
            .insert(pin)
            .map_err(|_| ConfigError::InvalidPin(pin))?;
        Ok(())
    }
}
