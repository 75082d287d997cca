//! Speed percentage and PWM duty mapping
//!
//! Speeds are commanded as integer percentages. Anything outside 0..=100 is
//! silently clamped; this is a normal input, not a failure.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor speed as a percentage of full duty (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Speed(u8);

impl Speed {
    /// Motor off
    pub const STOP: Speed = Speed(0);
    /// Full duty
    pub const FULL: Speed = Speed(100);

    /// Create a speed, rejecting values above 100%
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Create a speed from any integer, clamping into 0..=100
    pub fn saturating_from(percent: i32) -> Self {
        Self(percent.clamp(0, 100) as u8)
    }

    /// Percentage value
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Convert to a raw duty value for a channel whose 100% is `max_duty`
    ///
    /// Rounds half up, so with a 10-bit channel (`max_duty = 1023`) 50%
    /// maps to 512 and 1% maps to 10.
    pub fn to_duty(self, max_duty: u16) -> u16 {
        ((self.0 as u32 * max_duty as u32 + 50) / 100) as u16
    }

    /// Move one percentage point toward `target`
    pub fn step_toward(self, target: Speed) -> Speed {
        match self.0.cmp(&target.0) {
            core::cmp::Ordering::Less => Speed(self.0 + 1),
            core::cmp::Ordering::Greater => Speed(self.0 - 1),
            core::cmp::Ordering::Equal => self,
        }
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> u8 {
        speed.0
    }
}
