//! Blink pattern derived from the monotonic clock

use dualbridge_hal::Millis;

/// Short pulse once per period
pub struct Heartbeat {
    period_ms: Millis,
    pulse_ms: Millis,
}

impl Heartbeat {
    pub fn new(period_ms: Millis, pulse_ms: Millis) -> Self {
        Self {
            period_ms: period_ms.max(1),
            pulse_ms,
        }
    }

    /// Whether the LED should be lit at `now`
    pub fn is_on(&self, now: Millis) -> bool {
        now % self.period_ms < self.pulse_ms
    }
}
