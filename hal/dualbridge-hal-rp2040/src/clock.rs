//! Monotonic clock backed by the embassy time driver

use dualbridge_hal::{Millis, MonotonicClock};
use embassy_time::Instant;

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_ms(&self) -> Millis {
        Instant::now().as_millis()
    }
}
