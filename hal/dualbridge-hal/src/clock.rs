//! Monotonic time source
//!
//! All poll-driven timers compare against this clock, never against wall
//! time, so clock adjustments cannot shorten or stretch an episode.

/// Milliseconds since an arbitrary, fixed epoch (usually boot)
pub type Millis = u64;

/// Monotonic millisecond clock
///
/// `now_ms` must never decrease between calls. The 64-bit range means the
/// value does not wrap within the lifetime of any realistic device.
pub trait MonotonicClock {
    /// Read the current time in milliseconds
    fn now_ms(&self) -> Millis;
}

/// Several motors can share one clock by reference
impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Fixed(Cell<Millis>);

    impl MonotonicClock for Fixed {
        fn now_ms(&self) -> Millis {
            self.0.get()
        }
    }

    #[test]
    fn test_shared_reference_reads_same_clock() {
        let clock = Fixed(Cell::new(42));
        let a = &clock;
        let b = &clock;

        assert_eq!(a.now_ms(), 42);
        clock.0.set(1_000);
        assert_eq!(b.now_ms(), 1_000);
    }
}
