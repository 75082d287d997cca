//! One-shot countdown used by timed runs and timed waits

use dualbridge_hal::Millis;

/// Outcome of polling a [`Countdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerPoll {
    /// The countdown was idle and has been armed by this poll
    Armed {
        /// Time at which the episode completes
        deadline: Millis,
    },
    /// Armed, deadline not yet reached
    Pending,
    /// Deadline reached on this poll; the countdown is idle again
    Elapsed,
}

/// Idle / armed countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    deadline: Option<Millis>,
}

impl Countdown {
    /// Create an idle countdown
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Advance the countdown
    ///
    /// `duration_ms` is only read when arming; polls during an episode
    /// ignore it.
    pub fn poll(&mut self, now: Millis, duration_ms: u32) -> TimerPoll {
        match self.deadline {
            None => {
                let deadline = now.saturating_add(duration_ms as Millis);
                self.deadline = Some(deadline);
                TimerPoll::Armed { deadline }
            }
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                TimerPoll::Elapsed
            }
            Some(_) => TimerPoll::Pending,
        }
    }

    /// Drop a pending deadline without completing the episode
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check if an episode is in progress
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_arms() {
        let mut timer = Countdown::new();
        assert!(!timer.is_active());

        assert_eq!(timer.poll(100, 500), TimerPoll::Armed { deadline: 600 });
        assert!(timer.is_active());
        assert_eq!(timer.poll(599, 500), TimerPoll::Pending);
    }

    #[test]
    fn test_elapses_exactly_once() {
        let mut timer = Countdown::new();
        timer.poll(0, 50);

        let mut elapsed = 0;
        let mut first_elapsed_at = None;
        for now in (0..=200).step_by(7) {
            if timer.is_active() && timer.poll(now, 50) == TimerPoll::Elapsed {
                elapsed += 1;
                first_elapsed_at.get_or_insert(now);
            }
        }

        assert_eq!(elapsed, 1);
        // First multiple of 7 at or after 50
        assert_eq!(first_elapsed_at, Some(56));
        assert!(!timer.is_active());
    }

    #[test]
    fn test_elapses_at_deadline_not_after() {
        let mut timer = Countdown::new();
        timer.poll(10, 20);

        assert_eq!(timer.poll(29, 20), TimerPoll::Pending);
        assert_eq!(timer.poll(30, 20), TimerPoll::Elapsed);
    }

    #[test]
    fn test_duration_ignored_while_armed() {
        let mut timer = Countdown::new();
        timer.poll(0, 100);

        // A longer duration on later polls does not move the deadline
        assert_eq!(timer.poll(99, 10_000), TimerPoll::Pending);
        assert_eq!(timer.poll(100, 10_000), TimerPoll::Elapsed);
    }

    #[test]
    fn test_zero_duration_completes_on_next_poll() {
        let mut timer = Countdown::new();

        assert_eq!(timer.poll(5, 0), TimerPoll::Armed { deadline: 5 });
        assert_eq!(timer.poll(5, 0), TimerPoll::Elapsed);
    }

    #[test]
    fn test_rearms_after_completion() {
        let mut timer = Countdown::new();
        timer.poll(0, 10);
        assert_eq!(timer.poll(10, 10), TimerPoll::Elapsed);

        assert_eq!(timer.poll(15, 10), TimerPoll::Armed { deadline: 25 });
    }

    #[test]
    fn test_cancel() {
        let mut timer = Countdown::new();
        timer.poll(0, 10);
        timer.cancel();

        assert!(!timer.is_active());
        assert_eq!(timer.poll(1_000, 10), TimerPoll::Armed { deadline: 1_010 });
    }

    #[test]
    fn test_deadline_saturates() {
        let mut timer = Countdown::new();
        assert_eq!(
            timer.poll(Millis::MAX - 1, 10),
            TimerPoll::Armed {
                deadline: Millis::MAX
            }
        );
    }
}
