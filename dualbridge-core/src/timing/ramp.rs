//! Step-wise acceleration ramp
//!
//! A ramp walks the speed from `from` to `to` one percentage point at a
//! time, holding each step for at least `step_ms`. Each poll advances at most
//! one step.
//!
//! ```text
//!            first poll               poll >= next step          step reaches `to`
//!   Idle ───────────────▶ Stepping ─────────────────────▶ Stepping ───────────────▶ Finished
//!    ▲      Start(from)      │  ▲        Step(speed)                  Done(to)         │
//!    │                       │  └── Hold (before next step)                          │
//!    └───────────────────────┴──────────── cancel / new parameters ◀────────────────┘
//! ```
//!
//! A finished ramp stays latched between back-to-back polls: polling again
//! with the same parameters while the motor still runs at `to` reports
//! [`RampPoll::Settled`] and changes nothing. Different parameters, a speed
//! moved by some other command, or [`Ramp::release`] start a fresh episode.

use dualbridge_hal::Millis;

use crate::speed::Speed;

/// Parameters of one ramp episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampParams {
    /// Speed applied when the episode starts
    pub from: Speed,
    /// Speed at which the episode completes
    pub to: Speed,
    /// Minimum time between steps
    pub step_ms: u32,
}

impl RampParams {
    /// Whether there is nothing to ramp
    pub fn is_flat(&self) -> bool {
        self.from == self.to
    }

    /// Number of steps from `from` to `to`
    pub fn step_count(&self) -> u8 {
        self.from.percent().abs_diff(self.to.percent())
    }
}

/// Outcome of polling a [`Ramp`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampPoll {
    /// Episode started; apply the starting speed
    Start(Speed),
    /// Waiting for the next step; no side effects
    Hold,
    /// Apply the next intermediate speed
    Step(Speed),
    /// Apply the final speed; the episode completed on this poll
    Done(Speed),
    /// Nothing to do, already at the target (flat ramp or latched finish)
    Settled,
}

impl RampPoll {
    /// Speed the driver must write for this outcome, if any
    pub fn speed(&self) -> Option<Speed> {
        match *self {
            RampPoll::Start(speed) | RampPoll::Step(speed) | RampPoll::Done(speed) => Some(speed),
            RampPoll::Hold | RampPoll::Settled => None,
        }
    }

    /// Whether the ramp reports completion
    pub fn is_complete(&self) -> bool {
        matches!(self, RampPoll::Done(_) | RampPoll::Settled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RampState {
    #[default]
    Idle,
    Stepping {
        params: RampParams,
        current: Speed,
        next_step_at: Millis,
    },
    Finished(RampParams),
}

/// Acceleration / deceleration ramp state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    state: RampState,
}

impl Ramp {
    /// Create an idle ramp
    pub const fn new() -> Self {
        Self {
            state: RampState::Idle,
        }
    }

    /// Advance the ramp
    ///
    /// # Arguments
    /// - `params`: Requested ramp; ignored while an episode is stepping
    /// - `now`: Current monotonic time
    /// - `motor_speed`: Speed the motor currently runs at, used to decide
    ///   whether a latched finish still holds
    pub fn poll(&mut self, params: RampParams, now: Millis, motor_speed: Speed) -> RampPoll {
        match self.state {
            RampState::Stepping {
                params: active,
                current,
                next_step_at,
            } => {
                if now < next_step_at {
                    return RampPoll::Hold;
                }

                let next = current.step_toward(active.to);
                if next == active.to {
                    self.state = RampState::Finished(active);
                    RampPoll::Done(next)
                } else {
                    self.state = RampState::Stepping {
                        params: active,
                        current: next,
                        next_step_at: now.saturating_add(active.step_ms as Millis),
                    };
                    RampPoll::Step(next)
                }
            }
            RampState::Finished(done) if done == params && motor_speed == done.to => {
                RampPoll::Settled
            }
            RampState::Idle | RampState::Finished(_) => {
                if params.is_flat() {
                    self.state = RampState::Idle;
                    return RampPoll::Settled;
                }

                self.state = RampState::Stepping {
                    params,
                    current: params.from,
                    next_step_at: now.saturating_add(params.step_ms as Millis),
                };
                RampPoll::Start(params.from)
            }
        }
    }

    /// Abandon the current episode and forget any latched finish
    pub fn cancel(&mut self) {
        self.state = RampState::Idle;
    }

    /// Forget a latched finish, leaving a stepping episode alone
    ///
    /// Called whenever the motor does something other than poll the ramp, so
    /// the next poll after that starts a new episode.
    pub fn release(&mut self) {
        if let RampState::Finished(_) = self.state {
            self.state = RampState::Idle;
        }
    }

    /// Check if an episode is stepping
    pub fn is_active(&self) -> bool {
        matches!(self.state, RampState::Stepping { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn speed(percent: u8) -> Speed {
        Speed::new(percent).unwrap()
    }

    fn ramp_params(from: u8, to: u8, step_ms: u32) -> RampParams {
        RampParams {
            from: speed(from),
            to: speed(to),
            step_ms,
        }
    }

    /// Poll every `interval` ms until the ramp reports completion
    ///
    /// Returns the applied speeds in order, with the time each was applied.
    fn run_to_completion(
        ramp: &mut Ramp,
        params: RampParams,
        interval: Millis,
        applied: &mut heapless::Vec<(Millis, Speed), 128>,
    ) -> Millis {
        let mut now = 0;
        let mut motor = Speed::STOP;
        loop {
            let poll = ramp.poll(params, now, motor);
            if let Some(s) = poll.speed() {
                motor = s;
                applied.push((now, s)).unwrap();
            }
            if poll.is_complete() {
                return now;
            }
            now += interval;
        }
    }

    #[test]
    fn test_step_count() {
        assert_eq!(ramp_params(0, 100, 10).step_count(), 100);
        assert_eq!(ramp_params(60, 20, 10).step_count(), 40);
        assert_eq!(ramp_params(7, 7, 10).step_count(), 0);
    }

    #[test]
    fn test_accelerate_steps_one_point_per_interval() {
        let mut ramp = Ramp::new();
        let params = ramp_params(20, 60, 10);
        let mut applied = heapless::Vec::new();

        let done_at = run_to_completion(&mut ramp, params, 1, &mut applied);

        assert_eq!(applied.len(), 41);
        for (i, (_, s)) in applied.iter().enumerate() {
            assert_eq!(s.percent() as usize, 20 + i);
        }
        for pair in applied.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= 10);
        }
        assert_eq!(done_at, 400);
    }

    #[test]
    fn test_decelerate_symmetric() {
        let mut ramp = Ramp::new();
        let params = ramp_params(60, 20, 10);
        let mut applied = heapless::Vec::new();

        run_to_completion(&mut ramp, params, 3, &mut applied);

        assert_eq!(applied.len(), 41);
        for (i, (_, s)) in applied.iter().enumerate() {
            assert_eq!(s.percent() as usize, 60 - i);
        }
    }

    #[test]
    fn test_hold_between_steps() {
        let mut ramp = Ramp::new();
        let params = ramp_params(0, 2, 100);

        assert_eq!(ramp.poll(params, 0, Speed::STOP), RampPoll::Start(speed(0)));
        assert_eq!(ramp.poll(params, 50, Speed::STOP), RampPoll::Hold);
        assert_eq!(ramp.poll(params, 99, Speed::STOP), RampPoll::Hold);
        assert_eq!(ramp.poll(params, 100, Speed::STOP), RampPoll::Step(speed(1)));
        assert_eq!(ramp.poll(params, 150, speed(1)), RampPoll::Hold);
        assert_eq!(ramp.poll(params, 200, speed(1)), RampPoll::Done(speed(2)));
    }

    #[test]
    fn test_flat_ramp_settles_immediately() {
        let mut ramp = Ramp::new();
        let params = ramp_params(40, 40, 10);

        assert_eq!(ramp.poll(params, 0, Speed::STOP), RampPoll::Settled);
        assert!(!ramp.is_active());
    }

    #[test]
    fn test_finished_ramp_stays_latched() {
        let mut ramp = Ramp::new();
        let params = ramp_params(0, 1, 10);

        ramp.poll(params, 0, Speed::STOP);
        assert_eq!(ramp.poll(params, 10, Speed::STOP), RampPoll::Done(speed(1)));

        assert_eq!(ramp.poll(params, 20, speed(1)), RampPoll::Settled);
        assert_eq!(ramp.poll(params, 5_000, speed(1)), RampPoll::Settled);
    }

    #[test]
    fn test_latch_released_when_speed_changed_elsewhere() {
        let mut ramp = Ramp::new();
        let params = ramp_params(0, 1, 10);

        ramp.poll(params, 0, Speed::STOP);
        ramp.poll(params, 10, Speed::STOP);

        // Some other command stopped the motor
        assert_eq!(ramp.poll(params, 20, Speed::STOP), RampPoll::Start(speed(0)));
    }

    #[test]
    fn test_latch_released_by_new_params() {
        let mut ramp = Ramp::new();
        let up = ramp_params(0, 1, 10);
        let down = ramp_params(1, 0, 10);

        ramp.poll(up, 0, Speed::STOP);
        ramp.poll(up, 10, Speed::STOP);

        assert_eq!(ramp.poll(down, 20, speed(1)), RampPoll::Start(speed(1)));
        assert_eq!(ramp.poll(down, 30, speed(1)), RampPoll::Done(speed(0)));
    }

    #[test]
    fn test_params_ignored_while_stepping() {
        let mut ramp = Ramp::new();
        let params = ramp_params(10, 12, 10);
        let other = ramp_params(90, 0, 1);

        ramp.poll(params, 0, Speed::STOP);
        assert_eq!(ramp.poll(other, 5, speed(10)), RampPoll::Hold);
        assert_eq!(ramp.poll(other, 10, speed(10)), RampPoll::Step(speed(11)));
        assert_eq!(ramp.poll(other, 20, speed(11)), RampPoll::Done(speed(12)));
    }

    #[test]
    fn test_cancel_forgets_latch() {
        let mut ramp = Ramp::new();
        let params = ramp_params(0, 1, 10);

        ramp.poll(params, 0, Speed::STOP);
        ramp.poll(params, 10, Speed::STOP);
        ramp.cancel();

        assert_eq!(ramp.poll(params, 20, speed(1)), RampPoll::Start(speed(0)));
    }

    #[test]
    fn test_release_restarts_same_params() {
        let mut ramp = Ramp::new();
        let params = ramp_params(0, 60, 10);

        ramp.poll(params, 0, Speed::STOP);
        let mut now = 0;
        while !ramp.poll(params, now, speed(60)).is_complete() {
            now += 10;
        }
        assert_eq!(ramp.poll(params, now, speed(60)), RampPoll::Settled);

        ramp.release();

        // Still at the target speed, yet a fresh episode starts
        assert_eq!(ramp.poll(params, now + 500, speed(60)), RampPoll::Start(speed(0)));
        assert!(ramp.is_active());
    }

    #[test]
    fn test_release_keeps_stepping_episode() {
        let mut ramp = Ramp::new();
        let params = ramp_params(5, 8, 1);

        ramp.poll(params, 0, Speed::STOP);
        ramp.release();

        assert!(ramp.is_active());
        assert_eq!(ramp.poll(params, 1, speed(5)), RampPoll::Step(speed(6)));
    }

    proptest! {
        #[test]
        fn prop_ramp_is_monotonic_unit_steps(
            from in 0i32..=100,
            to in 0i32..=100,
            step_ms in 0u32..50,
            interval in 1u64..20,
        ) {
            let params = RampParams {
                from: Speed::saturating_from(from),
                to: Speed::saturating_from(to),
                step_ms,
            };
            let mut ramp = Ramp::new();
            let mut applied = heapless::Vec::new();

            run_to_completion(&mut ramp, params, interval, &mut applied);

            if params.is_flat() {
                prop_assert!(applied.is_empty());
            } else {
                prop_assert_eq!(applied.len(), params.step_count() as usize + 1);
                prop_assert_eq!(applied[0].1, params.from);
                prop_assert_eq!(applied[applied.len() - 1].1, params.to);
                for pair in applied.windows(2) {
                    prop_assert_eq!(pair[0].1.percent().abs_diff(pair[1].1.percent()), 1);
                    prop_assert!(pair[1].0 - pair[0].0 >= step_ms as u64);
                }
            }
        }
    }
}
