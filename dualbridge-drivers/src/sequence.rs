//! Motion sequences
//!
//! Small state machines that chain the timed motor operations. Each one is
//! polled once per loop iteration and never blocks, so several sequences on
//! different motors advance side by side.
//!
//! Within one poll a sequence falls through to the next state as soon as
//! the current step completes, so the next step starts without losing a
//! loop iteration.

use dualbridge_core::traits::DcMotorDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ShuttleState {
    Running,
    Pausing,
}

/// Run, pause, reverse, repeat
pub struct Shuttle {
    state: ShuttleState,
    speed: i32,
    run_ms: u32,
    pause_ms: u32,
}

impl Shuttle {
    pub fn new(speed: i32, run_ms: u32, pause_ms: u32) -> Self {
        Self {
            state: ShuttleState::Running,
            speed,
            run_ms,
            pause_ms,
        }
    }

    pub fn poll<M: DcMotorDriver>(&mut self, motor: &mut M) {
        if self.state == ShuttleState::Running && motor.run_for(self.speed, self.run_ms) {
            self.state = ShuttleState::Pausing;
        }
        if self.state == ShuttleState::Pausing && motor.wait_for(self.pause_ms) {
            motor.reverse_rotation();
            info!("motor {}: now {}", motor.label(), motor.get_direction());
            self.state = ShuttleState::Running;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum CycleState {
    /// 0 to 100% at the motor's configured step interval
    SpeedUp,
    Cruise,
    SlowDown,
    /// Braked, direction already flipped
    Rest,
}

/// Timings of a [`RampCycle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampCycleTimings {
    pub cruise_speed: i32,
    pub cruise_ms: u32,
    /// Step interval while slowing from cruise speed to 0
    pub slow_down_step_ms: u32,
    pub rest_ms: u32,
}

impl Default for RampCycleTimings {
    fn default() -> Self {
        Self {
            cruise_speed: 50,
            cruise_ms: 2000,
            slow_down_step_ms: 100,
            rest_ms: 5000,
        }
    }
}

/// Soft start, cruise, soft stop, brake and reverse, rest
pub struct RampCycle {
    state: CycleState,
    timings: RampCycleTimings,
}

impl Default for RampCycle {
    fn default() -> Self {
        Self::new(RampCycleTimings::default())
    }
}

impl RampCycle {
    pub fn new(timings: RampCycleTimings) -> Self {
        Self {
            state: CycleState::SpeedUp,
            timings,
        }
    }

    pub fn poll<M: DcMotorDriver>(&mut self, motor: &mut M) {
        let before = self.state;
        let t = self.timings;

        if self.state == CycleState::SpeedUp && motor.accelerate_default(0, 100) {
            self.state = CycleState::Cruise;
        }
        if self.state == CycleState::Cruise && motor.run_for(t.cruise_speed, t.cruise_ms) {
            self.state = CycleState::SlowDown;
        }
        if self.state == CycleState::SlowDown
            && motor.accelerate(t.cruise_speed, 0, t.slow_down_step_ms)
        {
            motor.brake();
            motor.reverse_rotation();
            self.state = CycleState::Rest;
        }
        if self.state == CycleState::Rest && motor.wait_for(t.rest_ms) {
            self.state = CycleState::SpeedUp;
        }

        if self.state != before {
            debug!("motor {}: {} -> {}", motor.label(), before, self.state);
        }
    }
}
