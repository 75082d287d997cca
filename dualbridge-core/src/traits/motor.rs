//! DC motor driver trait for H-bridge channels
//!
//! Every operation is non-blocking and meant to be called from a single
//! cooperative loop. Timed operations (`run_for`, `wait_for`, `accelerate`)
//! are polled: call them on every loop iteration until they return `true`.
//!
//! ## L298N Truth Table
//!
//! | EN  | IN1 | IN2 | Bridge state                    |
//! |-----|-----|-----|---------------------------------|
//! | PWM | 1   | 0   | Forward (clockwise)             |
//! | PWM | 0   | 1   | Reverse (counter-clockwise)     |
//! | 1   | 1   | 1   | Brake (fast motor stop)         |
//! | 0   | 0   | 0   | Coast (free running motor stop) |

use dualbridge_hal::PwmError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::speed::Speed;

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation (forward input asserted)
    #[default]
    Clockwise,
    /// Counter-clockwise rotation (reverse input asserted)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Encoded state of the bridge inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeState {
    /// Forward input high, reverse input low
    Forward,
    /// Forward input low, reverse input high
    Reverse,
    /// Both inputs high, enable fully on
    Brake,
    /// Both inputs low, enable off
    Coast,
}

impl BridgeState {
    /// Bridge state that drives the motor in `direction`
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => BridgeState::Forward,
            Direction::CounterClockwise => BridgeState::Reverse,
        }
    }

    /// Levels of the (forward, reverse) inputs
    pub fn input_levels(self) -> (bool, bool) {
        match self {
            BridgeState::Forward => (true, false),
            BridgeState::Reverse => (false, true),
            BridgeState::Brake => (true, true),
            BridgeState::Coast => (false, false),
        }
    }

    /// Check if the bridge passes PWM current through the motor
    pub fn is_driving(self) -> bool {
        matches!(self, BridgeState::Forward | BridgeState::Reverse)
    }
}

/// Errors that can occur when constructing a motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Invalid motor configuration
    Config(ConfigError),
    /// PWM channel rejected the configured frequency
    Pwm(PwmError),
}

impl From<ConfigError> for MotorError {
    fn from(err: ConfigError) -> Self {
        MotorError::Config(err)
    }
}

impl From<PwmError> for MotorError {
    fn from(err: PwmError) -> Self {
        MotorError::Pwm(err)
    }
}

/// Snapshot of a motor for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorStatus {
    /// Intended rotation sense
    pub direction: Direction,
    /// Last commanded speed
    pub speed: Speed,
    /// Current bridge input state
    pub bridge: BridgeState,
    /// Raw duty on the enable line
    pub duty: u16,
    /// Timed run in progress
    pub run_active: bool,
    /// Timed wait in progress
    pub wait_active: bool,
    /// Acceleration ramp stepping
    pub ramping: bool,
}

/// Trait for brushed DC motors behind one H-bridge channel
///
/// Speeds are integer percentages; out-of-range values are clamped into
/// 0..=100, never rejected.
///
/// # Timing
///
/// Timed operations complete no earlier than their deadline and are detected
/// on the first poll at or after it. Accuracy therefore depends on the
/// caller polling frequently. The run timer, the wait timer and the ramp are
/// independent; callers usually sequence them with their own state machine.
pub trait DcMotorDriver {
    /// Motor label from the configuration
    fn label(&self) -> &str;

    /// Set the rotation direction
    ///
    /// Does not change the speed. Leaving brake or coast restores the enable
    /// duty for the current speed.
    fn rotation(&mut self, direction: Direction);

    /// Reverse the rotation direction
    fn reverse_rotation(&mut self) {
        let opposite = self.get_direction().opposite();
        self.rotation(opposite);
    }

    /// Short the motor terminals for a rapid stop
    ///
    /// Sets the speed to 0 and keeps the direction. Normal rotation resumes
    /// only after [`rotation`](Self::rotation) or [`run`](Self::run).
    fn brake(&mut self);

    /// Release the motor to spin down freely
    fn coast(&mut self);

    /// Run at `speed` percent in the current direction
    fn run(&mut self, speed: i32);

    /// Run at `speed` for `ms_to_run` milliseconds, then stop
    ///
    /// The first call starts the motor and returns `false`. Later calls only
    /// check the deadline; the call that finds it reached stops the motor and
    /// returns `true`. The next call starts a new run.
    fn run_for(&mut self, speed: i32, ms_to_run: u32) -> bool;

    /// Wait `ms_wait` milliseconds without touching the hardware
    ///
    /// Same polling contract as [`run_for`](Self::run_for).
    fn wait_for(&mut self, ms_wait: u32) -> bool;

    /// Ramp from `speed_from` to `speed_to` in 1% steps of `ms_wait` each
    ///
    /// Returns `true` once the motor reaches `speed_to`. Polling again with
    /// the same arguments while still at `speed_to` keeps returning `true`
    /// without further writes. Equal speeds complete immediately.
    fn accelerate(&mut self, speed_from: i32, speed_to: i32, ms_wait: u32) -> bool;

    /// [`accelerate`](Self::accelerate) with the configured step interval
    fn accelerate_default(&mut self, speed_from: i32, speed_to: i32) -> bool {
        let step = self.ramp_step_ms();
        self.accelerate(speed_from, speed_to, step)
    }

    /// Drop pending run/wait deadlines and the ramp without touching the
    /// hardware
    fn cancel(&mut self);

    /// Configured acceleration step interval
    fn ramp_step_ms(&self) -> u32;

    /// Get the current direction
    fn get_direction(&self) -> Direction;

    /// Get the last commanded speed
    fn get_speed(&self) -> Speed;

    /// Get the bridge input state
    fn bridge_state(&self) -> BridgeState;

    /// Check if a timed run is in progress
    fn is_run_active(&self) -> bool;

    /// Check if a timed wait is in progress
    fn is_wait_active(&self) -> bool;

    /// Check if an acceleration ramp is stepping
    fn is_ramping(&self) -> bool;

    /// Snapshot for logging
    fn status(&self) -> MotorStatus;
}
