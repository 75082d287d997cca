//! Poll-driven timers
//!
//! Every timed motor operation is an *episode*: the first poll arms a
//! deadline, later polls compare the current time against it, and the poll
//! at or after the deadline completes the episode exactly once. Nothing here
//! sleeps; the caller supplies `now` from a monotonic clock on every poll.
//!
//! The timers only report what happened. Applying the matching side effect
//! (stopping the motor, writing the next ramp step) is up to the driver.
//!
//! # Polling precondition
//!
//! Completion is detected on the first poll at or after the deadline, so
//! accuracy is bounded by how often the caller's loop polls.

pub mod countdown;
pub mod ramp;

pub use countdown::{Countdown, TimerPoll};
pub use ramp::{Ramp, RampParams, RampPoll};
