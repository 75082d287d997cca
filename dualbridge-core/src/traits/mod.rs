//! Motor driver traits
//!
//! These traits define the interface between the application loop and the
//! motor implementations in `dualbridge-drivers`.

pub mod motor;

pub use motor::{BridgeState, DcMotorDriver, Direction, MotorError, MotorStatus};
