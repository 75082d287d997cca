//! Board-side sequences
//!
//! Motor sequences live in `dualbridge_drivers::sequence`; only the LED
//! pattern is specific to this board.

pub mod heartbeat;

pub use heartbeat::Heartbeat;
