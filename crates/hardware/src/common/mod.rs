//! Common types used throughout the simulator.
//!
//! The only shared concern today is error reporting: every fallible operation in the
//! core returns a [`SimError`], while the assembler and codec carry their own error
//! types that convert into it.

/// Error conditions raised by the core, memory, and run control.
pub mod error;

pub use error::{SimError, SimResult};
