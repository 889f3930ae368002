//! RISC-V architectural state.
//!
//! The simulated core exposes a single piece of architectural state besides the
//! program counter: the integer register file.

/// General-Purpose Register file implementation.
pub mod gpr;

pub use gpr::RegisterFile;
