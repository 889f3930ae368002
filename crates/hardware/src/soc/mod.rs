//! System-on-Chip (SoC) Components.
//!
//! The simulated system has a single memory-side component: the data memory
//! accessed by the MEM stage. Instructions live in a separate word store owned
//! by the CPU.

/// Byte-addressable data memory.
pub mod memory;

pub use memory::DataMemory;
