//! Core processor implementation.
//!
//! This module contains the pipelined CPU: its architectural state, the
//! functional units used by the stages, and the stage logic itself.

/// Architectural state (general-purpose register file).
pub mod arch;

/// CPU state and the per-cycle driver.
pub mod cpu;

/// Pipeline stages, latches, and control signals.
pub mod pipeline;

/// Functional units (ALU, branch resolution).
pub mod units;

pub use self::cpu::Cpu;
