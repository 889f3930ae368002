//! Execution units and functional components.
//!
//! This module contains the stateless functional units driven by the pipeline:
//! the integer ALU used in execute and the branch resolution unit used in decode.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (taken/not-taken decision and target computation).
pub mod bru;
