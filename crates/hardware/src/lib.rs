//! Instructional RV32 pipeline simulator library.
//!
//! This crate translates RV32 assembly into machine words and executes them on a
//! five-stage pipelined datapath. It provides the following:
//! 1. **ISA:** One shared bit-layout table driving both the decoder and the encoder.
//! 2. **Assembler:** Two-pass text-to-word translation with label resolution.
//! 3. **Core:** ALU, register file, and the IF/ID/EX/MEM/WB pipeline engine.
//! 4. **SoC:** Flat byte-addressable data memory.
//! 5. **Simulation:** Program loading, run control, snapshots, and statistics.

/// Two-pass assembler (lexer, operand parsing, label resolution).
pub mod asm;
/// Common types shared across the simulator (error conditions).
pub mod common;
/// Simulator configuration (defaults and JSON-deserializable structures).
pub mod config;
/// CPU core (architectural state, functional units, pipeline stages).
pub mod core;
/// Instruction set (formats, mnemonics, decode, encode, ABI names, disassembly).
pub mod isa;
/// Program loading, run control, and per-cycle snapshots.
pub mod sim;
/// Data memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline engine holding all architectural and latch state.
pub use crate::core::Cpu;
/// Top-level run-control facade used by front ends.
pub use crate::sim::Simulator;
