//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the instruction model, the shared bit-layout table, and the codec
//! built on it, organized by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set subset (add, sub, logic, shifts, addi, lw, sw, branches, jumps).
//! * `rv32m`: Multiply/divide subset (mul, div, rem).

/// Application Binary Interface (ABI) register names and the symbolic name table.
pub mod abi;

/// Instruction decoding into [`instruction::Instruction`].
pub mod decode;

/// Instruction disassembler for snapshots and diagnostics.
pub mod disasm;

/// Instruction encoding from [`instruction::Instruction`].
pub mod encode;

/// Formats, mnemonics, and the decoded instruction record.
pub mod instruction;

/// The single authoritative bit layout shared by decode and encode.
pub mod layout;

/// Base integer instruction set constants.
pub mod rv32i;

/// Integer multiply/divide extension constants.
pub mod rv32m;

pub use decode::{DecodeError, decode};
pub use encode::{EncodeError, encode};
pub use instruction::{Format, Instruction, Mnemonic};
