//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) selects alternate operations for R-type
//! instructions that share an opcode and funct3 (ADD vs SUB).

/// Default funct7 for standard register-register operations.
pub const DEFAULT: u32 = 0b0000000;

/// Alternate funct7 selecting SUB over ADD.
pub const SUB: u32 = 0b0100000;
