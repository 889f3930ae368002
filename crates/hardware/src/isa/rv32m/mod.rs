//! RISC-V Multiply/Divide Extension (M), RV32 subset.
//!
//! The M instructions share the register-register opcode with the base set and
//! are distinguished by a dedicated `funct7`.

/// Function code 3 definitions for multiply/divide operations.
pub mod funct3;

/// Function code 7 shared by all multiply/divide operations.
pub mod funct7;
