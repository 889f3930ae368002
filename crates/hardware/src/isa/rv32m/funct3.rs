//! RISC-V M-Extension Function Codes (funct3).

/// Multiply (low 32 bits).
pub const MUL: u32 = 0b000;
/// Divide.
pub const DIV: u32 = 0b100;
/// Remainder.
pub const REM: u32 = 0b110;
