//! RISC-V M-Extension Function Code (funct7).

/// funct7 selecting the multiply/divide group within `OP_REG`.
pub const M_EXTENSION: u32 = 0b0000001;
