//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Names every ALU operation.
//! 2. **Operand Selection:** Chooses the ALU's second input (register or immediate).
//! 3. **Memory and Write-back Control:** Flags loads, stores, and register writes.
//! 4. **Control Transfer:** Flags branches and jumps resolved in decode.

use std::fmt;
use std::str::FromStr;

use crate::common::SimError;
use crate::isa::instruction::{Format, Mnemonic};

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Wrapping addition.
    #[default]
    Add,

    /// Wrapping subtraction.
    Sub,

    /// Bitwise AND.
    And,

    /// Bitwise OR.
    Or,

    /// Bitwise XOR.
    Xor,

    /// Bitwise NOR.
    Nor,

    /// Bitwise complement of the first operand.
    Not,

    /// Set less than (signed).
    Slt,

    /// Multiply (low 32 bits).
    Mul,

    /// Unsigned divide.
    Div,

    /// Unsigned remainder.
    Rem,

    /// Shift left logical.
    Sll,

    /// Shift right logical.
    Srl,
}

impl AluOp {
    /// Every ALU operation.
    pub const ALL: [Self; 13] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Nor,
        Self::Not,
        Self::Slt,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Sll,
        Self::Srl,
    ];

    /// Upper-case operation name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Nor => "NOR",
            Self::Not => "NOT",
            Self::Slt => "SLT",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Rem => "REM",
            Self::Sll => "SLL",
            Self::Srl => "SRL",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AluOp {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnsupportedOperation(s.to_string()))
    }
}

/// Source of the ALU's second operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Value of `rs2`.
    #[default]
    Reg2,
    /// Sign-extended immediate.
    Imm,
}

/// Control signals produced by the decode stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Write the result back to `rd`.
    pub reg_write: bool,
    /// Read data memory at the ALU result.
    pub mem_read: bool,
    /// Write `rs2` to data memory at the ALU result.
    pub mem_write: bool,
    /// Conditional branch.
    pub branch: bool,
    /// Unconditional jump; the result is the link address `pc + 4`.
    pub jump: bool,
    /// Second ALU operand source.
    pub alu_src: OpBSrc,
    /// ALU operation.
    pub alu: AluOp,
}

impl ControlSignals {
    /// Derives the control signals for a mnemonic.
    ///
    /// Branches drive `SUB` through the ALU; the comparison itself happens in decode.
    pub const fn for_mnemonic(mnemonic: Mnemonic) -> Self {
        let format = mnemonic.format();
        let alu = match mnemonic {
            Mnemonic::Sub | Mnemonic::Beq | Mnemonic::Bne | Mnemonic::Blt | Mnemonic::Bge => {
                AluOp::Sub
            }
            Mnemonic::And => AluOp::And,
            Mnemonic::Or => AluOp::Or,
            Mnemonic::Xor => AluOp::Xor,
            Mnemonic::Sll => AluOp::Sll,
            Mnemonic::Srl => AluOp::Srl,
            Mnemonic::Mul => AluOp::Mul,
            Mnemonic::Div => AluOp::Div,
            Mnemonic::Rem => AluOp::Rem,
            Mnemonic::Add
            | Mnemonic::Addi
            | Mnemonic::Lw
            | Mnemonic::Sw
            | Mnemonic::Jalr
            | Mnemonic::Jal
            | Mnemonic::J => AluOp::Add,
        };
        Self {
            reg_write: format.writes_rd(),
            mem_read: matches!(mnemonic, Mnemonic::Lw),
            mem_write: matches!(mnemonic, Mnemonic::Sw),
            branch: matches!(format, Format::B),
            jump: mnemonic.is_link(),
            alu_src: if matches!(format, Format::R) {
                OpBSrc::Reg2
            } else {
                OpBSrc::Imm
            },
            alu,
        }
    }
}
