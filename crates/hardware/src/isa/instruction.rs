//! Instruction model: formats, mnemonics, and the decoded instruction record.
//!
//! This module defines the fixed instruction set as a closed enum. It provides:
//! 1. **Field Extraction:** The [`InstructionBits`] trait over raw 32-bit words.
//! 2. **Formats:** The five bit layouts and which operand fields each carries.
//! 3. **Mnemonics:** One variant per supported instruction with a single total
//!    mapping to its format, opcode, funct3, and funct7.
//! 4. **Instructions:** The decoded record shared by the codec, assembler, and pipeline.

use std::fmt;
use std::str::FromStr;

use crate::isa::layout::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK, RD_SHIFT, REG_MASK,
    RS1_SHIFT, RS2_SHIFT,
};
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes};
use crate::isa::rv32m::{funct3 as m_f3, funct7 as m_f7};

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 6-0).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 11-7).
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 19-15).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 24-20).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 14-12).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 31-25).
    ///
    /// Distinguishes ADD from SUB and the M extension from the base set.
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }
}

/// Instruction bit layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register: `funct7 rs2 rs1 funct3 rd opcode`.
    R,
    /// Register-immediate, loads, and `jalr`: `imm[11:0] rs1 funct3 rd opcode`.
    I,
    /// Stores: immediate split around `rs2 rs1 funct3`.
    S,
    /// Conditional branches: scrambled 13-bit even offset.
    B,
    /// Unconditional jumps: scrambled 21-bit even offset.
    J,
}

impl Format {
    /// Whether the format carries a destination register field.
    pub const fn has_rd(self) -> bool {
        matches!(self, Self::R | Self::I | Self::J)
    }

    /// Whether the format carries an `rs1` field.
    pub const fn has_rs1(self) -> bool {
        !matches!(self, Self::J)
    }

    /// Whether the format carries an `rs2` field.
    pub const fn has_rs2(self) -> bool {
        matches!(self, Self::R | Self::S | Self::B)
    }

    /// Whether the format carries an immediate.
    pub const fn has_imm(self) -> bool {
        !matches!(self, Self::R)
    }

    /// Whether the format carries a funct3 field.
    pub const fn has_funct3(self) -> bool {
        !matches!(self, Self::J)
    }

    /// Whether instructions of this format write back to `rd`.
    ///
    /// Stores and branches never write the register file.
    pub const fn writes_rd(self) -> bool {
        self.has_rd()
    }
}

/// Fixed encoding key of a mnemonic.
///
/// `funct3` is `None` for J-type and `funct7` is `None` for everything except
/// R-type; absent fields are not part of the lookup key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Encoding {
    /// Bit layout of the instruction.
    pub format: Format,
    /// Major opcode (bits 6-0).
    pub opcode: u32,
    /// funct3 key, when the format has one.
    pub funct3: Option<u32>,
    /// funct7 key, R-type only.
    pub funct7: Option<u32>,
}

impl Encoding {
    /// Encoding key for an R-type instruction.
    const fn r(funct3: u32, funct7: u32) -> Self {
        Self {
            format: Format::R,
            opcode: opcodes::OP_REG,
            funct3: Some(funct3),
            funct7: Some(funct7),
        }
    }

    /// Encoding key for an I/S/B instruction.
    const fn with_funct3(format: Format, opcode: u32, funct3: u32) -> Self {
        Self {
            format,
            opcode,
            funct3: Some(funct3),
            funct7: None,
        }
    }

    /// Whether `word` carries this key.
    pub fn matches(&self, word: u32) -> bool {
        word.opcode() == self.opcode
            && self.funct3.is_none_or(|f3| word.funct3() == f3)
            && self.funct7.is_none_or(|f7| word.funct7() == f7)
    }
}

/// Supported instruction mnemonics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// Add registers.
    Add,
    /// Subtract registers.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Multiply (low 32 bits).
    Mul,
    /// Unsigned divide.
    Div,
    /// Unsigned remainder.
    Rem,
    /// Add immediate.
    Addi,
    /// Load word.
    Lw,
    /// Jump and link register.
    Jalr,
    /// Store word.
    Sw,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Jump and link.
    Jal,
    /// Jump without link (`jal` with `rd = x0`).
    J,
}

impl Mnemonic {
    /// Every mnemonic, in table order.
    pub const ALL: [Self; 20] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Sll,
        Self::Srl,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Addi,
        Self::Lw,
        Self::Jalr,
        Self::Sw,
        Self::Beq,
        Self::Bne,
        Self::Blt,
        Self::Bge,
        Self::Jal,
        Self::J,
    ];

    /// Lower-case assembly name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Rem => "rem",
            Self::Addi => "addi",
            Self::Lw => "lw",
            Self::Jalr => "jalr",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Jal => "jal",
            Self::J => "j",
        }
    }

    /// The authoritative encoding key. `j` shares the `jal` key.
    pub const fn encoding(self) -> Encoding {
        match self {
            Self::Add => Encoding::r(i_f3::ADD_SUB, i_f7::DEFAULT),
            Self::Sub => Encoding::r(i_f3::ADD_SUB, i_f7::SUB),
            Self::And => Encoding::r(i_f3::AND, i_f7::DEFAULT),
            Self::Or => Encoding::r(i_f3::OR, i_f7::DEFAULT),
            Self::Xor => Encoding::r(i_f3::XOR, i_f7::DEFAULT),
            Self::Sll => Encoding::r(i_f3::SLL, i_f7::DEFAULT),
            Self::Srl => Encoding::r(i_f3::SRL, i_f7::DEFAULT),
            Self::Mul => Encoding::r(m_f3::MUL, m_f7::M_EXTENSION),
            Self::Div => Encoding::r(m_f3::DIV, m_f7::M_EXTENSION),
            Self::Rem => Encoding::r(m_f3::REM, m_f7::M_EXTENSION),
            Self::Addi => Encoding::with_funct3(Format::I, opcodes::OP_IMM, i_f3::ADD_SUB),
            Self::Lw => Encoding::with_funct3(Format::I, opcodes::OP_LOAD, i_f3::LW),
            Self::Jalr => Encoding::with_funct3(Format::I, opcodes::OP_JALR, i_f3::JALR),
            Self::Sw => Encoding::with_funct3(Format::S, opcodes::OP_STORE, i_f3::SW),
            Self::Beq => Encoding::with_funct3(Format::B, opcodes::OP_BRANCH, i_f3::BEQ),
            Self::Bne => Encoding::with_funct3(Format::B, opcodes::OP_BRANCH, i_f3::BNE),
            Self::Blt => Encoding::with_funct3(Format::B, opcodes::OP_BRANCH, i_f3::BLT),
            Self::Bge => Encoding::with_funct3(Format::B, opcodes::OP_BRANCH, i_f3::BGE),
            Self::Jal | Self::J => Encoding {
                format: Format::J,
                opcode: opcodes::OP_JAL,
                funct3: None,
                funct7: None,
            },
        }
    }

    /// Instruction format.
    pub const fn format(self) -> Format {
        self.encoding().format
    }

    /// Whether this instruction may redirect the program counter.
    pub const fn is_control_transfer(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Jal | Self::J | Self::Jalr
        )
    }

    /// Whether this instruction writes `pc + 4` instead of an ALU result.
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Jal | Self::J | Self::Jalr)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no supported mnemonic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMnemonic(pub String);

impl fmt::Display for UnknownMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mnemonic '{}'", self.0)
    }
}

impl std::error::Error for UnknownMnemonic {}

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Case-insensitive lookup by assembly name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// A decoded instruction.
///
/// Fields the format does not carry are zero. The raw opcode, funct3, and
/// funct7 are recovered through [`Instruction::encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate (byte offset for B/J).
    pub imm: i32,
}

impl Instruction {
    /// Builds an R-type instruction.
    pub const fn r(mnemonic: Mnemonic, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self {
            mnemonic,
            rd,
            rs1,
            rs2,
            imm: 0,
        }
    }

    /// Builds an I-type instruction (`addi`, `lw`, `jalr`).
    pub const fn i(mnemonic: Mnemonic, rd: usize, rs1: usize, imm: i32) -> Self {
        Self {
            mnemonic,
            rd,
            rs1,
            rs2: 0,
            imm,
        }
    }

    /// Builds an S-type instruction; `rs2` is the stored value, `rs1` the base.
    pub const fn s(mnemonic: Mnemonic, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            mnemonic,
            rd: 0,
            rs1,
            rs2,
            imm,
        }
    }

    /// Builds a B-type instruction with a byte offset relative to its own pc.
    pub const fn b(mnemonic: Mnemonic, rs1: usize, rs2: usize, imm: i32) -> Self {
        Self::s(mnemonic, rs1, rs2, imm)
    }

    /// Builds a J-type instruction with a byte offset relative to its own pc.
    pub const fn j(mnemonic: Mnemonic, rd: usize, imm: i32) -> Self {
        Self {
            mnemonic,
            rd,
            rs1: 0,
            rs2: 0,
            imm,
        }
    }

    /// The canonical no-op, `addi zero, zero, 0`.
    pub const fn nop() -> Self {
        Self::i(Mnemonic::Addi, 0, 0, 0)
    }

    /// Whether this is the canonical no-op encoding.
    pub fn is_nop(&self) -> bool {
        *self == Self::nop()
    }

    /// Instruction format.
    pub const fn format(&self) -> Format {
        self.mnemonic.format()
    }

    /// Raw encoding key (opcode, funct3, funct7).
    pub const fn encoding(&self) -> Encoding {
        self.mnemonic.encoding()
    }
}
