//! RISC-V Instruction Decoder.
//!
//! Turns a 32-bit word into an [`Instruction`]. The lookup key (opcode, then
//! funct3 and funct7 where the format has them) and the immediate bit positions
//! both come from the shared layout tables, so this module holds no bit
//! positions of its own.
//!
//! Words with an unknown opcode/funct combination yield a [`DecodeError`]
//! carrying the raw fields. The pipeline treats such words as inert.

use std::fmt;

use crate::isa::instruction::{Format, Instruction, InstructionBits, Mnemonic};
use crate::isa::layout::extract_imm;

/// Raw fields of a word that matched no supported instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// The undecodable word.
    pub word: u32,
    /// Opcode field (bits 6-0).
    pub opcode: u32,
    /// funct3 field (bits 14-12).
    pub funct3: u32,
    /// funct7 field (bits 31-25).
    pub funct7: u32,
}

impl DecodeError {
    /// Captures the raw fields of `word`.
    pub fn new(word: u32) -> Self {
        Self {
            word,
            opcode: word.opcode(),
            funct3: word.funct3(),
            funct7: word.funct7(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown instruction {:#010x} (opcode={:#09b} funct3={:#05b} funct7={:#09b})",
            self.word, self.opcode, self.funct3, self.funct7
        )
    }
}

impl std::error::Error for DecodeError {}

/// Decodes a 32-bit instruction word.
///
/// A `jal` whose destination is `x0` is reported as `j`.
///
/// # Errors
///
/// Returns [`DecodeError`] when no supported instruction carries the word's
/// opcode/funct3/funct7 key.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::decode::decode;
/// use rvpipe_core::isa::instruction::{Instruction, Mnemonic};
///
/// // addi t0, zero, 5
/// assert_eq!(decode(0x0050_0293), Ok(Instruction::i(Mnemonic::Addi, 5, 0, 5)));
/// assert!(decode(0xFFFF_FFFF).is_err());
/// ```
pub fn decode(word: u32) -> Result<Instruction, DecodeError> {
    let mnemonic = Mnemonic::ALL
        .iter()
        .copied()
        .filter(|m| *m != Mnemonic::J)
        .find(|m| m.encoding().matches(word))
        .ok_or_else(|| DecodeError::new(word))?;

    let format = mnemonic.format();
    let imm = extract_imm(word, format);
    let inst = match format {
        Format::R => Instruction::r(mnemonic, word.rd(), word.rs1(), word.rs2()),
        Format::I => Instruction::i(mnemonic, word.rd(), word.rs1(), imm),
        Format::S => Instruction::s(mnemonic, word.rs1(), word.rs2(), imm),
        Format::B => Instruction::b(mnemonic, word.rs1(), word.rs2(), imm),
        Format::J if word.rd() == 0 => Instruction::j(Mnemonic::J, 0, imm),
        Format::J => Instruction::j(mnemonic, word.rd(), imm),
    };
    Ok(inst)
}
