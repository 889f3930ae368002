//! RISC-V Instruction Encoder.
//!
//! The exact inverse of [`crate::isa::decode`]: places register fields and the
//! immediate at the positions given by the shared layout tables. Operands that
//! do not fit their field are rejected rather than truncated.

use thiserror::Error;

use crate::isa::abi::NUM_REGS;
use crate::isa::instruction::{Format, Instruction, Mnemonic};
use crate::isa::layout::{
    FUNCT3_SHIFT, FUNCT7_SHIFT, RD_SHIFT, RS1_SHIFT, RS2_SHIFT, imm_bits, imm_fits, insert_imm,
};

/// Reason an instruction could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A register operand is not in `[0, 32)`.
    #[error("register index {0} out of range")]
    InvalidRegister(usize),

    /// The immediate does not fit the signed field of the format.
    #[error("immediate {imm} does not fit the {bits}-bit field of '{mnemonic}'")]
    ImmediateOutOfRange {
        /// Instruction being encoded.
        mnemonic: Mnemonic,
        /// Rejected value.
        imm: i32,
        /// Signed field width.
        bits: u32,
    },

    /// A branch or jump offset is odd.
    #[error("offset {imm} of '{mnemonic}' is not a multiple of 2")]
    MisalignedOffset {
        /// Instruction being encoded.
        mnemonic: Mnemonic,
        /// Rejected offset.
        imm: i32,
    },

    /// `j` was given a destination register other than `x0`.
    #[error("'j' cannot link into x{0}")]
    LinkingJump(usize),
}

/// Encodes an instruction into its 32-bit word.
///
/// Fields the format does not carry are ignored.
///
/// # Errors
///
/// Returns an [`EncodeError`] when a register index or immediate does not fit
/// its field, or when `j` names a destination register.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::encode::encode;
/// use rvpipe_core::isa::instruction::{Instruction, Mnemonic};
///
/// // add t2, t0, t1
/// assert_eq!(encode(&Instruction::r(Mnemonic::Add, 7, 5, 6)), Ok(0x0062_83B3));
/// ```
pub fn encode(inst: &Instruction) -> Result<u32, EncodeError> {
    let enc = inst.encoding();
    let format = enc.format;

    if inst.mnemonic == Mnemonic::J && inst.rd != 0 {
        return Err(EncodeError::LinkingJump(inst.rd));
    }
    check_imm(inst, format)?;

    let mut word = enc.opcode;
    if format.has_rd() {
        word |= reg_field(inst.rd)? << RD_SHIFT;
    }
    if format.has_rs1() {
        word |= reg_field(inst.rs1)? << RS1_SHIFT;
    }
    if format.has_rs2() {
        word |= reg_field(inst.rs2)? << RS2_SHIFT;
    }
    if let Some(f3) = enc.funct3 {
        word |= f3 << FUNCT3_SHIFT;
    }
    if let Some(f7) = enc.funct7 {
        word |= f7 << FUNCT7_SHIFT;
    }
    Ok(word | insert_imm(inst.imm, format))
}

/// Validates a register index for a 5-bit field.
fn reg_field(idx: usize) -> Result<u32, EncodeError> {
    if idx < NUM_REGS {
        Ok(idx as u32)
    } else {
        Err(EncodeError::InvalidRegister(idx))
    }
}

/// Validates the immediate against the format's range and alignment.
fn check_imm(inst: &Instruction, format: Format) -> Result<(), EncodeError> {
    if !format.has_imm() || imm_fits(inst.imm, format) {
        return Ok(());
    }
    let bits = imm_bits(format);
    let half = 1i64 << (bits - 1);
    let wide = i64::from(inst.imm);
    if wide >= -half && wide < half {
        Err(EncodeError::MisalignedOffset {
            mnemonic: inst.mnemonic,
            imm: inst.imm,
        })
    } else {
        Err(EncodeError::ImmediateOutOfRange {
            mnemonic: inst.mnemonic,
            imm: inst.imm,
            bits,
        })
    }
}
