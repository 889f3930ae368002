//! Branch resolution unit (BRU).
//!
//! Decides, in the decode stage, whether a control transfer is taken and where
//! it goes. There is no prediction: every transfer is resolved exactly once,
//! from the register values read in decode.
//!
//! | Mnemonic | Taken when | Target |
//! |---|---|---|
//! | `beq` | `rs1 == rs2` | `pc + imm` |
//! | `bne` | `rs1 != rs2` | `pc + imm` |
//! | `blt` | `signed(rs1) < signed(rs2)` | `pc + imm` |
//! | `bge` | `signed(rs1) >= signed(rs2)` | `pc + imm` |
//! | `jal`, `j` | always | `pc + imm` |
//! | `jalr` | always | `(rs1 + imm) & !1` |

use crate::core::units::alu::signed;
use crate::isa::instruction::{Instruction, Mnemonic};

/// Whether a control-transfer instruction is taken for the given operands.
///
/// Returns `false` for instructions that are not control transfers.
pub const fn is_taken(mnemonic: Mnemonic, rv1: u32, rv2: u32) -> bool {
    match mnemonic {
        Mnemonic::Beq => rv1 == rv2,
        Mnemonic::Bne => rv1 != rv2,
        Mnemonic::Blt => signed(rv1) < signed(rv2),
        Mnemonic::Bge => signed(rv1) >= signed(rv2),
        Mnemonic::Jal | Mnemonic::J | Mnemonic::Jalr => true,
        _ => false,
    }
}

/// Resolves a control transfer.
///
/// # Arguments
///
/// * `inst` - Decoded instruction.
/// * `pc`   - Address of the instruction itself.
/// * `rv1`  - Value of `rs1` as read in decode.
/// * `rv2`  - Value of `rs2` as read in decode.
///
/// # Returns
///
/// The redirect target when the transfer is taken, `None` otherwise.
pub const fn resolve(inst: &Instruction, pc: u32, rv1: u32, rv2: u32) -> Option<u32> {
    if !is_taken(inst.mnemonic, rv1, rv2) {
        return None;
    }
    let target = match inst.mnemonic {
        Mnemonic::Jalr => rv1.wrapping_add_signed(inst.imm) & !1,
        _ => pc.wrapping_add_signed(inst.imm),
    };
    Some(target)
}
