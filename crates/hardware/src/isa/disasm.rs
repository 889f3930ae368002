//! Instruction Disassembler.
//!
//! Renders decoded instructions in assembler syntax with ABI register names,
//! for pipeline snapshots, tracing, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//!
//! assert_eq!(disassemble(0x0050_0293), "addi t0, zero, 5");
//! assert_eq!(disassemble(0x0000_0013), "nop");
//! assert_eq!(disassemble(0xFFFF_FFFF), "unknown");
//! ```

use std::fmt;

use crate::isa::abi::AbiNames;
use crate::isa::decode::decode;
use crate::isa::instruction::{Format, Instruction, Mnemonic};

/// Returns the ABI name for an integer register index.
#[inline]
fn xreg(idx: usize) -> &'static str {
    AbiNames::STANDARD.name(idx).unwrap_or("x??")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nop() {
            return f.write_str("nop");
        }
        let m = self.mnemonic;
        match (m, self.format()) {
            (Mnemonic::Lw | Mnemonic::Jalr, _) => {
                write!(f, "{m} {}, {}({})", xreg(self.rd), self.imm, xreg(self.rs1))
            }
            (_, Format::R) => write!(
                f,
                "{m} {}, {}, {}",
                xreg(self.rd),
                xreg(self.rs1),
                xreg(self.rs2)
            ),
            (_, Format::I) => write!(
                f,
                "{m} {}, {}, {}",
                xreg(self.rd),
                xreg(self.rs1),
                self.imm
            ),
            (_, Format::S) => {
                write!(f, "{m} {}, {}({})", xreg(self.rs2), self.imm, xreg(self.rs1))
            }
            (_, Format::B) => write!(
                f,
                "{m} {}, {}, {}",
                xreg(self.rs1),
                xreg(self.rs2),
                self.imm
            ),
            (Mnemonic::J, Format::J) => write!(f, "j {}", self.imm),
            (_, Format::J) => write!(f, "{m} {}, {}", xreg(self.rd), self.imm),
        }
    }
}

/// Disassembles a raw 32-bit word.
///
/// Returns `"unknown"` for words that do not decode.
pub fn disassemble(word: u32) -> String {
    decode(word).map_or_else(|_| "unknown".to_string(), |inst| inst.to_string())
}
