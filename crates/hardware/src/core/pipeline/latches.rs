//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the records carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Immutable Values:** Every latch is rebuilt from scratch each cycle; a stage never
//!    edits the record it received.
//! 2. **Bubbles:** An empty latch is a bubble. IF/ID keeps the fetch pc even when empty;
//!    the later latches are `Option`s in the CPU.
//! 3. **Inert Entries:** A word that does not decode travels with `inst: None` and
//!    default control signals, so it has no architectural effect.

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::Instruction;

/// Label shown for an empty stage or a canonical no-op.
pub const NOP_LABEL: &str = "nop";

/// Label shown for an undecodable word.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Entry in the IF/ID latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Fetch pc (kept for bubbles too).
    pub pc: u32,
    /// Fetched word, `None` for a bubble.
    pub inst: Option<u32>,
}

impl IfIdEntry {
    /// A bubble carrying the current pc.
    pub const fn bubble(pc: u32) -> Self {
        Self { pc, inst: None }
    }

    /// Whether this latch holds no instruction.
    pub const fn is_bubble(&self) -> bool {
        self.inst.is_none()
    }
}

/// Entry in the ID/EX latch (Decode to Execute stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded instruction, `None` when the word is unknown.
    pub inst: Option<Instruction>,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Value read from rs1.
    pub rv1: u32,
    /// Value read from rs2.
    pub rv2: u32,
}

/// Entry in the EX/MEM latch (Execute to Memory stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded instruction, `None` when the word is unknown.
    pub inst: Option<Instruction>,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// ALU result, memory address, or link address.
    pub alu: u32,
    /// Value to store (rs2).
    pub store_data: u32,
}

/// Entry in the MEM/WB latch (Memory to Writeback stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded instruction, `None` when the word is unknown.
    pub inst: Option<Instruction>,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Value to write back (load data or ALU result).
    pub result: u32,
}

/// Viewer label for an occupied latch: the mnemonic, `nop`, or `unknown`.
pub fn stage_label(inst: Option<&Instruction>) -> &'static str {
    match inst {
        Some(i) if i.is_nop() => NOP_LABEL,
        Some(i) => i.mnemonic.name(),
        None => UNKNOWN_LABEL,
    }
}
