//! Per-cycle pipeline snapshots.
//!
//! A [`Snapshot`] is a self-contained, serializable copy of what a viewer needs
//! after a cycle: stage occupancy, registers, and modified memory. It holds no
//! references into the simulator.

use serde::Serialize;

use crate::common::{SimError, SimResult};
use crate::core::Cpu;
use crate::core::pipeline::latches::{NOP_LABEL, UNKNOWN_LABEL, stage_label};
use crate::isa::abi::AbiNames;
use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;

/// The four inter-stage latches, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Fetch to decode.
    #[serde(rename = "IF/ID")]
    IfId,
    /// Decode to execute.
    #[serde(rename = "ID/EX")]
    IdEx,
    /// Execute to memory.
    #[serde(rename = "EX/MEM")]
    ExMem,
    /// Memory to writeback.
    #[serde(rename = "MEM/WB")]
    MemWb,
}

impl Stage {
    /// All latches, IF/ID first.
    pub const ALL: [Self; 4] = [Self::IfId, Self::IdEx, Self::ExMem, Self::MemWb];

    /// Display name, e.g. `EX/MEM`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IfId => "IF/ID",
            Self::IdEx => "ID/EX",
            Self::ExMem => "EX/MEM",
            Self::MemWb => "MEM/WB",
        }
    }
}

/// Occupancy of one latch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageView {
    /// Which latch this is.
    pub stage: Stage,
    /// Mnemonic of the occupant, `nop` for a bubble, `unknown` for an undecodable word.
    pub mnemonic: &'static str,
    /// Address of the occupant, `None` for a bubble.
    pub pc: Option<u32>,
    /// Disassembly of the occupant.
    pub text: String,
}

impl StageView {
    fn bubble(stage: Stage) -> Self {
        Self {
            stage,
            mnemonic: NOP_LABEL,
            pc: None,
            text: NOP_LABEL.to_string(),
        }
    }

    fn occupied(stage: Stage, pc: u32, raw: u32, inst: Option<&Instruction>) -> Self {
        let text = inst.map_or_else(
            || format!("{UNKNOWN_LABEL} ({raw:#010x})"),
            ToString::to_string,
        );
        Self {
            stage,
            mnemonic: stage_label(inst),
            pc: Some(pc),
            text,
        }
    }

    /// Whether the latch holds a bubble.
    pub const fn is_bubble(&self) -> bool {
        self.pc.is_none()
    }
}

/// One register in a dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterView {
    /// Register index.
    pub index: usize,
    /// ABI name.
    pub name: &'static str,
    /// Current value.
    pub value: u32,
}

/// A data-memory word written during the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryWord {
    /// Byte address.
    pub addr: u32,
    /// Current value.
    pub value: u32,
}

/// State of the machine after a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycles completed so far.
    pub cycle: u64,
    /// Address of the next fetch.
    pub pc: u32,
    /// IF/ID, ID/EX, EX/MEM, MEM/WB, in that order.
    pub stages: [StageView; 4],
    /// All 32 registers with ABI names.
    pub registers: Vec<RegisterView>,
    /// Words written by stores, in address order.
    pub memory: Vec<MemoryWord>,
}

impl Snapshot {
    /// Copies the viewer-relevant state out of `cpu`.
    pub fn capture(cpu: &Cpu, abi: &AbiNames) -> Self {
        let if_id = match cpu.if_id.inst {
            None => StageView::bubble(Stage::IfId),
            Some(raw) => {
                let inst = decode(raw).ok();
                StageView::occupied(Stage::IfId, cpu.if_id.pc, raw, inst.as_ref())
            }
        };
        let view = |stage, slot: Option<(u32, u32, Option<Instruction>)>| {
            slot.map_or_else(
                || StageView::bubble(stage),
                |(pc, raw, inst)| StageView::occupied(stage, pc, raw, inst.as_ref()),
            )
        };
        let id_ex = view(Stage::IdEx, cpu.id_ex.map(|e| (e.pc, e.raw, e.inst)));
        let ex_mem = view(Stage::ExMem, cpu.ex_mem.map(|e| (e.pc, e.raw, e.inst)));
        let mem_wb = view(Stage::MemWb, cpu.mem_wb.map(|e| (e.pc, e.raw, e.inst)));

        let registers = cpu
            .regs
            .dump(abi)
            .into_iter()
            .enumerate()
            .map(|(index, (name, value))| RegisterView { index, name, value })
            .collect();
        let memory = cpu
            .memory
            .modified_words()
            .into_iter()
            .map(|(addr, value)| MemoryWord { addr, value })
            .collect();

        Self {
            cycle: cpu.stats.cycles,
            pc: cpu.pc,
            stages: [if_id, id_ex, ex_mem, mem_wb],
            registers,
            memory,
        }
    }

    /// View of a single latch.
    pub const fn stage(&self, stage: Stage) -> &StageView {
        match stage {
            Stage::IfId => &self.stages[0],
            Stage::IdEx => &self.stages[1],
            Stage::ExMem => &self.stages[2],
            Stage::MemWb => &self.stages[3],
        }
    }

    /// Value of register `index`, if in range.
    pub fn register(&self, index: usize) -> Option<u32> {
        self.registers.get(index).map(|r| r.value)
    }

    /// Serializes the snapshot as a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if serialization fails.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string(self).map_err(|e| SimError::Io(e.to_string()))
    }
}
