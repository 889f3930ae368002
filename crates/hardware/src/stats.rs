//! Simulation Statistics.
//!
//! This module tracks performance counters for a run. It provides:
//! 1. **Cycle Accounting:** Total cycles and retired instructions (CPI).
//! 2. **Instruction Mix:** Retired instructions by class (ALU, load, store, branch, jump).
//! 3. **Control Flow:** Taken control transfers, each of which squashed a fall-through fetch.

use std::fmt;

use serde::Serialize;

use crate::isa::instruction::{Format, Instruction, Mnemonic};

/// Simulation statistics counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Clock cycles executed.
    pub cycles: u64,
    /// Instructions that completed writeback (bubbles and unknown words excluded).
    pub instructions_retired: u64,
    /// Retired register/immediate ALU instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired conditional branches.
    pub inst_branch: u64,
    /// Retired unconditional jumps (`jal`, `j`, `jalr`).
    pub inst_jump: u64,
    /// Control transfers resolved as taken in decode.
    pub transfers_taken: u64,
}

impl SimStats {
    /// Records the retirement of `inst`.
    pub fn record_retired(&mut self, inst: &Instruction) {
        self.instructions_retired += 1;
        match (inst.mnemonic, inst.format()) {
            (Mnemonic::Lw, _) => self.inst_load += 1,
            (Mnemonic::Jalr, _) | (_, Format::J) => self.inst_jump += 1,
            (_, Format::S) => self.inst_store += 1,
            (_, Format::B) => self.inst_branch += 1,
            (_, Format::R | Format::I) => self.inst_alu += 1,
        }
    }

    /// Cycles per retired instruction, or `None` before anything retires.
    #[allow(clippy::cast_precision_loss)]
    pub fn cpi(&self) -> Option<f64> {
        (self.instructions_retired > 0)
            .then(|| self.cycles as f64 / self.instructions_retired as f64)
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.instructions_retired.max(1) as f64;
        let pct = |n: u64| (n as f64 / total) * 100.0;

        writeln!(f, "==========================================================")?;
        writeln!(f, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        match self.cpi() {
            Some(cpi) => writeln!(f, "sim_cpi                  {cpi:.4}")?,
            None => writeln!(f, "sim_cpi                  n/a")?,
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  op.alu                 {} ({:.2}%)", self.inst_alu, pct(self.inst_alu))?;
        writeln!(f, "  op.load                {} ({:.2}%)", self.inst_load, pct(self.inst_load))?;
        writeln!(f, "  op.store               {} ({:.2}%)", self.inst_store, pct(self.inst_store))?;
        writeln!(f, "  op.branch              {} ({:.2}%)", self.inst_branch, pct(self.inst_branch))?;
        writeln!(f, "  op.jump                {} ({:.2}%)", self.inst_jump, pct(self.inst_jump))?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CONTROL FLOW")?;
        writeln!(f, "  transfers.taken        {}", self.transfers_taken)?;
        write!(f, "==========================================================")
    }
}
