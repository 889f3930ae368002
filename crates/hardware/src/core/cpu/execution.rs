//! Main Execution Loop.
//!
//! This module implements the clock cycle of the CPU. It performs the following:
//! 1. **Stage Evaluation:** Runs WB, MEM, EX, ID, IF in reverse data-flow order, each
//!    reading the latch its predecessor produced in the previous cycle.
//! 2. **Atomic Commit:** Applies the store, register write, latches, and pc only after
//!    every stage has succeeded, so a failing cycle changes nothing.
//! 3. **Observability:** Traces stage activity and renders the pipeline diagram.

use std::fmt::Write as _;

use tracing::info;

use super::Cpu;
use crate::common::SimResult;
use crate::core::pipeline::latches::stage_label;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};

impl Cpu {
    /// Advances the pipeline by one clock cycle.
    ///
    /// Writeback runs before decode, so an instruction decoded in the same cycle
    /// that its producer retires reads the new value.
    ///
    /// # Errors
    ///
    /// Returns the address or arithmetic fault raised by a stage. The CPU is
    /// left exactly as it was before the call.
    pub fn tick(&mut self) -> SimResult<()> {
        let update = wb_stage(self.mem_wb.as_ref());
        let mem = mem_stage(self.ex_mem.as_ref(), &self.memory)?;
        let ex_mem = execute_stage(self.id_ex.as_ref())?;

        let mut regs = self.regs;
        if let Some(u) = update {
            regs.write(u.rd, u.value);
        }
        let decoded = decode_stage(&self.if_id, &regs)?;
        let fetched = fetch_stage(&self.imem, decoded.redirect.unwrap_or(self.pc));

        // Commit. The store was bounds-checked in MEM, so nothing below can fail
        // once it succeeds.
        if let Some(store) = mem.store {
            self.memory.write_word(store.addr, store.value)?;
        }
        if let Some(inst) = self.mem_wb.and_then(|e| e.inst) {
            self.stats.record_retired(&inst);
        }
        if decoded.redirect.is_some() {
            self.stats.transfers_taken += 1;
        }
        self.regs = regs;
        self.mem_wb = mem.mem_wb;
        self.ex_mem = ex_mem;
        self.id_ex = decoded.id_ex;
        self.if_id = fetched.if_id;
        self.pc = fetched.next_pc;
        self.stats.cycles += 1;

        if self.trace {
            info!("{}", self.pipeline_diagram());
        }
        Ok(())
    }

    /// Renders the current latch occupancy as one line per stage.
    pub fn pipeline_diagram(&self) -> String {
        let mut out = format!(
            "[Pipeline] cycle {} pc={:#010x}",
            self.stats.cycles, self.pc
        );
        let if_label = if self.if_id.is_bubble() {
            "nop".to_string()
        } else {
            format!("{:#010x}", self.if_id.pc)
        };
        let _ = write!(out, "\n  IF/ID : {if_label}");
        let slots = [
            ("ID/EX ", self.id_ex.map(|e| (e.pc, e.inst))),
            ("EX/MEM", self.ex_mem.map(|e| (e.pc, e.inst))),
            ("MEM/WB", self.mem_wb.map(|e| (e.pc, e.inst))),
        ];
        for (name, slot) in slots {
            let _ = match slot {
                Some((pc, inst)) => write!(
                    out,
                    "\n  {name}: {:<6} @ {pc:#010x}",
                    stage_label(inst.as_ref())
                ),
                None => write!(out, "\n  {name}: nop"),
            };
        }
        out
    }
}
