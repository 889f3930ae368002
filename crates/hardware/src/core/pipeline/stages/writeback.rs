//! Writeback (WB) Stage.
//!
//! The final stage of the pipeline. It selects the register update of the
//! retiring instruction; stores, branches, bubbles, and unknown words never
//! write the register file.

use tracing::trace;

use crate::core::pipeline::latches::MemWbEntry;

/// A register write produced by writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterUpdate {
    /// Destination register index.
    pub rd: usize,
    /// Value written.
    pub value: u32,
}

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `mem_wb` - MEM/WB latch from the previous cycle (`None` for a bubble).
///
/// # Returns
///
/// The register write to apply, if any. Writes targeting `x0` are returned
/// as-is; the register file drops them.
pub fn wb_stage(mem_wb: Option<&MemWbEntry>) -> Option<RegisterUpdate> {
    let entry = mem_wb?;
    let inst = entry.inst?;
    if !entry.ctrl.reg_write {
        return None;
    }
    trace!("WB  pc={:#010x} x{} <= {:#010x}", entry.pc, inst.rd, entry.result);
    Some(RegisterUpdate {
        rd: inst.rd,
        value: entry.result,
    })
}
