//! Execute (EX) Stage.
//!
//! Selects the ALU operands and runs the operation chosen in decode. Jumps
//! bypass the ALU and produce the link address `pc + 4`.

use tracing::trace;

use crate::common::SimResult;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::OpBSrc;
use crate::core::units::alu::Alu;

/// Executes the execute stage.
///
/// # Arguments
///
/// * `id_ex` - ID/EX latch from the previous cycle (`None` for a bubble).
///
/// # Errors
///
/// Returns [`crate::common::SimError::DivisionByZero`] when `div`/`rem` divide by zero.
pub fn execute_stage(id_ex: Option<&IdExEntry>) -> SimResult<Option<ExMemEntry>> {
    let Some(entry) = id_ex else {
        return Ok(None);
    };
    let Some(inst) = entry.inst else {
        return Ok(Some(ExMemEntry {
            pc: entry.pc,
            raw: entry.raw,
            ..ExMemEntry::default()
        }));
    };

    let ctrl = entry.ctrl;
    let op_b = match ctrl.alu_src {
        OpBSrc::Reg2 => entry.rv2,
        OpBSrc::Imm => inst.imm as u32,
    };
    let alu = if ctrl.jump {
        entry.pc.wrapping_add(4)
    } else {
        Alu::execute(ctrl.alu, entry.rv1, op_b)?
    };
    trace!("EX  pc={:#010x} {} -> {alu:#010x}", entry.pc, ctrl.alu);

    Ok(Some(ExMemEntry {
        pc: entry.pc,
        raw: entry.raw,
        inst: Some(inst),
        ctrl,
        alu,
        store_data: entry.rv2,
    }))
}
