//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline.
//! It decodes the fetched word, reads source operands from the register file,
//! derives control signals, and resolves branches and jumps. A taken transfer
//! redirects the fetch that runs later in the same cycle, so the fall-through
//! instruction is never fetched.

use tracing::{debug, trace, warn};

use crate::common::SimResult;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::units::bru;
use crate::isa::decode::decode;

/// Result of the decode stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutput {
    /// New ID/EX latch, `None` for a bubble.
    pub id_ex: Option<IdExEntry>,
    /// Fetch address override for a taken control transfer.
    pub redirect: Option<u32>,
}

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `if_id` - IF/ID latch from the previous cycle.
/// * `regs`  - Register file as it stands after this cycle's writeback.
///
/// # Errors
///
/// Propagates [`crate::common::SimError::InvalidRegister`] from operand reads.
pub fn decode_stage(if_id: &IfIdEntry, regs: &RegisterFile) -> SimResult<DecodeOutput> {
    let Some(raw) = if_id.inst else {
        return Ok(DecodeOutput::default());
    };
    let pc = if_id.pc;

    let inst = match decode(raw) {
        Ok(inst) => inst,
        Err(err) => {
            warn!("pc={pc:#010x}: {err}; treating as inert");
            return Ok(DecodeOutput {
                id_ex: Some(IdExEntry {
                    pc,
                    raw,
                    ..IdExEntry::default()
                }),
                redirect: None,
            });
        }
    };

    let rv1 = regs.read(inst.rs1)?;
    let rv2 = regs.read(inst.rs2)?;
    let ctrl = ControlSignals::for_mnemonic(inst.mnemonic);
    trace!("ID  pc={pc:#010x} {inst}");

    let redirect = if ctrl.branch || ctrl.jump {
        bru::resolve(&inst, pc, rv1, rv2)
    } else {
        None
    };
    if let Some(target) = redirect {
        debug!(
            "redirect {} at {pc:#010x} -> {target:#010x}, squashing fall-through fetch",
            inst.mnemonic
        );
    }

    Ok(DecodeOutput {
        id_ex: Some(IdExEntry {
            pc,
            raw,
            inst: Some(inst),
            ctrl,
            rv1,
            rv2,
        }),
        redirect,
    })
}
