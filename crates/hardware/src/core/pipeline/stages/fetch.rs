//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction store at the program counter. A pc outside the loaded
//! program, or one that is not word aligned, produces a bubble that carries the
//! pc and leaves it unchanged.

use tracing::{trace, warn};

use crate::core::pipeline::latches::IfIdEntry;

/// Size of one instruction in bytes.
const INSTRUCTION_SIZE: u32 = 4;

/// Result of the fetch stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOutput {
    /// New IF/ID latch.
    pub if_id: IfIdEntry,
    /// Program counter for the next cycle.
    pub next_pc: u32,
}

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `imem` - Loaded instruction words; word `i` lives at byte address `4 * i`.
/// * `pc`   - Address to fetch (already redirected by decode this cycle).
pub fn fetch_stage(imem: &[u32], pc: u32) -> FetchOutput {
    if pc % INSTRUCTION_SIZE != 0 {
        warn!("misaligned fetch at {pc:#010x}, inserting bubble");
        return FetchOutput {
            if_id: IfIdEntry::bubble(pc),
            next_pc: pc,
        };
    }

    match imem.get((pc / INSTRUCTION_SIZE) as usize) {
        Some(&word) => {
            trace!("IF  pc={pc:#010x} inst={word:#010x}");
            FetchOutput {
                if_id: IfIdEntry {
                    pc,
                    inst: Some(word),
                },
                next_pc: pc.wrapping_add(INSTRUCTION_SIZE),
            }
        }
        None => FetchOutput {
            if_id: IfIdEntry::bubble(pc),
            next_pc: pc,
        },
    }
}
