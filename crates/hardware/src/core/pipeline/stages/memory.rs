//! Memory Access (MEM) Stage.
//!
//! Loads read data memory at the ALU-computed address. Stores are validated
//! here but returned as a [`PendingStore`] for the cycle driver to commit, so a
//! cycle that fails later leaves memory untouched.

use tracing::trace;

use crate::common::SimResult;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::soc::memory::{DataMemory, WORD_SIZE};

/// A validated word store awaiting commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingStore {
    /// Byte address of the word.
    pub addr: u32,
    /// Value to write.
    pub value: u32,
}

/// Result of the memory stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemOutput {
    /// New MEM/WB latch, `None` for a bubble.
    pub mem_wb: Option<MemWbEntry>,
    /// Store to commit at the end of the cycle.
    pub store: Option<PendingStore>,
}

/// Executes the memory access stage.
///
/// # Arguments
///
/// * `ex_mem` - EX/MEM latch from the previous cycle (`None` for a bubble).
/// * `memory` - Data memory, read-only here.
///
/// # Errors
///
/// Returns [`crate::common::SimError::Address`] when a load or store falls
/// outside data memory.
pub fn mem_stage(ex_mem: Option<&ExMemEntry>, memory: &DataMemory) -> SimResult<MemOutput> {
    let Some(entry) = ex_mem else {
        return Ok(MemOutput::default());
    };
    let ctrl = entry.ctrl;

    let mut result = entry.alu;
    let mut store = None;
    if ctrl.mem_read {
        result = memory.read_word(entry.alu)?;
        trace!("MEM pc={:#010x} load [{:#010x}] -> {result:#010x}", entry.pc, entry.alu);
    } else if ctrl.mem_write {
        memory.check_range(entry.alu, WORD_SIZE)?;
        trace!(
            "MEM pc={:#010x} store [{:#010x}] <- {:#010x}",
            entry.pc, entry.alu, entry.store_data
        );
        store = Some(PendingStore {
            addr: entry.alu,
            value: entry.store_data,
        });
    }

    Ok(MemOutput {
        mem_wb: Some(MemWbEntry {
            pc: entry.pc,
            raw: entry.raw,
            inst: entry.inst,
            ctrl,
            result,
        }),
        store,
    })
}
