//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register file and the program counter.
//! 2. **Pipeline Control:** Owns the four inter-stage latches.
//! 3. **Memory:** Owns the instruction store and the data memory.
//! 4. **Statistics:** Counts cycles, retirements, and taken transfers.

/// Cycle driver and pipeline visualization.
pub mod execution;

use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::soc::DataMemory;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
///
/// The CPU is the single owner of its state. Callers mutate it only through
/// [`Cpu::tick`], [`Cpu::load_program`], [`Cpu::reset`], and the explicit
/// register/memory accessors.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u32,
    /// Data memory accessed by the MEM stage.
    pub memory: DataMemory,
    /// Loaded instruction words; word `i` is at byte address `4 * i`.
    pub imem: Vec<u32>,

    /// IF/ID Latch.
    pub if_id: IfIdEntry,
    /// ID/EX Latch.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM Latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB Latch.
    pub mem_wb: Option<MemWbEntry>,

    /// Log the pipeline diagram every cycle.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with an empty instruction store.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (memory size, tracing).
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            memory: DataMemory::new(config.memory.size_bytes),
            imem: Vec::new(),
            if_id: IfIdEntry::default(),
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Replaces the instruction store and resets all other state.
    pub fn load_program(&mut self, words: Vec<u32>) {
        self.imem = words;
        self.reset();
    }

    /// Restores the initial state: pc 0, bubbles everywhere, zeroed registers
    /// and memory, cleared statistics. The instruction store is kept.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.pc = 0;
        self.memory.clear();
        self.if_id = IfIdEntry::default();
        self.id_ex = None;
        self.ex_mem = None;
        self.mem_wb = None;
        self.stats = SimStats::default();
    }

    /// Whether all four latches hold bubbles.
    pub const fn is_drained(&self) -> bool {
        self.if_id.is_bubble()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
    }
}
