//! Simulator: the public entry point that owns the CPU and the loaded program.
//!
//! The simulator is the single owner of all mutable state. Callers load a
//! program, then advance it with [`Simulator::step`] or [`Simulator::run`] and
//! observe it through [`Snapshot`]s and the read accessors.

use tracing::{info, warn};

use crate::asm::{Assembler, Program};
use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::abi::{AbiNames, NUM_REGS};
use crate::sim::loader::{ProgramText, parse_word_listing};
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// A program in one of the accepted input forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramSource<'a> {
    /// Assembly text.
    Assembly(&'a str),
    /// One pre-assembled word per line (32 binary digits or 8 hex digits).
    Listing(&'a str),
    /// Pre-assembled words.
    Words(&'a [u32]),
}

impl<'a> From<&'a ProgramText> for ProgramSource<'a> {
    fn from(text: &'a ProgramText) -> Self {
        match text {
            ProgramText::Assembly(s) => Self::Assembly(s),
            ProgramText::Listing(s) => Self::Listing(s),
        }
    }
}

/// A register named by index or by name (`t0`, `fp`, `x5`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterRef {
    /// Numeric index.
    Index(usize),
    /// ABI or `xN` name.
    Name(String),
}

impl From<usize> for RegisterRef {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

impl From<&str> for RegisterRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RegisterRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every latch emptied.
    Drained {
        /// Total cycles executed.
        cycles: u64,
    },
    /// The cycle cap was reached with instructions still in flight.
    CycleLimit {
        /// Total cycles executed.
        cycles: u64,
    },
}

impl RunOutcome {
    /// Total cycles executed when the run stopped.
    pub const fn cycles(self) -> u64 {
        match self {
            Self::Drained { cycles } | Self::CycleLimit { cycles } => cycles,
        }
    }

    /// Whether the program drained on its own.
    pub const fn is_drained(self) -> bool {
        matches!(self, Self::Drained { .. })
    }
}

/// Top-level simulator: CPU state plus the program it was loaded with.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural and pipeline state.
    cpu: Cpu,
    /// The loaded program, with source lines when it came from assembly.
    program: Program,
    /// Register names used for lookups and dumps.
    abi: AbiNames,
    config: Config,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Simulator {
    /// Creates a simulator with an empty program.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            program: Program::default(),
            abi: AbiNames::STANDARD,
            config: config.clone(),
        }
    }

    /// Loads a program and resets all state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Assembly`] or [`SimError::ProgramFormat`] when the
    /// source does not parse. The previous program and state are kept on failure.
    pub fn load(&mut self, source: ProgramSource<'_>) -> SimResult<()> {
        let program = match source {
            ProgramSource::Assembly(text) => Assembler::new(self.abi).assemble(text)?,
            ProgramSource::Listing(text) => Program::from_words(parse_word_listing(text)?),
            ProgramSource::Words(words) => Program::from_words(words.to_vec()),
        };
        info!("[Sim] loaded {} instruction words", program.len());
        self.cpu.load_program(program.words.clone());
        self.program = program;
        Ok(())
    }

    /// Assembles and loads `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Assembly`] on the first assembly error.
    pub fn load_assembly(&mut self, source: &str) -> SimResult<()> {
        self.load(ProgramSource::Assembly(source))
    }

    /// Loads pre-assembled words.
    pub fn load_words(&mut self, words: &[u32]) {
        let program = Program::from_words(words.to_vec());
        self.cpu.load_program(program.words.clone());
        self.program = program;
    }

    /// Copies a raw binary image into data memory at `base`.
    ///
    /// Loading or resetting a program zeroes memory, so call this afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] when the image does not fit.
    pub fn load_data_image(&mut self, image: &[u8], base: u32) -> SimResult<()> {
        self.cpu.memory.load_image(image, base)
    }

    /// Restores the initial state, keeping the loaded program.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Advances one clock cycle and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns the address or arithmetic fault raised during the cycle; the
    /// simulator is left as it was before the call.
    pub fn step(&mut self) -> SimResult<Snapshot> {
        self.cpu.tick()?;
        Ok(self.snapshot())
    }

    /// Steps until the pipeline drains or `max_cycles` cycles have run in total.
    ///
    /// # Errors
    ///
    /// Returns the first fault raised by a cycle. Reaching the cap is not an
    /// error; it yields [`RunOutcome::CycleLimit`].
    pub fn run(&mut self, max_cycles: u64) -> SimResult<RunOutcome> {
        self.run_inspect(max_cycles, |_| {})
    }

    /// Like [`Simulator::run`], handing each cycle's snapshot to `observer`.
    ///
    /// # Errors
    ///
    /// Returns the first fault raised by a cycle.
    pub fn run_inspect<F>(&mut self, max_cycles: u64, mut observer: F) -> SimResult<RunOutcome>
    where
        F: FnMut(&Snapshot),
    {
        while !self.is_finished() {
            if self.cycle() >= max_cycles {
                warn!(
                    "[Sim] cycle limit of {max_cycles} exceeded at pc={:#010x}; stopping",
                    self.cpu.pc
                );
                return Ok(RunOutcome::CycleLimit {
                    cycles: self.cycle(),
                });
            }
            let snap = self.step()?;
            observer(&snap);
        }
        info!(
            "[Sim] drained after {} cycles, {} instructions retired",
            self.cycle(),
            self.cpu.stats.instructions_retired
        );
        Ok(RunOutcome::Drained {
            cycles: self.cycle(),
        })
    }

    /// Runs with the configured cycle cap.
    ///
    /// # Errors
    ///
    /// Returns the first fault raised by a cycle.
    pub fn run_to_completion(&mut self) -> SimResult<RunOutcome> {
        self.run(self.config.pipeline.max_cycles)
    }

    /// Whether at least one cycle has run and every latch holds a bubble.
    pub const fn is_finished(&self) -> bool {
        self.cpu.stats.cycles > 0 && self.cpu.is_drained()
    }

    /// Reads a register by index or name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] for an index outside `[0, 32)` and
    /// [`SimError::UnknownRegister`] for an unrecognized name.
    pub fn read_register(&self, reg: impl Into<RegisterRef>) -> SimResult<u32> {
        let idx = self.resolve_register(reg.into())?;
        self.cpu.regs.read(idx)
    }

    /// Seeds a register before or between steps. Writes to `zero` are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::read_register`].
    pub fn write_register(&mut self, reg: impl Into<RegisterRef>, value: u32) -> SimResult<()> {
        let idx = self.resolve_register(reg.into())?;
        if idx >= NUM_REGS {
            return Err(SimError::InvalidRegister(idx));
        }
        self.cpu.regs.write(idx, value);
        Ok(())
    }

    fn resolve_register(&self, reg: RegisterRef) -> SimResult<usize> {
        match reg {
            RegisterRef::Index(idx) => Ok(idx),
            RegisterRef::Name(name) => self
                .abi
                .index_of(&name)
                .ok_or(SimError::UnknownRegister(name)),
        }
    }

    /// All registers as `(abi name, value)`, index order.
    pub fn dump_registers(&self) -> Vec<(&'static str, u32)> {
        self.cpu.regs.dump(&self.abi)
    }

    /// Reads a data-memory word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] unless `addr + 4 <= capacity`.
    pub fn read_memory_word(&self, addr: u32) -> SimResult<u32> {
        self.cpu.memory.read_word(addr)
    }

    /// Seeds a data-memory word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] unless `addr + 4 <= capacity`.
    pub fn write_memory_word(&mut self, addr: u32, value: u32) -> SimResult<()> {
        self.cpu.memory.write_word(addr, value)
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.cpu, &self.abi)
    }

    /// The loaded program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Statistics for the current run.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Address of the next fetch.
    pub const fn pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Cycles executed since the last load or reset.
    pub const fn cycle(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Read-only view of the CPU.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The configuration this simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
