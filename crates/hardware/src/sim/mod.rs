//! Simulation driver, program loading, and snapshots.
//!
//! [`Simulator`] is the entry point for callers; [`loader`] reads programs and
//! images from text and disk; [`snapshot`] holds the per-cycle view handed to
//! observers.

pub mod loader;
pub mod simulator;
pub mod snapshot;

pub use simulator::{ProgramSource, RegisterRef, RunOutcome, Simulator};
pub use snapshot::{MemoryWord, RegisterView, Snapshot, Stage, StageView};
