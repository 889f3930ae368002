//! RISC-V General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 registers (`x0`-`x31`) of 32 bits each.
//! 2. **Invariant Enforcement:** Register `x0` always reads zero; writes to it are dropped.
//! 3. **Introspection:** Full snapshots and name-annotated dumps for viewers.

use crate::common::{SimError, SimResult};
use crate::isa::abi::{AbiNames, NUM_REGS};

/// General-purpose register file.
///
/// Register values are raw 32-bit words; callers choose the signed or unsigned
/// interpretation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] when `idx` is 32 or more.
    pub fn read(&self, idx: usize) -> SimResult<u32> {
        match idx {
            0 => Ok(0),
            _ => self
                .regs
                .get(idx)
                .copied()
                .ok_or(SimError::InvalidRegister(idx)),
        }
    }

    /// Reads a register as a two's-complement signed value.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] when `idx` is 32 or more.
    pub fn read_signed(&self, idx: usize) -> SimResult<i32> {
        self.read(idx).map(|v| v as i32)
    }

    /// Writes a register.
    ///
    /// Writes to `x0` and to indices outside the file are ignored.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a copy of all 32 registers.
    pub const fn get_all(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Returns every register paired with its ABI name, in index order.
    pub fn dump(&self, abi: &AbiNames) -> Vec<(&'static str, u32)> {
        abi.entries()
            .map(|(idx, name)| (name, if idx == 0 { 0 } else { self.regs[idx] }))
            .collect()
    }
}
