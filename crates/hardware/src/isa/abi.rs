//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines the standard register indices used by pseudo-instructions and the
//! symbolic name table shared by the assembler, the register dump, and the
//! disassembler. The table is an explicit immutable value, passed to whoever
//! needs it, rather than ambient global state.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register x1 (return address, ra).
pub const REG_RA: usize = 1;
/// Register x2 (stack pointer, sp).
pub const REG_SP: usize = 2;
/// Register x5 (first temporary, t0).
pub const REG_T0: usize = 5;
/// Register x8 (saved register / frame pointer, s0/fp).
pub const REG_S0: usize = 8;
/// Register x10 (first argument/return value, a0).
pub const REG_A0: usize = 10;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Symbolic names for the 32 general-purpose registers.
///
/// `fp` is accepted as an alias for `s0`, and the architectural `xN` spelling is
/// accepted for every register. Lookups are case-insensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbiNames {
    names: [&'static str; NUM_REGS],
}

impl AbiNames {
    /// Standard RISC-V calling-convention names for x0–x31.
    pub const STANDARD: Self = Self {
        names: [
            "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3",
            "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11",
            "t3", "t4", "t5", "t6",
        ],
    };

    /// Returns the canonical ABI name for `idx`, or `None` when out of range.
    pub fn name(&self, idx: usize) -> Option<&'static str> {
        self.names.get(idx).copied()
    }

    /// Resolves a register name to its index.
    ///
    /// Accepts ABI names, the `fp` alias, and `x0`–`x31`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let lower = name.trim().to_ascii_lowercase();
        if lower == "fp" {
            return Some(REG_S0);
        }
        if let Some(idx) = self.names.iter().position(|n| *n == lower) {
            return Some(idx);
        }
        let digits = lower.strip_prefix('x')?;
        // Reject "x", "x+1", "x01"; only canonical decimal spellings are register names.
        if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<usize>().ok().filter(|&idx| idx < NUM_REGS)
    }

    /// Iterates `(index, name)` pairs in register order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.names.iter().copied().enumerate()
    }
}

impl Default for AbiNames {
    fn default() -> Self {
        Self::STANDARD
    }
}
