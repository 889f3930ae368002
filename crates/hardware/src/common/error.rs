//! Simulator error conditions.
//!
//! This module defines the failures that abort a single operation. It provides:
//! 1. **Step Failures:** Address and arithmetic faults that cancel the cycle that raised them.
//! 2. **Access Failures:** Register reads outside the file and unknown ALU operation names.
//! 3. **Load Failures:** Assembly, listing format, and file I/O problems.
//!
//! A cycle-limit stop is not an error; see [`crate::sim::RunOutcome`].

use thiserror::Error;

use crate::asm::AsmError;

/// Convenience alias for results carrying a [`SimError`].
pub type SimResult<T> = Result<T, SimError>;

/// Failure raised by the simulator core or its loaders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A byte or word access fell partly or wholly outside data memory.
    #[error("address {addr:#010x} (+{size} bytes) outside memory of {capacity} bytes")]
    Address {
        /// First byte of the attempted access.
        addr: u32,
        /// Width of the access in bytes.
        size: u32,
        /// Capacity of the memory in bytes.
        capacity: usize,
    },

    /// Division or remainder with a zero divisor.
    #[error("{op} by zero")]
    DivisionByZero {
        /// Upper-case name of the failing operation (`DIV` or `REM`).
        op: &'static str,
    },

    /// Register index outside `[0, 32)`.
    #[error("invalid register index {0}")]
    InvalidRegister(usize),

    /// Unrecognized register name in a symbolic lookup.
    #[error("unknown register name '{0}'")]
    UnknownRegister(String),

    /// Unknown ALU operation name.
    #[error("unsupported ALU operation '{0}'")]
    UnsupportedOperation(String),

    /// The assembler rejected the program.
    #[error(transparent)]
    Assembly(#[from] AsmError),

    /// A pre-assembled listing line is neither 32 binary digits nor 8 hex digits.
    #[error("line {line}: '{text}' is not a 32-bit binary or 8-digit hex word")]
    ProgramFormat {
        /// One-based line number within the listing.
        line: usize,
        /// Offending line, trimmed.
        text: String,
    },

    /// A program or image file could not be read.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
