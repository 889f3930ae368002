//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the stateless integer ALU used in the Execute stage.
//! Operands and results are 32-bit words; every result wraps at 32 bits.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div, Rem
//! - [`logic`]:      And, Or, Xor, Nor, Not, Slt
//! - [`shifts`]:     Sll, Srl

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (and, or, xor, nor, not, slt).
pub mod logic;

/// Shift operations (sll, srl).
pub mod shifts;

use crate::common::SimResult;
use crate::core::pipeline::signals::AluOp;

/// Interprets a 32-bit word as a two's-complement signed integer.
///
/// A word with bit 31 set denotes `value - 2^32`.
pub const fn signed(value: u32) -> i32 {
    value as i32
}

/// Arithmetic Logic Unit for 32-bit integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (shift amount for shifts, ignored by `Not`)
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::DivisionByZero`] for `Div`/`Rem` with `b == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::Alu;
    /// use rvpipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1), Ok(0x8000_0000));
    /// assert_eq!(Alu::execute(AluOp::Sub, 0, 1), Ok(0xFFFF_FFFF));
    /// assert_eq!(Alu::execute(AluOp::Slt, 0x8000_0000, 1), Ok(1));
    /// assert!(Alu::execute(AluOp::Div, 7, 0).is_err());
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> SimResult<u32> {
        Ok(match op {
            AluOp::Add => arithmetic::add(a, b),
            AluOp::Sub => arithmetic::sub(a, b),
            AluOp::Mul => arithmetic::mul(a, b),
            AluOp::Div => arithmetic::div(a, b)?,
            AluOp::Rem => arithmetic::rem(a, b)?,
            AluOp::And => logic::and(a, b),
            AluOp::Or => logic::or(a, b),
            AluOp::Xor => logic::xor(a, b),
            AluOp::Nor => logic::nor(a, b),
            AluOp::Not => logic::not(a),
            AluOp::Slt => logic::slt(a, b),
            AluOp::Sll => shifts::sll(a, b),
            AluOp::Srl => shifts::srl(a, b),
        })
    }

    /// Executes an operation named by string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::SimError::UnsupportedOperation`] for unknown names,
    /// or the error of [`Alu::execute`].
    pub fn operate(name: &str, a: u32, b: u32) -> SimResult<u32> {
        Self::execute(name.parse::<AluOp>()?, a, b)
    }
}
