//! ALU arithmetic operations.
//!
//! Implements 32-bit addition, subtraction, multiplication, and unsigned
//! division/remainder. Results wrap silently at 32 bits; there is no overflow
//! flag. Division and remainder by zero fail instead of producing a sentinel.

use crate::common::{SimError, SimResult};

/// Wrapping 32-bit addition.
pub const fn add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Wrapping 32-bit subtraction.
pub const fn sub(a: u32, b: u32) -> u32 {
    a.wrapping_sub(b)
}

/// Low 32 bits of the unsigned product.
pub const fn mul(a: u32, b: u32) -> u32 {
    a.wrapping_mul(b)
}

/// Unsigned quotient.
///
/// # Errors
///
/// Returns [`SimError::DivisionByZero`] when `b == 0`.
pub fn div(a: u32, b: u32) -> SimResult<u32> {
    a.checked_div(b)
        .ok_or(SimError::DivisionByZero { op: "DIV" })
}

/// Unsigned remainder.
///
/// # Errors
///
/// Returns [`SimError::DivisionByZero`] when `b == 0`.
pub fn rem(a: u32, b: u32) -> SimResult<u32> {
    a.checked_rem(b)
        .ok_or(SimError::DivisionByZero { op: "REM" })
}
