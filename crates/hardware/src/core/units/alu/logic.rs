//! ALU logical and comparison operations.
//!
//! Implements bitwise AND, OR, XOR, NOR, NOT, and signed set-less-than.
//! The result of a comparison is always 0 or 1.

use super::signed;

/// Bitwise AND.
pub const fn and(a: u32, b: u32) -> u32 {
    a & b
}

/// Bitwise OR.
pub const fn or(a: u32, b: u32) -> u32 {
    a | b
}

/// Bitwise XOR.
pub const fn xor(a: u32, b: u32) -> u32 {
    a ^ b
}

/// Bitwise NOR.
pub const fn nor(a: u32, b: u32) -> u32 {
    !(a | b)
}

/// Bitwise complement of `a`; `b` is ignored.
pub const fn not(a: u32) -> u32 {
    !a
}

/// 1 if `a < b` as signed integers, else 0.
pub const fn slt(a: u32, b: u32) -> u32 {
    (signed(a) < signed(b)) as u32
}
