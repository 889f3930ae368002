//! ALU shift operations.
//!
//! Implements shift-left logical (SLL) and shift-right logical (SRL).
//! Only the low 5 bits of the shift amount are used; higher bits are ignored.

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1F;

/// Logical shift left by `b & 0x1F`.
pub const fn sll(a: u32, b: u32) -> u32 {
    a << (b & SHAMT_MASK)
}

/// Logical shift right by `b & 0x1F`.
pub const fn srl(a: u32, b: u32) -> u32 {
    a >> (b & SHAMT_MASK)
}
