//! ALU Operation Tests.
//!
//! Deterministic edge-case vectors for every operation, plus algebraic
//! properties of the 32-bit wraparound arithmetic.
//!
//! Reference: RISC-V ISA Specification, Volume I, Chapters 2.4 and 7.

use proptest::prelude::*;
use rstest::rstest;
use rvpipe_core::common::SimError;
use rvpipe_core::core::pipeline::signals::AluOp;
use rvpipe_core::core::units::alu::{Alu, signed};

const I32_MAX: u32 = 0x7FFF_FFFF;
const I32_MIN: u32 = 0x8000_0000;
const NEG1: u32 = 0xFFFF_FFFF;

fn alu(op: AluOp, a: u32, b: u32) -> u32 {
    Alu::execute(op, a, b).unwrap()
}

#[rstest]
#[case::add_overflow_wraps(AluOp::Add, I32_MAX, 1, I32_MIN)]
#[case::add_unsigned_wrap(AluOp::Add, NEG1, 1, 0)]
#[case::sub_underflow(AluOp::Sub, 0, 1, NEG1)]
#[case::sub_min(AluOp::Sub, I32_MIN, 1, I32_MAX)]
#[case::and(AluOp::And, 0xF0F0_F0F0, 0xFF00_FF00, 0xF000_F000)]
#[case::or(AluOp::Or, 0xF0F0_F0F0, 0x0F0F_0000, 0xFFFF_F0F0)]
#[case::xor(AluOp::Xor, 0xAAAA_AAAA, NEG1, 0x5555_5555)]
#[case::nor(AluOp::Nor, 0xF0F0_F0F0, 0x0F0F_0000, 0x0000_0F0F)]
#[case::not_ignores_b(AluOp::Not, 0x0000_FFFF, 0x1234_5678, 0xFFFF_0000)]
#[case::slt_signed_min(AluOp::Slt, I32_MIN, 1, 1)]
#[case::slt_neg_vs_neg(AluOp::Slt, NEG1, 0xFFFF_FFFE, 0)]
#[case::slt_equal(AluOp::Slt, 5, 5, 0)]
#[case::mul_low_bits(AluOp::Mul, 0x0001_0000, 0x0001_0000, 0)]
#[case::mul_neg(AluOp::Mul, NEG1, 3, 0xFFFF_FFFD)]
#[case::div_unsigned(AluOp::Div, NEG1, 2, I32_MAX)]
#[case::div_exact(AluOp::Div, 84, 2, 42)]
#[case::rem_unsigned(AluOp::Rem, NEG1, 10, 5)]
#[case::sll(AluOp::Sll, 1, 31, I32_MIN)]
#[case::sll_masked(AluOp::Sll, 1, 33, 2)]
#[case::srl_logical(AluOp::Srl, I32_MIN, 31, 1)]
#[case::srl_masked(AluOp::Srl, 0x100, 32, 0x100)]
fn test_alu_vectors(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(alu(op, a, b), expected, "{op} {a:#x} {b:#x}");
}

#[rstest]
#[case(AluOp::Div, "DIV")]
#[case(AluOp::Rem, "REM")]
fn test_division_by_zero_fails(#[case] op: AluOp, #[case] name: &'static str) {
    for a in [0, 1, NEG1, I32_MIN] {
        assert_eq!(
            Alu::execute(op, a, 0),
            Err(SimError::DivisionByZero { op: name })
        );
    }
}

#[test]
fn test_operate_parses_names_case_insensitively() {
    assert_eq!(Alu::operate("add", 2, 3), Ok(5));
    assert_eq!(Alu::operate("SuB", 2, 3), Ok(NEG1));
    assert_eq!(Alu::operate("NOR", 0, 0), Ok(NEG1));
}

#[test]
fn test_operate_rejects_unknown_names() {
    assert_eq!(
        Alu::operate("sra", 8, 1),
        Err(SimError::UnsupportedOperation("sra".to_string()))
    );
}

#[test]
fn test_every_op_name_round_trips() {
    for op in AluOp::ALL {
        assert_eq!(op.name().parse::<AluOp>(), Ok(op));
    }
}

#[test]
fn test_signed_helper() {
    assert_eq!(signed(I32_MIN), i32::MIN);
    assert_eq!(signed(NEG1), -1);
    assert_eq!(signed(I32_MAX), i32::MAX);
}

proptest! {
    #[test]
    fn prop_sub_inverts_add(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Sub, alu(AluOp::Add, a, b), b), a);
    }

    #[test]
    fn prop_shift_amount_is_masked(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Sll, a, b), alu(AluOp::Sll, a, b & 0x1F));
        prop_assert_eq!(alu(AluOp::Srl, a, b), alu(AluOp::Srl, a, b & 0x1F));
    }

    #[test]
    fn prop_div_rem_reconstruct(a in any::<u32>(), b in 1u32..) {
        let q = alu(AluOp::Div, a, b);
        let r = alu(AluOp::Rem, a, b);
        prop_assert!(r < b);
        prop_assert_eq!(alu(AluOp::Add, alu(AluOp::Mul, q, b), r), a);
    }

    #[test]
    fn prop_slt_matches_signed_compare(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Slt, a, b), u32::from(signed(a) < signed(b)));
    }

    #[test]
    fn prop_nor_is_not_or(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Nor, a, b), alu(AluOp::Not, alu(AluOp::Or, a, b), 0));
    }
}
