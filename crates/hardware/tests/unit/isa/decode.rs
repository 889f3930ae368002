//! Instruction Decode Tests.
//!
//! Verifies that `decode()` selects the right mnemonic from opcode, funct3 and
//! funct7, extracts register fields, and sign-extends immediates for each of
//! the five formats.

use rstest::rstest;
use rvpipe_core::isa::decode::{DecodeError, decode};
use rvpipe_core::isa::instruction::{Instruction, Mnemonic};

#[rstest]
#[case::add(0x0062_83B3, Instruction::r(Mnemonic::Add, 7, 5, 6))]
#[case::sub(0x4062_83B3, Instruction::r(Mnemonic::Sub, 7, 5, 6))]
#[case::mul(0x0262_83B3, Instruction::r(Mnemonic::Mul, 7, 5, 6))]
#[case::addi(0x0050_0293, Instruction::i(Mnemonic::Addi, 5, 0, 5))]
#[case::lw(0x0001_2E03, Instruction::i(Mnemonic::Lw, 28, 2, 0))]
#[case::sw(0x0071_2023, Instruction::s(Mnemonic::Sw, 2, 7, 0))]
#[case::ret(0x0000_8067, Instruction::i(Mnemonic::Jalr, 0, 1, 0))]
#[case::beq_back(0xFE00_0EE3, Instruction::b(Mnemonic::Beq, 0, 0, -4))]
#[case::bne_back(0xFE02_9CE3, Instruction::b(Mnemonic::Bne, 5, 0, -8))]
#[case::jal_ra(0x0080_00EF, Instruction::j(Mnemonic::Jal, 1, 8))]
fn test_decode_known_words(#[case] word: u32, #[case] expected: Instruction) {
    assert_eq!(decode(word), Ok(expected));
}

#[test]
fn test_decode_jal_with_zero_rd_is_j() {
    let inst = decode(0xFFDF_F06F).unwrap();
    assert_eq!(inst.mnemonic, Mnemonic::J);
    assert_eq!(inst.rd, 0);
    assert_eq!(inst.imm, -4);
}

#[test]
fn test_decode_i_immediate_extremes() {
    assert_eq!(decode(0x7FF0_0293).unwrap().imm, 2047);
    assert_eq!(decode(0x8000_0293).unwrap().imm, -2048);
    assert_eq!(decode(0xFFF0_0293).unwrap().imm, -1);
}

#[test]
fn test_decode_every_funct_variant_of_op_reg() {
    let expected = [
        (0b000, 0b000_0000, Mnemonic::Add),
        (0b000, 0b010_0000, Mnemonic::Sub),
        (0b111, 0b000_0000, Mnemonic::And),
        (0b110, 0b000_0000, Mnemonic::Or),
        (0b100, 0b000_0000, Mnemonic::Xor),
        (0b001, 0b000_0000, Mnemonic::Sll),
        (0b101, 0b000_0000, Mnemonic::Srl),
        (0b000, 0b000_0001, Mnemonic::Mul),
        (0b100, 0b000_0001, Mnemonic::Div),
        (0b110, 0b000_0001, Mnemonic::Rem),
    ];
    for (funct3, funct7, mnemonic) in expected {
        let word = funct7 << 25 | 3 << 20 | 2 << 15 | funct3 << 12 | 1 << 7 | 0b011_0011;
        assert_eq!(decode(word), Ok(Instruction::r(mnemonic, 1, 2, 3)), "{mnemonic}");
    }
}

#[test]
fn test_decode_branch_family() {
    for (funct3, mnemonic) in [
        (0b000, Mnemonic::Beq),
        (0b001, Mnemonic::Bne),
        (0b100, Mnemonic::Blt),
        (0b101, Mnemonic::Bge),
    ] {
        // imm = +8: imm[4:1] = 0b0100 at bits 11:8.
        let word = 0b0100 << 8 | funct3 << 12 | 6 << 15 | 5 << 20 | 0b110_0011;
        assert_eq!(decode(word), Ok(Instruction::b(mnemonic, 6, 5, 8)), "{mnemonic}");
    }
}

#[rstest]
#[case::all_ones(0xFFFF_FFFF)]
#[case::all_zeros(0x0000_0000)]
#[case::sll_with_sub_funct7(0x4062_93B3)]
#[case::lui(0x0000_12B7)]
#[case::branch_funct3_010(0x0000_2063)]
#[case::load_byte(0x0001_0283)]
fn test_decode_unknown_words(#[case] word: u32) {
    let err = decode(word).unwrap_err();
    assert_eq!(err, DecodeError::new(word));
    assert_eq!(err.word, word);
    assert_eq!(err.opcode, word & 0x7F);
    assert_eq!(err.funct3, (word >> 12) & 0x7);
    assert_eq!(err.funct7, word >> 25);
}

#[test]
fn test_decode_error_display_names_the_word() {
    let msg = decode(0xFFFF_FFFF).unwrap_err().to_string();
    assert!(msg.contains("0xffffffff"), "{msg}");
}
