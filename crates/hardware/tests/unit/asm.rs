//! Assembler Tests.
//!
//! Label resolution, operand forms, pseudo-instructions, and line-tagged
//! errors.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::asm::{AsmError, AsmErrorKind, Assembler, assemble};
use rvpipe_core::isa::abi::AbiNames;
use rvpipe_core::isa::decode::decode;
use rvpipe_core::isa::encode::EncodeError;
use rvpipe_core::isa::instruction::{Instruction, Mnemonic};

fn decoded(source: &str) -> Vec<Instruction> {
    assemble(source)
        .unwrap()
        .words
        .into_iter()
        .map(|w| decode(w).unwrap())
        .collect()
}

fn error_of(source: &str) -> AsmError {
    assemble(source).unwrap_err()
}

#[test]
fn test_reference_program_words() {
    let program = assemble(
        "# reference\naddi t0, zero, 5\naddi t1, zero, 3\nadd t2, t0, t1\nsw t2, 0(sp)\nlw t3, 0(sp)\n",
    )
    .unwrap();
    assert_eq!(
        program.words,
        vec![0x0050_0293, 0x0030_0313, 0x0062_83B3, 0x0071_2023, 0x0001_2E03]
    );
    assert_eq!(program.lines, vec![2, 3, 4, 5, 6]);
}

#[test]
fn test_forward_and_backward_labels() {
    let insts = decoded(
        "
        top:
            beq t0, t1, done
            addi t0, t0, 1
            j top
        done: nop
        ",
    );
    assert_eq!(insts[0], Instruction::b(Mnemonic::Beq, 5, 6, 12));
    assert_eq!(insts[2], Instruction::j(Mnemonic::J, 0, -8));
    assert_eq!(insts[3], Instruction::nop());
}

#[test]
fn test_multiple_labels_on_one_address() {
    let insts = decoded("a: b: nop\nj a\nj b");
    assert_eq!(insts[1].imm, -4);
    assert_eq!(insts[2].imm, -8);
}

#[test]
fn test_numeric_branch_offsets() {
    let insts = decoded("bne t0, zero, -8\njal ra, 16");
    assert_eq!(insts[0], Instruction::b(Mnemonic::Bne, 5, 0, -8));
    assert_eq!(insts[1], Instruction::j(Mnemonic::Jal, 1, 16));
}

#[test]
fn test_pseudo_instructions() {
    let insts = decoded("start: nop\nmv a0, a1\nret\njal start\nj start");
    assert_eq!(insts[0], Instruction::nop());
    assert_eq!(insts[1], Instruction::i(Mnemonic::Addi, 10, 11, 0));
    assert_eq!(insts[2], Instruction::i(Mnemonic::Jalr, 0, 1, 0));
    assert_eq!(insts[3], Instruction::j(Mnemonic::Jal, 1, -12));
    assert_eq!(insts[4], Instruction::j(Mnemonic::J, 0, -16));
}

#[test]
fn test_operand_spellings() {
    let insts = decoded(
        "ADD x7, X5, t1\naddi t0 zero 0x10\nlw a0, (sp)\njalr ra, t0, 4\njalr zero, -4(a0)\naddi s0, fp, 0b11",
    );
    assert_eq!(insts[0], Instruction::r(Mnemonic::Add, 7, 5, 6));
    assert_eq!(insts[1], Instruction::i(Mnemonic::Addi, 5, 0, 16));
    assert_eq!(insts[2], Instruction::i(Mnemonic::Lw, 10, 2, 0));
    assert_eq!(insts[3], Instruction::i(Mnemonic::Jalr, 1, 5, 4));
    assert_eq!(insts[4], Instruction::i(Mnemonic::Jalr, 0, 10, -4));
    assert_eq!(insts[5], Instruction::i(Mnemonic::Addi, 8, 8, 3));
}

#[test]
fn test_comments_and_blank_lines_do_not_take_addresses() {
    let program = assemble("\n# only a comment\n\nend: # trailing label\n    nop # inline\n").unwrap();
    assert_eq!(program.words, vec![0x0000_0013]);
    assert_eq!(program.line_for_pc(0), Some(5));
    assert_eq!(program.line_for_pc(2), None);
    assert_eq!(program.line_for_pc(4), None);
}

#[test]
fn test_empty_source_is_empty_program() {
    assert!(assemble("").unwrap().is_empty());
}

#[rstest]
#[case::unknown_mnemonic("nop\nfrob t0, t1", 2, AsmErrorKind::UnknownMnemonic("frob".into()))]
#[case::undefined_label("beq t0, t1, nowhere", 1, AsmErrorKind::UndefinedLabel("nowhere".into()))]
#[case::duplicate_label("x: nop\nx: nop", 2, AsmErrorKind::DuplicateLabel("x".into()))]
#[case::invalid_label("nop\n1abc: nop", 2, AsmErrorKind::InvalidLabel("1abc".into()))]
#[case::bad_register("add t0, t1, t9", 1, AsmErrorKind::InvalidRegister("t9".into()))]
#[case::register_too_high("add t0, t1, x32", 1, AsmErrorKind::InvalidRegister("x32".into()))]
#[case::bad_memory("nop\nnop\nlw t0, 4[sp]", 3, AsmErrorKind::MalformedMemoryOperand("4[sp]".into()))]
#[case::bad_immediate("addi t0, t0, ten", 1, AsmErrorKind::InvalidImmediate("ten".into()))]
#[case::too_few_operands(
    "add t0, t1",
    1,
    AsmErrorKind::OperandCount { mnemonic: "add".into(), expected: 3, found: 2 }
)]
#[case::nop_with_operand(
    "nop t0",
    1,
    AsmErrorKind::OperandCount { mnemonic: "nop".into(), expected: 0, found: 1 }
)]
#[case::immediate_too_wide(
    "addi t0, t0, 4096",
    1,
    AsmErrorKind::Encoding(EncodeError::ImmediateOutOfRange { mnemonic: Mnemonic::Addi, imm: 4096, bits: 12 })
)]
fn test_errors_carry_line(#[case] source: &str, #[case] line: usize, #[case] kind: AsmErrorKind) {
    assert_eq!(error_of(source), AsmError::new(line, kind));
}

#[test]
fn test_first_error_wins() {
    let err = error_of("nop\nfrob\nadd t0\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.to_string(), "line 2: unknown instruction 'frob'");
}

#[test]
fn test_assembler_with_explicit_table() {
    let asm = Assembler::new(AbiNames::STANDARD);
    assert_eq!(asm.assemble("addi t0, zero, 5").unwrap().words, vec![0x0050_0293]);
}
