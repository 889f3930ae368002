//! Two-pass assembler.
//!
//! Translates assembly text into 32-bit machine words. It performs:
//! 1. **Pass 1 (Labels):** Walks the lines with a running byte address starting at 0.
//!    A label records the address of the next instruction; every statement adds 4.
//! 2. **Pass 2 (Encoding):** Resolves registers through the ABI table, memory operands
//!    `imm(reg)`, and branch/jump targets as pc-relative offsets, then encodes each
//!    statement with the shared codec.
//!
//! Assembly aborts on the first error, which carries the one-based source line.
//!
//! Besides the machine instructions, the pseudo-instructions `nop`, `mv rd, rs`,
//! `j target`, `jal target` (links into `ra`), and `ret` are accepted. Each
//! expands to exactly one word.

/// Line lexer (labels, comments, operand tokens).
pub mod lexer;

/// Register, immediate, memory-operand, and target parsers.
pub mod operands;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use self::lexer::{SourceLine, Statement, lex_line};
use self::operands::{parse_immediate, parse_memory, parse_register, parse_target};
use crate::isa::abi::{AbiNames, REG_RA, REG_ZERO};
use crate::isa::encode::{EncodeError, encode};
use crate::isa::instruction::{Format, Instruction, Mnemonic};

/// Size of one instruction word in bytes.
const WORD_BYTES: u32 = 4;

/// What went wrong on a source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    /// The mnemonic names no instruction or pseudo-instruction.
    #[error("unknown instruction '{0}'")]
    UnknownMnemonic(String),

    /// A branch or jump names a label that is never defined.
    #[error("undefined label '{0}'")]
    UndefinedLabel(String),

    /// The same label is defined twice.
    #[error("label '{0}' defined more than once")]
    DuplicateLabel(String),

    /// Text before a `:` is not an identifier.
    #[error("invalid label '{0}'")]
    InvalidLabel(String),

    /// A register operand is not an ABI name or `x0`–`x31`.
    #[error("invalid register '{0}'")]
    InvalidRegister(String),

    /// A memory operand is not of the form `imm(reg)`.
    #[error("malformed memory operand '{0}', expected imm(reg)")]
    MalformedMemoryOperand(String),

    /// An immediate is not a number or does not fit 32 bits.
    #[error("invalid immediate '{0}'")]
    InvalidImmediate(String),

    /// Wrong number of operands for the mnemonic.
    #[error("'{mnemonic}' expects {expected} operand(s), found {found}")]
    OperandCount {
        /// Mnemonic as written.
        mnemonic: String,
        /// Operands required.
        expected: usize,
        /// Operands supplied.
        found: usize,
    },

    /// The operands parsed but do not fit the instruction encoding.
    #[error(transparent)]
    Encoding(#[from] EncodeError),
}

/// Assembly failure, tagged with the one-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    /// One-based source line number.
    pub line: usize,
    /// Failure reason.
    pub kind: AsmErrorKind,
}

impl AsmError {
    /// Tags `kind` with a line number.
    pub const fn new(line: usize, kind: AsmErrorKind) -> Self {
        Self { line, kind }
    }
}

/// An assembled program: machine words plus their source line numbers.
///
/// `lines[i]` is the source line that produced `words[i]`, letting a viewer map
/// a pc back to the text it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Machine words, in address order starting at 0.
    pub words: Vec<u32>,
    /// Source line of each word (empty for programs loaded as raw words).
    pub lines: Vec<usize>,
}

impl Program {
    /// Wraps pre-assembled words with no source mapping.
    pub fn from_words(words: Vec<u32>) -> Self {
        Self {
            words,
            lines: Vec::new(),
        }
    }

    /// Number of instruction words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Source line of the instruction at byte address `pc`.
    pub fn line_for_pc(&self, pc: u32) -> Option<usize> {
        if pc % WORD_BYTES != 0 {
            return None;
        }
        self.lines.get((pc / WORD_BYTES) as usize).copied()
    }
}

/// Two-pass assembler bound to a register name table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Assembler {
    abi: AbiNames,
}

impl Assembler {
    /// Creates an assembler resolving registers through `abi`.
    pub const fn new(abi: AbiNames) -> Self {
        Self { abi }
    }

    /// Assembles `source` into a [`Program`].
    ///
    /// # Errors
    ///
    /// Returns the first [`AsmError`] encountered, in source order; no partial
    /// program is produced.
    pub fn assemble(&self, source: &str) -> Result<Program, AsmError> {
        let lines = source
            .lines()
            .enumerate()
            .map(|(i, text)| lex_line(i + 1, text).map_err(|kind| AsmError::new(i + 1, kind)))
            .collect::<Result<Vec<_>, _>>()?;

        let labels = collect_labels(&lines)?;
        debug!(labels = labels.len(), "assembler pass 1 complete");

        let mut program = Program::default();
        let mut pc = 0u32;
        for line in &lines {
            let Some(stmt) = &line.statement else {
                continue;
            };
            let inst = self
                .build(stmt, &labels, pc)
                .map_err(|kind| AsmError::new(line.number, kind))?;
            let word = encode(&inst).map_err(|e| AsmError::new(line.number, e.into()))?;
            program.words.push(word);
            program.lines.push(line.number);
            pc = pc.wrapping_add(WORD_BYTES);
        }
        debug!(words = program.len(), "assembler pass 2 complete");
        Ok(program)
    }

    /// Translates one statement into an instruction at address `pc`.
    fn build(
        &self,
        stmt: &Statement<'_>,
        labels: &HashMap<&str, u32>,
        pc: u32,
    ) -> Result<Instruction, AsmErrorKind> {
        let ops = &stmt.operands;
        let reg = |i: usize| parse_register(&self.abi, ops[i]);
        let expect = |n: usize| {
            if ops.len() == n {
                Ok(())
            } else {
                Err(AsmErrorKind::OperandCount {
                    mnemonic: stmt.mnemonic.to_string(),
                    expected: n,
                    found: ops.len(),
                })
            }
        };

        match stmt.mnemonic.to_ascii_lowercase().as_str() {
            "nop" => {
                expect(0)?;
                return Ok(Instruction::nop());
            }
            "mv" => {
                expect(2)?;
                return Ok(Instruction::i(Mnemonic::Addi, reg(0)?, reg(1)?, 0));
            }
            "ret" => {
                expect(0)?;
                return Ok(Instruction::i(Mnemonic::Jalr, REG_ZERO, REG_RA, 0));
            }
            _ => {}
        }

        let mnemonic: Mnemonic = stmt
            .mnemonic
            .parse()
            .map_err(|_| AsmErrorKind::UnknownMnemonic(stmt.mnemonic.to_string()))?;

        match (mnemonic.format(), mnemonic) {
            (Format::R, m) => {
                expect(3)?;
                Ok(Instruction::r(m, reg(0)?, reg(1)?, reg(2)?))
            }
            (Format::I, Mnemonic::Lw) => {
                expect(2)?;
                let (imm, base) = parse_memory(&self.abi, ops[1])?;
                Ok(Instruction::i(Mnemonic::Lw, reg(0)?, base, imm))
            }
            (Format::I, Mnemonic::Jalr) if ops.len() == 3 => Ok(Instruction::i(
                Mnemonic::Jalr,
                reg(0)?,
                reg(1)?,
                parse_immediate(ops[2])?,
            )),
            (Format::I, Mnemonic::Jalr) => {
                expect(2)?;
                let (imm, base) = parse_memory(&self.abi, ops[1])?;
                Ok(Instruction::i(Mnemonic::Jalr, reg(0)?, base, imm))
            }
            (Format::I, m) => {
                expect(3)?;
                Ok(Instruction::i(m, reg(0)?, reg(1)?, parse_immediate(ops[2])?))
            }
            (Format::S, m) => {
                expect(2)?;
                let (imm, base) = parse_memory(&self.abi, ops[1])?;
                Ok(Instruction::s(m, base, reg(0)?, imm))
            }
            (Format::B, m) => {
                expect(3)?;
                Ok(Instruction::b(
                    m,
                    reg(0)?,
                    reg(1)?,
                    parse_target(ops[2], labels, pc)?,
                ))
            }
            (Format::J, Mnemonic::J) => {
                expect(1)?;
                Ok(Instruction::j(Mnemonic::J, REG_ZERO, parse_target(ops[0], labels, pc)?))
            }
            (Format::J, m) if ops.len() == 1 => {
                Ok(Instruction::j(m, REG_RA, parse_target(ops[0], labels, pc)?))
            }
            (Format::J, m) => {
                expect(2)?;
                Ok(Instruction::j(m, reg(0)?, parse_target(ops[1], labels, pc)?))
            }
        }
    }
}

/// Pass 1: maps every label to the address of the instruction that follows it.
fn collect_labels<'a>(lines: &[SourceLine<'a>]) -> Result<HashMap<&'a str, u32>, AsmError> {
    let mut labels = HashMap::new();
    let mut addr = 0u32;
    for line in lines {
        for &label in &line.labels {
            if labels.insert(label, addr).is_some() {
                return Err(AsmError::new(
                    line.number,
                    AsmErrorKind::DuplicateLabel(label.to_string()),
                ));
            }
        }
        if line.statement.is_some() {
            addr = addr.wrapping_add(WORD_BYTES);
        }
    }
    Ok(labels)
}

/// Assembles `source` with the standard ABI register names.
///
/// # Errors
///
/// See [`Assembler::assemble`].
///
/// # Examples
///
/// ```
/// use rvpipe_core::asm::assemble;
///
/// let program = assemble("start: addi t0, zero, 5\n  j start").unwrap();
/// assert_eq!(program.words, vec![0x0050_0293, 0xFFDF_F06F]);
/// assert_eq!(program.line_for_pc(4), Some(2));
/// ```
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    Assembler::default().assemble(source)
}
