//! Line lexer for assembly source.
//!
//! Splits one source line into its label definitions and an optional statement
//! (mnemonic plus operand tokens). Comments start at `#`. Operands are separated
//! by commas and/or whitespace, so `add t0, t1, t2` and `add t0 t1 t2` lex alike.

use super::AsmErrorKind;

/// A statement: mnemonic and raw operand tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement<'a> {
    /// Mnemonic as written (case preserved for diagnostics).
    pub mnemonic: &'a str,
    /// Operand tokens, in order.
    pub operands: Vec<&'a str>,
}

/// One lexed source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// One-based line number.
    pub number: usize,
    /// Labels defined on this line, in order.
    pub labels: Vec<&'a str>,
    /// Instruction on this line, if any.
    pub statement: Option<Statement<'a>>,
}

/// Whether `name` is a valid label identifier (`[A-Za-z_.][A-Za-z0-9_.]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Lexes one line of source.
///
/// # Errors
///
/// Returns [`AsmErrorKind::InvalidLabel`] when text before a `:` is not an identifier.
pub fn lex_line(number: usize, text: &str) -> Result<SourceLine<'_>, AsmErrorKind> {
    let mut rest = text.split('#').next().unwrap_or_default().trim();
    let mut labels = Vec::new();

    while let Some((head, tail)) = rest.split_once(':') {
        let label = head.trim();
        if !is_identifier(label) {
            return Err(AsmErrorKind::InvalidLabel(label.to_string()));
        }
        labels.push(label);
        rest = tail.trim();
    }

    let mut tokens = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let statement = tokens.next().map(|mnemonic| Statement {
        mnemonic,
        operands: tokens.collect(),
    });

    Ok(SourceLine {
        number,
        labels,
        statement,
    })
}
