//! Operand parsers: registers, immediates, memory operands, and jump targets.

use std::collections::HashMap;

use super::AsmErrorKind;
use super::lexer::is_identifier;
use crate::isa::abi::AbiNames;

/// Resolves a register operand through the ABI table.
pub fn parse_register(abi: &AbiNames, token: &str) -> Result<usize, AsmErrorKind> {
    abi.index_of(token)
        .ok_or_else(|| AsmErrorKind::InvalidRegister(token.to_string()))
}

/// Parses a decimal, `0x` hex, or `0b` binary immediate with optional sign.
pub fn parse_immediate(token: &str) -> Result<i32, AsmErrorKind> {
    let invalid = || AsmErrorKind::InvalidImmediate(token.to_string());
    let t = token.trim();
    let (negative, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, body)
    };
    // from_str_radix accepts its own sign; only one leading sign is allowed.
    if digits.starts_with(['-', '+']) {
        return Err(invalid());
    }
    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| invalid())
}

/// Parses a memory operand `imm(reg)`; an empty `imm` means zero.
///
/// Returns `(offset, base_register)`.
pub fn parse_memory(abi: &AbiNames, token: &str) -> Result<(i32, usize), AsmErrorKind> {
    let malformed = || AsmErrorKind::MalformedMemoryOperand(token.to_string());
    let (imm_text, rest) = token.split_once('(').ok_or_else(malformed)?;
    let reg_text = rest.strip_suffix(')').ok_or_else(malformed)?;
    if reg_text.contains(['(', ')']) {
        return Err(malformed());
    }
    let imm = if imm_text.trim().is_empty() {
        0
    } else {
        parse_immediate(imm_text).map_err(|_| malformed())?
    };
    let base = parse_register(abi, reg_text)?;
    Ok((imm, base))
}

/// Resolves a branch/jump target into a pc-relative byte offset.
///
/// A known label yields `label_address - pc`; a numeric token is taken as a
/// literal offset.
pub fn parse_target(
    token: &str,
    labels: &HashMap<&str, u32>,
    pc: u32,
) -> Result<i32, AsmErrorKind> {
    if let Some(&addr) = labels.get(token) {
        return Ok(addr.wrapping_sub(pc) as i32);
    }
    if is_identifier(token) {
        return Err(AsmErrorKind::UndefinedLabel(token.to_string()));
    }
    parse_immediate(token)
}
