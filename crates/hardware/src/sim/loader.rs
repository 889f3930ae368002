//! Program and Image Loading.
//!
//! This module turns files and text into something the simulator can load. It provides:
//! 1. **Word Listings:** Pre-assembled programs written one word per line, either as
//!    32 binary digits or as 8 hex digits.
//! 2. **File Reading:** Program text and raw data images read from disk, with I/O
//!    failures reported as [`SimError::Io`].
//! 3. **Source Detection:** Assembly versus listing chosen from the file extension.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::{SimError, SimResult};

/// File extensions treated as assembly source.
pub const ASSEMBLY_EXTENSIONS: [&str; 2] = ["s", "asm"];

/// Program text read from disk, tagged with how it should be interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramText {
    /// Assembly source.
    Assembly(String),
    /// One pre-assembled word per line.
    Listing(String),
}

/// Parses a word listing into instruction words.
///
/// Blank lines and lines starting with `#` are skipped. Every other line,
/// trimmed, must be exactly 32 binary digits or exactly 8 hex digits.
///
/// # Errors
///
/// Returns [`SimError::ProgramFormat`] for the first line that is neither.
///
/// # Examples
///
/// ```
/// use rvpipe_core::sim::loader::parse_word_listing;
///
/// let words = parse_word_listing("00500293\n# comment\n00000000000000000000000000010011\n")?;
/// assert_eq!(words, vec![0x0050_0293, 0x0000_0013]);
/// # Ok::<(), rvpipe_core::common::SimError>(())
/// ```
pub fn parse_word_listing(text: &str) -> SimResult<Vec<u32>> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parsed = match line.len() {
            32 if line.bytes().all(|b| b == b'0' || b == b'1') => {
                u32::from_str_radix(line, 2).ok()
            }
            8 if line.bytes().all(|b| b.is_ascii_hexdigit()) => u32::from_str_radix(line, 16).ok(),
            _ => None,
        };
        match parsed {
            Some(word) => words.push(word),
            None => {
                return Err(SimError::ProgramFormat {
                    line: idx + 1,
                    text: line.to_string(),
                });
            }
        }
    }
    debug!("[Loader] parsed {} words from listing", words.len());
    Ok(words)
}

/// Reads a raw binary file into a byte vector.
///
/// # Arguments
///
/// * `path` - Path to the binary file.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> SimResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SimError::Io(format!("could not read '{}': {e}", path.display())))
}

/// Reads a program file, treating `.s` and `.asm` files as assembly and
/// anything else as a word listing.
///
/// # Errors
///
/// Returns [`SimError::Io`] when the file cannot be read as UTF-8 text.
pub fn load_program_text(path: impl AsRef<Path>) -> SimResult<ProgramText> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| SimError::Io(format!("could not read '{}': {e}", path.display())))?;
    let is_assembly = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ASSEMBLY_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });
    debug!(
        "[Loader] read {} bytes from {} as {}",
        text.len(),
        path.display(),
        if is_assembly { "assembly" } else { "listing" }
    );
    Ok(if is_assembly {
        ProgramText::Assembly(text)
    } else {
        ProgramText::Listing(text)
    })
}
