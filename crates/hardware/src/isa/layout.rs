//! Authoritative bit layout of the five instruction formats.
//!
//! Both the decoder and the encoder read field positions from this module, so the
//! round-trip law `decode(encode(i)) == i` holds by construction. It provides:
//! 1. **Register/Function Fields:** Shift and mask pairs for rd, rs1, rs2, funct3, funct7.
//! 2. **Immediate Slices:** For each format, where every immediate bit range lives in the word.
//! 3. **Immediate Codec:** Extraction with sign extension, insertion, and range checks.

use crate::isa::instruction::Format;

/// Bit mask for the opcode field (bits 6-0).
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit position of the destination register field (bits 11-7).
pub const RD_SHIFT: u32 = 7;
/// Bit position of the funct3 field (bits 14-12).
pub const FUNCT3_SHIFT: u32 = 12;
/// Bit position of the first source register field (bits 19-15).
pub const RS1_SHIFT: u32 = 15;
/// Bit position of the second source register field (bits 24-20).
pub const RS2_SHIFT: u32 = 20;
/// Bit position of the funct7 field (bits 31-25).
pub const FUNCT7_SHIFT: u32 = 25;

/// Mask for any 5-bit register field after shifting.
pub const REG_MASK: u32 = 0x1F;
/// Mask for the funct3 field after shifting.
pub const FUNCT3_MASK: u32 = 0x7;
/// Mask for the funct7 field after shifting.
pub const FUNCT7_MASK: u32 = 0x7F;

/// One contiguous run of immediate bits inside an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImmSlice {
    /// Lowest bit of the run within the instruction word.
    pub word_lsb: u32,
    /// Lowest bit of the run within the immediate value.
    pub imm_lsb: u32,
    /// Number of bits in the run.
    pub width: u32,
}

impl ImmSlice {
    /// Creates a slice descriptor.
    const fn new(word_lsb: u32, imm_lsb: u32, width: u32) -> Self {
        Self {
            word_lsb,
            imm_lsb,
            width,
        }
    }

    /// Mask covering `width` low bits.
    const fn mask(self) -> u32 {
        (1 << self.width) - 1
    }
}

/// I-type: `imm[11:0]` at bits 31-20.
const I_SLICES: [ImmSlice; 1] = [ImmSlice::new(20, 0, 12)];

/// S-type: `imm[11:5]` at bits 31-25, `imm[4:0]` at bits 11-7.
const S_SLICES: [ImmSlice; 2] = [ImmSlice::new(25, 5, 7), ImmSlice::new(7, 0, 5)];

/// B-type: `imm[12]`@31, `imm[10:5]`@30-25, `imm[4:1]`@11-8, `imm[11]`@7; bit 0 implied zero.
const B_SLICES: [ImmSlice; 4] = [
    ImmSlice::new(31, 12, 1),
    ImmSlice::new(25, 5, 6),
    ImmSlice::new(8, 1, 4),
    ImmSlice::new(7, 11, 1),
];

/// J-type: `imm[20]`@31, `imm[10:1]`@30-21, `imm[11]`@20, `imm[19:12]`@19-12; bit 0 implied zero.
const J_SLICES: [ImmSlice; 4] = [
    ImmSlice::new(31, 20, 1),
    ImmSlice::new(21, 1, 10),
    ImmSlice::new(20, 11, 1),
    ImmSlice::new(12, 12, 8),
];

/// Returns the immediate slices of `format` (empty for R-type).
pub fn imm_slices(format: Format) -> &'static [ImmSlice] {
    match format {
        Format::R => &[],
        Format::I => &I_SLICES,
        Format::S => &S_SLICES,
        Format::B => &B_SLICES,
        Format::J => &J_SLICES,
    }
}

/// Returns the signed width of the immediate of `format`, counting the implied zero bit.
pub const fn imm_bits(format: Format) -> u32 {
    match format {
        Format::R => 0,
        Format::I | Format::S => 12,
        Format::B => 13,
        Format::J => 21,
    }
}

/// Whether the immediate of `format` must be even (bit 0 is not encoded).
pub const fn imm_is_halfword_scaled(format: Format) -> bool {
    matches!(format, Format::B | Format::J)
}

/// Sign-extends the low `bits` of `value`.
///
/// # Arguments
///
/// * `value` - Raw bit pattern, right-aligned.
/// * `bits`  - Width of the signed field (0 yields 0).
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    if bits == 0 {
        return 0;
    }
    if bits >= 32 {
        return value as i32;
    }
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Reassembles and sign-extends the immediate of `format` from `word`.
pub fn extract_imm(word: u32, format: Format) -> i32 {
    let raw = imm_slices(format).iter().fold(0u32, |acc, s| {
        acc | (((word >> s.word_lsb) & s.mask()) << s.imm_lsb)
    });
    sign_extend(raw, imm_bits(format))
}

/// Scatters `imm` into its bit positions for `format`.
///
/// Bits outside the format's immediate field are discarded; callers check
/// [`imm_fits`] first.
pub fn insert_imm(imm: i32, format: Format) -> u32 {
    let raw = imm as u32;
    imm_slices(format).iter().fold(0u32, |acc, s| {
        acc | (((raw >> s.imm_lsb) & s.mask()) << s.word_lsb)
    })
}

/// Whether `imm` is representable by `format` (signed range, and even for B/J).
pub const fn imm_fits(imm: i32, format: Format) -> bool {
    let bits = imm_bits(format);
    if bits == 0 {
        return imm == 0;
    }
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    let wide = imm as i64;
    if wide < min || wide > max {
        return false;
    }
    !imm_is_halfword_scaled(format) || imm % 2 == 0
}
