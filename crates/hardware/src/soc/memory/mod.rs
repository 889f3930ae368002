//! Data Memory.
//!
//! This module implements the flat, byte-addressable data store. It provides:
//! 1. **Bounds-Checked Access:** Byte and little-endian word reads and writes that fail
//!    with an address error instead of wrapping, clamping, or growing.
//! 2. **Image Loading:** Bulk copy of a raw binary image at a base address.
//! 3. **Modification Tracking:** The set of words written by stores, for snapshots.

use std::collections::BTreeSet;

use crate::common::{SimError, SimResult};

/// Size of a memory word in bytes.
pub const WORD_SIZE: u32 = 4;

/// Fixed-capacity, zero-initialized data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    bytes: Vec<u8>,
    /// Word-aligned addresses touched by stores since creation or reset.
    dirty: BTreeSet<u32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity],
            dirty: BTreeSet::new(),
        }
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Verifies that `[addr, addr + size)` lies inside memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] when any byte of the range is outside memory.
    pub fn check_range(&self, addr: u32, size: u32) -> SimResult<()> {
        self.range(addr, size).map(|_| ())
    }

    /// Converts an access into a byte range, bounds-checked without overflow.
    fn range(&self, addr: u32, size: u32) -> SimResult<std::ops::Range<usize>> {
        let start = addr as usize;
        start
            .checked_add(size as usize)
            .filter(|&end| end <= self.bytes.len())
            .map(|end| start..end)
            .ok_or(SimError::Address {
                addr,
                size,
                capacity: self.bytes.len(),
            })
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] when `addr` is outside memory.
    pub fn read_byte(&self, addr: u32) -> SimResult<u8> {
        let range = self.range(addr, 1)?;
        Ok(self.bytes[range.start])
    }

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] when `addr` is outside memory.
    pub fn write_byte(&mut self, addr: u32, value: u8) -> SimResult<()> {
        let range = self.range(addr, 1)?;
        self.bytes[range.start] = value;
        let _ = self.dirty.insert(addr & !(WORD_SIZE - 1));
        Ok(())
    }

    /// Reads a little-endian word at `addr` (no alignment requirement).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] unless `addr + 4 <= capacity`.
    pub fn read_word(&self, addr: u32) -> SimResult<u32> {
        let range = self.range(addr, WORD_SIZE)?;
        let mut buf = [0u8; WORD_SIZE as usize];
        buf.copy_from_slice(&self.bytes[range]);
        Ok(u32::from_le_bytes(buf))
    }

    /// Writes a little-endian word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] unless `addr + 4 <= capacity`; memory is
    /// unchanged on failure.
    pub fn write_word(&mut self, addr: u32, value: u32) -> SimResult<()> {
        let range = self.range(addr, WORD_SIZE)?;
        self.bytes[range].copy_from_slice(&value.to_le_bytes());
        let _ = self.dirty.insert(addr);
        Ok(())
    }

    /// Copies `image` into memory starting at `base`.
    ///
    /// Image contents are initial state and are not reported as modified.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Address`] when the image would extend past the end
    /// of memory; memory is unchanged on failure.
    pub fn load_image(&mut self, image: &[u8], base: u32) -> SimResult<()> {
        let size = u32::try_from(image.len()).map_err(|_| SimError::Address {
            addr: base,
            size: u32::MAX,
            capacity: self.bytes.len(),
        })?;
        let range = self.range(base, size)?;
        self.bytes[range].copy_from_slice(image);
        Ok(())
    }

    /// Words written since creation, as `(address, current value)` in address order.
    pub fn modified_words(&self) -> Vec<(u32, u32)> {
        self.dirty
            .iter()
            .filter_map(|&addr| self.read_word(addr).ok().map(|v| (addr, v)))
            .collect()
    }

    /// Zeroes every byte and forgets modifications.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.dirty.clear();
    }
}
