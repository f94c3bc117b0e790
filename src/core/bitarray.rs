//! Byte-packed bit array.
//!
//! Stores `bit_length` addressable positions in `ceil(bit_length / 8)` bytes.
//! Positions are laid out contiguously across bytes (position `p` always
//! lives in byte `p / 8`); *which* bit of that byte it occupies is decided by
//! the [`BitLayout`].
//!
//! # Layouts
//!
//! ```text
//! position p = 8*b + r        Reference            Linear
//! ---------------------       ------------------   -----------
//! r = 0                       byte b, bit 7        byte b, bit 0
//! r = 1..=7                   byte b, bit r - 1    byte b, bit r
//! ```
//!
//! `Reference` reproduces the addressing of existing filters bit for bit
//! (`bit = r - 1`, with `-1` remapped to `7`). It never spills into a
//! neighbouring byte. `Linear` is the conventional LSB-first layout. Both
//! give identical membership behaviour; only the raw bytes differ.

#![allow(clippy::module_name_repetitions)]

use crate::error::{BloomError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bits per storage byte.
pub const BITS_PER_BYTE: u32 = 8;

/// Mapping from a bit position to a bit within its byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BitLayout {
    /// `bit = (p mod 8 + 7) mod 8`. Compatible with previously built filters.
    #[default]
    Reference,
    /// `bit = p mod 8`.
    Linear,
}

impl BitLayout {
    /// Byte index and in-byte bit index of `position`.
    #[inline]
    #[must_use]
    pub const fn locate(self, position: u32) -> (usize, u32) {
        let byte_index = position / BITS_PER_BYTE;
        let offset = position - byte_index * BITS_PER_BYTE;
        let bit_index = match self {
            Self::Reference => {
                if offset == 0 {
                    BITS_PER_BYTE - 1
                } else {
                    offset - 1
                }
            }
            Self::Linear => offset,
        };
        (byte_index as usize, bit_index)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Linear => "linear",
        }
    }
}

/// Number of storage bytes for `bit_length` positions.
#[inline]
#[must_use]
pub const fn bytes_for_bits(bit_length: u32) -> usize {
    bit_length.div_ceil(BITS_PER_BYTE) as usize
}

/// Fixed-length bit array packed into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteBitArray {
    bytes: Vec<u8>,
    bit_length: u32,
    layout: BitLayout,
}

impl ByteBitArray {
    /// All-zero array of `bit_length` positions.
    #[must_use]
    pub fn new(bit_length: u32, layout: BitLayout) -> Self {
        Self {
            bytes: vec![0u8; bytes_for_bits(bit_length)],
            bit_length,
            layout,
        }
    }

    /// Adopt existing storage.
    ///
    /// # Errors
    ///
    /// - `Uninitialized` if `bytes` is empty.
    /// - `InvalidParameters` if the length is not `ceil(bit_length / 8)` or a
    ///   bit outside the addressable positions is set.
    pub fn from_bytes(bit_length: u32, layout: BitLayout, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(BloomError::uninitialized("from_raw_parts"));
        }
        let expected = bytes_for_bits(bit_length);
        if bytes.len() != expected {
            return Err(BloomError::invalid_parameters(format!(
                "{} bits need {} bytes of storage, got {}",
                bit_length,
                expected,
                bytes.len()
            )));
        }

        let array = Self {
            bytes,
            bit_length,
            layout,
        };
        let last = array.bytes.len() - 1;
        let stray = array.bytes[last] & !array.addressable_mask(last);
        if stray != 0 {
            return Err(BloomError::invalid_parameters(format!(
                "byte {} has bits set beyond position {} (mask {:#010b})",
                last,
                bit_length - 1,
                stray
            )));
        }
        Ok(array)
    }

    /// Bits of byte `byte_index` that correspond to positions `< bit_length`.
    #[must_use]
    pub fn addressable_mask(&self, byte_index: usize) -> u8 {
        let first = byte_index as u64 * u64::from(BITS_PER_BYTE);
        let end = (first + u64::from(BITS_PER_BYTE)).min(u64::from(self.bit_length));
        (first..end).fold(0u8, |mask, position| {
            // position < bit_length <= u32::MAX
            let (_, bit) = self.layout.locate(position as u32);
            mask | (1 << bit)
        })
    }

    /// Set the bit at `position`.
    #[inline]
    pub fn set(&mut self, position: u32) {
        debug_assert!(
            position < self.bit_length,
            "Bit index {} out of bounds (m={})",
            position,
            self.bit_length
        );
        let (byte_index, bit_index) = self.layout.locate(position);
        self.bytes[byte_index] |= 1 << bit_index;
    }

    /// Test the bit at `position`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: u32) -> bool {
        debug_assert!(
            position < self.bit_length,
            "Bit index {} out of bounds (m={})",
            position,
            self.bit_length
        );
        let (byte_index, bit_index) = self.layout.locate(position);
        self.bytes[byte_index] & (1 << bit_index) != 0
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// `true` if no bit is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Addressable positions.
    #[inline]
    #[must_use]
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }

    /// Layout used by `set`/`get`.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> BitLayout {
        self.layout
    }

    /// Backing bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fail with `Uninitialized` if the storage is missing.
    ///
    /// Constructors always allocate; this guards states that could only
    /// arise from a broken invariant.
    pub fn ensure_allocated(&self, operation: &'static str) -> Result<()> {
        if self.bytes.is_empty() || self.bit_length == 0 {
            return Err(BloomError::uninitialized(operation));
        }
        Ok(())
    }
}
