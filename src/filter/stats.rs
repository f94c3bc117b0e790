//! Point-in-time diagnostics for a filter.

use super::BloomFilter;
use crate::core::bitarray::BitLayout;
use crate::error::{ErrorKind, Result};
use crate::hash::BloomHasher;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of a filter's parameters and occupancy.
///
/// Estimates are `None` when the filter is saturated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterStats {
    /// Addressable bit positions (m).
    pub bit_length: u32,
    /// Hash rounds per key (k).
    pub hash_count: u8,
    /// Storage size in bytes.
    pub byte_len: usize,
    /// Set bits (x).
    pub set_bits: u32,
    /// `set_bits / bit_length`.
    pub fill_ratio: f64,
    /// Estimated distinct items.
    pub estimated_cardinality: Option<u64>,
    /// Estimated false positive rate.
    pub false_positive_rate: Option<f64>,
    /// Position-to-bit mapping.
    pub layout: BitLayout,
    /// Hash engine name.
    pub hasher: String,
}

impl<H: BloomHasher> BloomFilter<H> {
    /// Collect a [`FilterStats`] snapshot.
    ///
    /// # Errors
    ///
    /// `Uninitialized` if the storage is missing. A saturated filter is not an
    /// error here; its estimates are reported as `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(128, 3)?;
    /// filter.insert_all(["apple", "banana", "cherry", "date", "fig"])?;
    ///
    /// let stats = filter.stats()?;
    /// assert_eq!(stats.set_bits, 12);
    /// assert_eq!(stats.estimated_cardinality, Some(5));
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn stats(&self) -> Result<FilterStats> {
        self.bits.ensure_allocated("stats")?;

        let (estimated_cardinality, false_positive_rate) =
            match (self.estimated_cardinality(), self.false_positive_rate()) {
                (Ok(n), Ok(p)) => (Some(n), Some(p)),
                (Err(err), _) | (_, Err(err)) if err.kind() == ErrorKind::Estimation => (None, None),
                (Err(err), _) | (_, Err(err)) => return Err(err),
            };

        Ok(FilterStats {
            bit_length: self.bit_length(),
            hash_count: self.hash_count(),
            byte_len: self.byte_len(),
            set_bits: self.count_set_bits(),
            fill_ratio: self.fill_ratio(),
            estimated_cardinality,
            false_positive_rate,
            layout: self.layout(),
            hasher: self.hasher.name().to_string(),
        })
    }
}
