//! Filter configuration and builder.
//!
//! [`FilterConfig`] is the plain, serializable description of a filter
//! (size, hash rounds, bit layout). [`BloomFilterBuilder`] produces one
//! either from explicit parameters or from a capacity target, and builds the
//! filter with a chosen hash engine.
//!
//! # Examples
//!
//! ## Explicit Parameters
//!
//! ```
//! use bytebloom::BloomFilterBuilder;
//! use bytebloom::core::BitLayout;
//!
//! let filter = BloomFilterBuilder::new()
//!     .bit_length(4_096)
//!     .hash_count(5)
//!     .layout(BitLayout::Linear)
//!     .build()?;
//! assert_eq!(filter.byte_len(), 512);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```
//!
//! ## Capacity Target
//!
//! ```
//! use bytebloom::BloomFilterBuilder;
//! use bytebloom::hash::Murmur2Hasher;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(500)
//!     .false_positive_rate(0.05)
//!     .hasher(Murmur2Hasher::new())
//!     .build()?;
//! assert_eq!(filter.hash_count(), 4);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```
//!
//! ## Loading a Configuration
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use bytebloom::{BloomFilter, FilterConfig};
//! use bytebloom::hash::Murmur3Hasher;
//!
//! let config: FilterConfig =
//!     serde_json::from_str(r#"{"bit_length": 128, "hash_count": 3}"#).unwrap();
//! let filter = BloomFilter::with_config(config, Murmur3Hasher::new()).unwrap();
//! assert_eq!(filter.bit_length(), 128);
//! # }
//! ```

use crate::core::bitarray::{bytes_for_bits, BitLayout};
use crate::core::params::{optimal_bit_count, optimal_hash_count, MAX_BIT_LENGTH};
use crate::error::{BloomError, Result};
use crate::filter::BloomFilter;
use crate::hash::{BloomHasher, DefaultHasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size and hashing parameters of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    /// Addressable bit positions, `1..=65535`.
    pub bit_length: u32,
    /// Hash rounds per key, `1..=255`.
    pub hash_count: u8,
    /// Position-to-bit mapping.
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: BitLayout,
}

impl FilterConfig {
    /// Configuration with the reference layout.
    #[must_use]
    pub const fn new(bit_length: u32, hash_count: u8) -> Self {
        Self {
            bit_length,
            hash_count,
            layout: BitLayout::Reference,
        }
    }

    /// Same configuration with a different layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: BitLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Storage bytes a filter with this configuration allocates.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        bytes_for_bits(self.bit_length)
    }

    /// Check the construction invariants.
    ///
    /// # Errors
    ///
    /// - `InvalidFilterSize` unless `1 <= bit_length <= 65535`.
    /// - `InvalidHashCount` if `hash_count == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.bit_length == 0 || self.bit_length > MAX_BIT_LENGTH {
            return Err(BloomError::invalid_filter_size(
                u64::from(self.bit_length),
                MAX_BIT_LENGTH,
            ));
        }
        if self.hash_count == 0 {
            return Err(BloomError::invalid_hash_count(0));
        }
        Ok(())
    }
}

/// Builder for [`BloomFilter`].
///
/// Size comes from `bit_length` if set, otherwise from `expected_items` and
/// `false_positive_rate`. Hash count comes from `hash_count` if set,
/// otherwise it is derived from the size and `expected_items`.
#[derive(Debug, Clone)]
#[must_use]
pub struct BloomFilterBuilder<H = DefaultHasher> {
    bit_length: Option<u32>,
    hash_count: Option<u8>,
    expected_items: Option<u64>,
    fp_rate: Option<f64>,
    layout: BitLayout,
    hasher: H,
}

impl BloomFilterBuilder<DefaultHasher> {
    /// Builder with the default hasher and reference layout.
    pub fn new() -> Self {
        Self {
            bit_length: None,
            hash_count: None,
            expected_items: None,
            fp_rate: None,
            layout: BitLayout::Reference,
            hasher: DefaultHasher::default(),
        }
    }
}

impl Default for BloomFilterBuilder<DefaultHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BloomHasher> BloomFilterBuilder<H> {
    /// Number of addressable bits.
    pub fn bit_length(mut self, bit_length: u32) -> Self {
        self.bit_length = Some(bit_length);
        self
    }

    /// Number of hash rounds.
    pub fn hash_count(mut self, hash_count: u8) -> Self {
        self.hash_count = Some(hash_count);
        self
    }

    /// Expected number of distinct items.
    pub fn expected_items(mut self, items: u64) -> Self {
        self.expected_items = Some(items);
        self
    }

    /// Target false positive rate at `expected_items`.
    pub fn false_positive_rate(mut self, fp_rate: f64) -> Self {
        self.fp_rate = Some(fp_rate);
        self
    }

    /// Position-to-bit mapping.
    pub fn layout(mut self, layout: BitLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the hash engine.
    pub fn hasher<H2: BloomHasher>(self, hasher: H2) -> BloomFilterBuilder<H2> {
        BloomFilterBuilder {
            bit_length: self.bit_length,
            hash_count: self.hash_count,
            expected_items: self.expected_items,
            fp_rate: self.fp_rate,
            layout: self.layout,
            hasher,
        }
    }

    /// Resolve the configuration without building a filter.
    ///
    /// # Errors
    ///
    /// `InvalidParameters` when neither a size nor a capacity target is
    /// given, or a capacity target lacks its false positive rate; otherwise
    /// any error from sizing or [`FilterConfig::validate`].
    pub fn config(&self) -> Result<FilterConfig> {
        let bit_length = match (self.bit_length, self.expected_items) {
            (Some(bits), _) => bits,
            (None, Some(items)) => {
                let fp_rate = self.fp_rate.ok_or_else(|| {
                    BloomError::invalid_parameters("false_positive_rate is required with expected_items")
                })?;
                optimal_bit_count(items, fp_rate)?
            }
            (None, None) => {
                return Err(BloomError::invalid_parameters(
                    "either bit_length or expected_items must be set",
                ))
            }
        };

        let hash_count = match (self.hash_count, self.expected_items) {
            (Some(k), _) => k,
            (None, Some(items)) => optimal_hash_count(bit_length, items)?,
            (None, None) => {
                return Err(BloomError::invalid_parameters(
                    "hash_count is required when expected_items is not set",
                ))
            }
        };

        let config = FilterConfig::new(bit_length, hash_count).with_layout(self.layout);
        config.validate()?;
        Ok(config)
    }

    /// Build an empty filter.
    ///
    /// # Errors
    ///
    /// Same as [`config`](Self::config).
    pub fn build(self) -> Result<BloomFilter<H>> {
        let config = self.config()?;
        BloomFilter::with_config(config, self.hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hash::Murmur2Hasher;

    #[test]
    fn test_config_validate() {
        assert!(FilterConfig::new(32, 5).validate().is_ok());
        assert!(FilterConfig::new(0, 5).validate().is_err());
        assert!(FilterConfig::new(32, 0).validate().is_err());
        assert!(FilterConfig::new(65_536, 1).validate().is_err());
        assert_eq!(FilterConfig::new(33, 1).byte_len(), 5);
    }

    #[test]
    fn test_builder_explicit() {
        let filter = BloomFilterBuilder::new().bit_length(128).hash_count(3).build().unwrap();
        assert_eq!(filter.config(), FilterConfig::new(128, 3));
    }

    #[test]
    fn test_builder_capacity_target() {
        let config = BloomFilterBuilder::new()
            .expected_items(1_000)
            .false_positive_rate(0.01)
            .config()
            .unwrap();
        assert_eq!(config.bit_length, 9_586);
        assert_eq!(config.hash_count, 7);
    }

    #[test]
    fn test_builder_explicit_size_derived_hash_count() {
        let config = BloomFilterBuilder::new().bit_length(1_000).expected_items(100).config().unwrap();
        assert_eq!(config.hash_count, 7);
    }

    #[test]
    fn test_builder_missing_parameters() {
        assert_eq!(
            BloomFilterBuilder::new().build().unwrap_err().kind(),
            ErrorKind::Construction
        );
        assert!(BloomFilterBuilder::new().bit_length(64).build().is_err());
        assert!(BloomFilterBuilder::new().expected_items(10).build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_values() {
        assert!(BloomFilterBuilder::new().bit_length(0).hash_count(1).build().is_err());
        assert!(BloomFilterBuilder::new().bit_length(8).hash_count(0).build().is_err());
    }

    #[test]
    fn test_builder_capacity_too_large() {
        let err = BloomFilterBuilder::new()
            .expected_items(1_000_000)
            .false_positive_rate(0.001)
            .build()
            .unwrap_err();
        assert!(matches!(err, BloomError::InvalidFilterSize { .. }));
    }

    #[test]
    fn test_builder_custom_hasher_and_layout() {
        let filter = BloomFilterBuilder::new()
            .bit_length(256)
            .hash_count(4)
            .layout(BitLayout::Linear)
            .hasher(Murmur2Hasher::new())
            .build()
            .unwrap();
        assert_eq!(filter.layout(), BitLayout::Linear);
        assert_eq!(filter.hasher().name(), "murmur2_32");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde_defaults_layout() {
        let config: FilterConfig = serde_json::from_str(r#"{"bit_length":64,"hash_count":2}"#).unwrap();
        assert_eq!(config, FilterConfig::new(64, 2));

        let linear = FilterConfig::new(64, 2).with_layout(BitLayout::Linear);
        let json = serde_json::to_string(&linear).unwrap();
        assert!(json.contains("\"linear\""));
        let back: FilterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, linear);
    }
}
