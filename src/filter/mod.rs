//! The Bloom filter.
//!
//! A [`BloomFilter`] owns a [`ByteBitArray`] of `bit_length` positions and a
//! seeded hash engine evaluated `hash_count` times per key:
//!
//! ```text
//! key ──encode──▶ bytes ──hash(bytes, 0..k)──▶ k positions ──▶ set / test bits
//! ```
//!
//! - [`insert`](BloomFilter::insert) sets all k bits.
//! - [`contains`](BloomFilter::contains) stops at the first unset bit
//!   ("definitely absent"); it answers "possibly present" only when all k are
//!   set. False negatives are impossible; false positives are bounded
//!   probabilistically.
//! - Bits are never cleared. `bit_length` and `hash_count` are fixed at
//!   construction.
//!
//! # Concurrency
//!
//! The filter has no internal synchronization. Share it behind a lock and
//! serialize inserts:
//!
//! ```
//! use bytebloom::BloomFilter;
//! use std::sync::{Arc, RwLock};
//!
//! let filter = Arc::new(RwLock::new(BloomFilter::new(1024, 4)?));
//!
//! let writer = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     writer.write().unwrap().insert("from-thread").unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert!(filter.read().unwrap().contains("from-thread")?);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```

mod algebra;
mod stats;

pub use stats::FilterStats;

use crate::builder::FilterConfig;
use crate::core::bitarray::{BitLayout, ByteBitArray};
use crate::core::params::{estimate_cardinality, false_positive_probability, optimal_bit_count, optimal_hash_count};
use crate::error::Result;
use crate::hash::{bit_indices, BloomHasher, DefaultHasher};
use crate::key::BloomKey;

/// Fixed-size Bloom filter over byte-encoded keys.
///
/// # Type Parameters
///
/// * `H` - Hash engine (defaults to [`Murmur3Hasher`](crate::hash::Murmur3Hasher))
///
/// # Examples
///
/// ```
/// use bytebloom::BloomFilter;
///
/// let mut filter = BloomFilter::new(128, 3)?;
/// filter.insert("apple")?;
/// filter.insert(&2500i32)?;
///
/// assert!(filter.contains("apple")?);
/// assert!(filter.contains(&2500i32)?);
/// assert!(!filter.contains("cherry")?);
/// # Ok::<(), bytebloom::BloomError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter<H = DefaultHasher> {
    bits: ByteBitArray,
    hash_count: u8,
    hasher: H,
}

impl BloomFilter<DefaultHasher> {
    /// Create an empty filter with the default hasher and reference layout.
    ///
    /// # Errors
    ///
    /// - `InvalidFilterSize` if `bit_length` is 0 or above 65535.
    /// - `InvalidHashCount` if `hash_count` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(32, 5)?;
    /// assert!(filter.raw_bits().iter().all(|&b| b == 0));
    ///
    /// assert!(BloomFilter::new(0, 5).is_err());
    /// assert!(BloomFilter::new(32, 0).is_err());
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn new(bit_length: u32, hash_count: u8) -> Result<Self> {
        Self::with_hasher(bit_length, hash_count, DefaultHasher::default())
    }

    /// Create a filter sized for `expected_items` at `fp_rate`.
    ///
    /// # Errors
    ///
    /// Fails if the parameters are out of range or the optimal size exceeds
    /// 65535 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let filter = BloomFilter::with_fpr(1_000, 0.01)?;
    /// assert_eq!(filter.bit_length(), 9_586);
    /// assert_eq!(filter.hash_count(), 7);
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn with_fpr(expected_items: u64, fp_rate: f64) -> Result<Self> {
        let bit_length = optimal_bit_count(expected_items, fp_rate)?;
        let hash_count = optimal_hash_count(bit_length, expected_items)?;
        Self::new(bit_length, hash_count)
    }
}

impl<H: BloomHasher> BloomFilter<H> {
    /// Create an empty filter using a custom hash engine.
    ///
    /// # Errors
    ///
    /// Same as [`BloomFilter::new`].
    pub fn with_hasher(bit_length: u32, hash_count: u8, hasher: H) -> Result<Self> {
        Self::with_config(FilterConfig::new(bit_length, hash_count), hasher)
    }

    /// Create an empty filter from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a construction error if `config` is invalid.
    pub fn with_config(config: FilterConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            bit_length = config.bit_length,
            hash_count = config.hash_count,
            layout = config.layout.name(),
            hasher = hasher.name(),
            "creating bloom filter"
        );
        Ok(Self {
            bits: ByteBitArray::new(config.bit_length, config.layout),
            hash_count: config.hash_count,
            hasher,
        })
    }

    /// Rebuild a filter from bytes previously obtained with
    /// [`raw_bits`](Self::raw_bits).
    ///
    /// # Errors
    ///
    /// - Construction error if `config` is invalid.
    /// - `Uninitialized` if `bytes` is empty.
    /// - `InvalidParameters` if the length is not `ceil(bit_length / 8)` or
    ///   bits beyond `bit_length` are set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::{BloomFilter, FilterConfig};
    /// use bytebloom::hash::Murmur3Hasher;
    ///
    /// let mut filter = BloomFilter::new(64, 3)?;
    /// filter.insert("persisted")?;
    ///
    /// let bytes = filter.raw_bits().to_vec();
    /// let restored = BloomFilter::from_raw_parts(filter.config(), bytes, Murmur3Hasher::new())?;
    /// assert!(restored.contains("persisted")?);
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn from_raw_parts(config: FilterConfig, bytes: Vec<u8>, hasher: H) -> Result<Self> {
        config.validate()?;
        let bits = ByteBitArray::from_bytes(config.bit_length, config.layout, bytes)?;
        Ok(Self {
            bits,
            hash_count: config.hash_count,
            hasher,
        })
    }

    /// Add `key` to the filter.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` if the key has no byte encoding; the filter is left
    /// unchanged.
    pub fn insert<K: BloomKey + ?Sized>(&mut self, key: &K) -> Result<()> {
        let bytes = key.key_bytes()?;
        self.insert_encoded(&bytes);
        Ok(())
    }

    /// Test whether `key` is possibly in the filter.
    ///
    /// `false` means definitely absent; `true` means present or a false
    /// positive.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` if the key has no byte encoding.
    pub fn contains<K: BloomKey + ?Sized>(&self, key: &K) -> Result<bool> {
        let bytes = key.key_bytes()?;
        Ok(self.contains_encoded(&bytes))
    }

    /// Insert every key, or none of them if any key fails to encode.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` for the first key without an encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(256, 3)?;
    /// filter.insert_all(["a", "b", "c"])?;
    /// assert_eq!(filter.contains_all(["a", "c", "zz"])?, vec![true, true, false]);
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn insert_all<I>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: BloomKey,
    {
        let keys: Vec<I::Item> = keys.into_iter().collect();
        let encoded = keys.iter().map(BloomKey::key_bytes).collect::<Result<Vec<_>>>()?;
        for bytes in &encoded {
            self.insert_encoded(bytes);
        }
        Ok(())
    }

    /// Membership answer for each key, in order.
    ///
    /// # Errors
    ///
    /// `UnsupportedKey` for the first key without an encoding.
    pub fn contains_all<I>(&self, keys: I) -> Result<Vec<bool>>
    where
        I: IntoIterator,
        I::Item: BloomKey,
    {
        keys.into_iter()
            .map(|key| self.contains(&key))
            .collect()
    }

    fn insert_encoded(&mut self, bytes: &[u8]) {
        let bit_length = self.bits.bit_length();
        tracing::trace!(bit_length, hash_count = self.hash_count, key_len = bytes.len(), "insert");
        for position in bit_indices(&self.hasher, bytes, self.hash_count, bit_length) {
            self.bits.set(position);
        }
    }

    fn contains_encoded(&self, bytes: &[u8]) -> bool {
        let bit_length = self.bits.bit_length();
        tracing::trace!(bit_length, hash_count = self.hash_count, key_len = bytes.len(), "contains");
        bit_indices(&self.hasher, bytes, self.hash_count, bit_length).all(|position| self.bits.get(position))
    }

    /// Estimated number of distinct items inserted.
    ///
    /// Computes `⌈-(m/k) × ln(1 - x/m)⌉` from the number of set bits `x`.
    /// The result is approximate.
    ///
    /// # Errors
    ///
    /// `Estimation` if every bit is set, `Uninitialized` if storage is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(128, 3)?;
    /// filter.insert_all(["apple", "banana", "cherry", "date", "fig"])?;
    /// assert_eq!(filter.estimated_cardinality()?, 5);
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn estimated_cardinality(&self) -> Result<u64> {
        self.bits.ensure_allocated("estimated_cardinality")?;
        let set_bits = self.bits.count_ones();
        estimate_cardinality(self.bits.bit_length(), self.hash_count, set_bits).map_err(|err| {
            tracing::warn!(set_bits, bit_length = self.bits.bit_length(), "cardinality estimate unavailable: {err}");
            err
        })
    }

    /// Estimated false positive rate, in `[0, 1]`.
    ///
    /// Evaluates `max(0, 1 - e^(-k·n̂/m))^k` with `n̂` from
    /// [`estimated_cardinality`](Self::estimated_cardinality). Never decreases
    /// as more distinct items are inserted.
    ///
    /// # Errors
    ///
    /// Same as [`estimated_cardinality`](Self::estimated_cardinality).
    pub fn false_positive_rate(&self) -> Result<f64> {
        self.bits.ensure_allocated("false_positive_rate")?;
        let items = self.estimated_cardinality()?;
        Ok(false_positive_probability(self.bits.bit_length(), self.hash_count, items as f64))
    }

    /// Read-only view of the packed bits.
    ///
    /// Length is `ceil(bit_length / 8)`. Byte order and in-byte bit order
    /// follow [`layout`](Self::layout).
    #[inline]
    #[must_use]
    pub fn raw_bits(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Number of addressable bit positions (m).
    #[inline]
    #[must_use]
    pub fn bit_length(&self) -> u32 {
        self.bits.bit_length()
    }

    /// Number of hash rounds per key (k).
    #[inline]
    #[must_use]
    pub fn hash_count(&self) -> u8 {
        self.hash_count
    }

    /// Position-to-bit mapping in use.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> BitLayout {
        self.bits.layout()
    }

    /// The hash engine.
    #[inline]
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Size and hashing parameters of this filter.
    #[must_use]
    pub fn config(&self) -> FilterConfig {
        FilterConfig {
            bit_length: self.bits.bit_length(),
            hash_count: self.hash_count,
            layout: self.bits.layout(),
        }
    }

    /// Storage size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bits.as_bytes().len()
    }

    /// Number of set bits (x).
    #[must_use]
    pub fn count_set_bits(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Fraction of positions set, in `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        f64::from(self.bits.count_ones()) / f64::from(self.bits.bit_length())
    }

    /// `true` if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// `true` if `other` can be combined with `self` without error.
    ///
    /// Sizes may differ; hash count and layout must match.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.hash_count == other.hash_count && self.bits.layout() == other.bits.layout()
    }
}
