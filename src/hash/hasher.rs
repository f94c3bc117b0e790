//! Hash function trait for Bloom filters.
//!
//! A filter simulates k independent hash functions by calling one seeded
//! engine k times with seeds `0..k`. The engine only has to guarantee that
//! varying the seed yields effectively independent, uniformly distributed
//! 32-bit outputs for the same input.
//!
//! # Examples
//!
//! ```
//! use bytebloom::hash::{BloomHasher, Murmur3Hasher};
//!
//! let hasher = Murmur3Hasher::new();
//! let round0 = hasher.hash_with_seed(b"hello", 0);
//! let round1 = hasher.hash_with_seed(b"hello", 1);
//! assert_ne!(round0, round1);
//! ```

#![allow(clippy::module_name_repetitions)]

use super::murmur::{murmur2_32, murmur3_32};

/// Seeded 32-bit hash engine used to derive bit positions.
///
/// The trait operates on **byte slices** rather than `T: Hash`: the byte
/// encoding of a key is fixed by [`BloomKey`](crate::BloomKey), so the same
/// key maps to the same bits across processes, platforms and Rust versions.
///
/// # Requirements
///
/// - **Determinism**: equal `(bytes, seed)` always give equal output.
/// - **Avalanche**: a one-bit change in input or seed flips ~half the output.
/// - **Uniformity**: output evenly distributed over `u32`.
pub trait BloomHasher: Send + Sync {
    /// Hash `bytes` under `seed`.
    fn hash_with_seed(&self, bytes: &[u8], seed: u32) -> u32;

    /// Stable identifier of the algorithm, used in diagnostics.
    fn name(&self) -> &'static str;
}

/// MurmurHash3 x86_32 engine (the default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3Hasher;

impl Murmur3Hasher {
    /// Create a MurmurHash3 engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BloomHasher for Murmur3Hasher {
    #[inline]
    fn hash_with_seed(&self, bytes: &[u8], seed: u32) -> u32 {
        murmur3_32(bytes, seed)
    }

    fn name(&self) -> &'static str {
        "murmur3_32"
    }
}

/// MurmurHash2 engine.
///
/// Selects bit positions exactly like filters built by the earlier
/// MurmurHash2-based generation of this data structure. Prefer
/// [`Murmur3Hasher`] for new filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur2Hasher;

impl Murmur2Hasher {
    /// Create a MurmurHash2 engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BloomHasher for Murmur2Hasher {
    #[inline]
    fn hash_with_seed(&self, bytes: &[u8], seed: u32) -> u32 {
        murmur2_32(bytes, seed)
    }

    fn name(&self) -> &'static str {
        "murmur2_32"
    }
}

impl<H: BloomHasher + ?Sized> BloomHasher for &H {
    #[inline]
    fn hash_with_seed(&self, bytes: &[u8], seed: u32) -> u32 {
        (**self).hash_with_seed(bytes, seed)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
