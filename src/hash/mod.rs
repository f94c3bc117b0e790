//! Hash engines for Bloom filters.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── hasher.rs   - BloomHasher trait, Murmur3Hasher, Murmur2Hasher
//! ├── murmur.rs   - murmur3_32 / murmur2_32 kernels
//! ├── xxhash.rs   - XxHasher (optional, feature = "xxhash")
//! └── mod.rs      - This file (public API)
//! ```
//!
//! # Choosing an Engine
//!
//! | Engine            | Output | Notes                                        |
//! |-------------------|--------|----------------------------------------------|
//! | [`Murmur3Hasher`] | 32-bit | Default. Full `fmix32` avalanche.            |
//! | [`Murmur2Hasher`] | 32-bit | Bit-compatible with MurmurHash2-built filters |
//! | `XxHasher`        | 32-bit | xxHash32, feature `xxhash`                   |
//!
//! # Hash Rounds
//!
//! Filters do not use double hashing. Round `i` of `k` is simply
//! `hash_with_seed(key_bytes, i)`, reduced modulo the filter's bit length:
//!
//! ```
//! use bytebloom::hash::{bit_indices, Murmur3Hasher};
//!
//! let indices: Vec<u32> = bit_indices(&Murmur3Hasher::new(), b"apple", 3, 128).collect();
//! assert_eq!(indices, vec![16, 119, 43]);
//! ```

pub mod hasher;
pub mod murmur;

#[cfg(feature = "xxhash")]
pub mod xxhash;

pub use hasher::{BloomHasher, Murmur2Hasher, Murmur3Hasher};

#[cfg(feature = "xxhash")]
pub use xxhash::XxHasher;

/// Hasher used by filters when none is specified.
pub type DefaultHasher = Murmur3Hasher;

/// Bit positions selected by the `hash_count` rounds for `bytes`.
///
/// Yields `hash(bytes, i) mod bit_length` for `i` in `0..hash_count`, lazily,
/// so callers can stop at the first unset bit.
pub fn bit_indices<'a, H: BloomHasher + ?Sized>(
    hasher: &'a H,
    bytes: &'a [u8],
    hash_count: u8,
    bit_length: u32,
) -> impl Iterator<Item = u32> + 'a {
    debug_assert!(bit_length > 0, "bit_length must be > 0");
    (0..u32::from(hash_count)).map(move |seed| hasher.hash_with_seed(bytes, seed) % bit_length)
}
