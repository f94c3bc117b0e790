//! xxHash32 engine (feature `xxhash`).
//!
//! Wraps the `xxhash-rust` crate's XXH32. Natively seeded and 32-bit, so it
//! drops straight into the k-round scheme. Bit positions differ from the
//! Murmur engines, so filters built with it only combine with each other.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "xxhash")]
//! # {
//! use bytebloom::hash::{BloomHasher, XxHasher};
//! use bytebloom::BloomFilter;
//!
//! let mut filter = BloomFilter::with_hasher(512, 4, XxHasher::new())?;
//! filter.insert("fast")?;
//! assert!(filter.contains("fast")?);
//! # }
//! # Ok::<(), bytebloom::BloomError>(())
//! ```

use super::hasher::BloomHasher;
use xxhash_rust::xxh32::xxh32;

/// XXH32 hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XxHasher;

impl XxHasher {
    /// Create an xxHash32 engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BloomHasher for XxHasher {
    #[inline]
    fn hash_with_seed(&self, bytes: &[u8], seed: u32) -> u32 {
        xxh32(bytes, seed)
    }

    fn name(&self) -> &'static str {
        "xxh32"
    }
}
