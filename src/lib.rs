//! ByteBloom: a compact, byte-backed Bloom filter.
//!
//! A Bloom filter answers "is this key possibly in the set?" using a fixed
//! bit array and `k` seeded hash rounds. It can produce:
//! - **False positives**: a key never inserted may be reported as present
//! - **Zero false negatives**: a key that was inserted is always reported
//!
//! On top of membership, ByteBloom estimates how many distinct keys were
//! inserted, estimates its own current false positive rate, combines filters
//! by union and intersection, and exposes the raw bit array.
//!
//! # Quick Start
//!
//! ```
//! use bytebloom::BloomFilter;
//!
//! // 128 bits, 3 hash rounds
//! let mut filter = BloomFilter::new(128, 3)?;
//!
//! filter.insert("apple")?;
//! filter.insert(&42u32)?;
//!
//! assert!(filter.contains("apple")?);
//! assert!(filter.contains(&42u32)?);
//! assert!(!filter.contains("banana")?);
//!
//! println!("~{} items", filter.estimated_cardinality()?);
//! println!("fp rate {:.4}", filter.false_positive_rate()?);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```
//!
//! # Sizing From a Target
//!
//! ```
//! use bytebloom::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(1_000)
//!     .false_positive_rate(0.01)
//!     .build()?;
//! assert_eq!(filter.bit_length(), 9_586);
//! assert_eq!(filter.hash_count(), 7);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```
//!
//! # Set Algebra
//!
//! ```
//! use bytebloom::BloomFilter;
//!
//! let mut a = BloomFilter::new(128, 3)?;
//! let mut b = BloomFilter::new(128, 3)?;
//! a.insert_all(["apple", "banana", "cherry"])?;
//! b.insert_all(["cherry", "date", "fig"])?;
//!
//! assert!(a.union(&b)?.contains("fig")?);
//! assert!(a.intersection(&b)?.contains("cherry")?);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```
//!
//! # Modules
//!
//! - [`filter`]: the [`BloomFilter`] itself, set algebra and diagnostics
//! - [`hash`]: seeded 32-bit hash engines ([`Murmur3Hasher`](hash::Murmur3Hasher) by default)
//! - [`key`]: byte encoding of keys ([`BloomKey`])
//! - [`core`]: the bit-array store and the estimator math
//! - [`builder`]: [`FilterConfig`] and [`BloomFilterBuilder`]
//! - [`error`]: [`BloomError`] and [`ErrorKind`]
//!
//! # Feature Flags
//!
//! - `serde` (default): serialize [`FilterConfig`] and [`FilterStats`], and use
//!   `serde_json::Value` as a dynamically typed key
//! - `xxhash`: the xxHash32 engine [`XxHasher`](hash::XxHasher)
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (construction
//! and set operations at `debug`, per-key operations at `trace`, saturated
//! estimates at `warn`). It never installs a subscriber.
//!
//! # Thread Safety
//!
//! [`BloomFilter`] is `Send + Sync` and has no interior mutability. Inserting
//! requires `&mut self`; wrap a shared filter in a lock.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/bytebloom/0.1.0")]

/// Filter configuration and builder
pub mod builder;

/// Bit-array store and estimator math
pub mod core;

/// Error types and result aliases
pub mod error;

/// The Bloom filter, set algebra and diagnostics
pub mod filter;

/// Seeded hash engines
pub mod hash;

/// Key encoding
pub mod key;

// Re-export commonly used types at crate root
pub use builder::{BloomFilterBuilder, FilterConfig};
pub use core::bitarray::BitLayout;
pub use error::{BloomError, ErrorKind, Result};
pub use filter::{BloomFilter, FilterStats};
pub use hash::{BloomHasher, Murmur2Hasher, Murmur3Hasher};
pub use key::BloomKey;

#[cfg(feature = "xxhash")]
#[cfg_attr(docsrs, doc(cfg(feature = "xxhash")))]
pub use hash::XxHasher;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use bytebloom::prelude::*;
///
/// let mut filter: BloomFilter = BloomFilterBuilder::new()
///     .bit_length(256)
///     .hash_count(4)
///     .build()?;
/// filter.insert("hello")?;
/// assert!(filter.contains("hello")?);
/// # Ok::<(), BloomError>(())
/// ```
pub mod prelude {
    pub use crate::builder::{BloomFilterBuilder, FilterConfig};
    pub use crate::core::bitarray::BitLayout;
    pub use crate::error::{BloomError, ErrorKind, Result};
    pub use crate::filter::{BloomFilter, FilterStats};
    pub use crate::hash::{BloomHasher, Murmur2Hasher, Murmur3Hasher};
    pub use crate::key::BloomKey;

    #[cfg(feature = "xxhash")]
    pub use crate::hash::XxHasher;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut filter = BloomFilter::new(100, 3).unwrap();
        filter.insert("test").unwrap();
        assert!(filter.contains("test").unwrap());
    }

    #[test]
    fn test_root_reexports() {
        let filter: crate::BloomFilter = crate::BloomFilterBuilder::new()
            .bit_length(64)
            .hash_count(2)
            .build()
            .unwrap();
        assert_eq!(filter.config(), crate::FilterConfig::new(64, 2));
        assert_eq!(filter.layout(), crate::BitLayout::Reference);
    }

    #[test]
    fn test_filter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BloomFilter>();
        assert_send_sync::<BloomFilter<Murmur2Hasher>>();
        assert_send_sync::<BloomError>();
    }

    #[test]
    fn test_version() {
        assert!(!crate::VERSION.is_empty());
    }
}
