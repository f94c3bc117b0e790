//! Error types for bytebloom operations.
//!
//! Every fallible operation returns [`Result<T>`]. Errors are reported to the
//! caller of the offending operation and never partially applied: a rejected
//! key or parameter leaves the filter untouched.
//!
//! # Error Propagation
//!
//! ```
//! use bytebloom::{BloomFilter, Result};
//!
//! fn seen_before(filter: &mut BloomFilter, user: &str) -> Result<bool> {
//!     let seen = filter.contains(user)?;
//!     filter.insert(user)?;
//!     Ok(seen)
//! }
//!
//! let mut filter = BloomFilter::new(1024, 4)?;
//! assert!(!seen_before(&mut filter, "alice")?);
//! assert!(seen_before(&mut filter, "alice")?);
//! # Ok::<(), bytebloom::BloomError>(())
//! ```

#![allow(clippy::module_name_repetitions)]

use thiserror::Error;

/// Result type alias for bytebloom operations.
pub type Result<T> = std::result::Result<T, BloomError>;

/// Coarse classification of a [`BloomError`].
///
/// Callers that only need to know *which family* of failure happened (for
/// instance to map it onto a status code) can match on this instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad size, hash count, or incompatible operands.
    Construction,
    /// The backing storage was never allocated.
    Uninitialized,
    /// The key has no byte encoding.
    KeyType,
    /// The requested estimate is mathematically undefined.
    Estimation,
}

/// Errors that can occur during Bloom filter operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomError {
    /// Bit length is zero or above the addressable maximum.
    #[error("Invalid filter size: {size} bits. Must be in range [1, {max}].")]
    InvalidFilterSize {
        /// The rejected size in bits.
        size: u64,
        /// Largest accepted size in bits.
        max: u32,
    },

    /// Hash count is zero (or could not be derived).
    #[error("Invalid hash function count: {count}. Must be in range [1, 255].")]
    InvalidHashCount {
        /// The rejected hash count.
        count: u64,
    },

    /// Parameters that are individually valid but cannot be combined.
    #[error("Invalid Bloom filter parameters: {message}.")]
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Two filters cannot be combined.
    #[error("Cannot combine incompatible filters: {reason}.")]
    IncompatibleFilters {
        /// Description of the incompatibility.
        reason: String,
    },

    /// Operation on a filter whose bit storage was never allocated.
    #[error("Filter storage is not initialized; cannot perform '{operation}'.")]
    Uninitialized {
        /// Name of the operation attempted.
        operation: &'static str,
    },

    /// Key value outside the supported encoding domain.
    #[error("Unsupported key type: {type_name}. Keys must be strings, bytes or fixed-width integers.")]
    UnsupportedKey {
        /// Name of the rejected key type.
        type_name: String,
    },

    /// Estimator evaluated outside its mathematical domain.
    #[error("Estimation failed: {message}.")]
    Estimation {
        /// Description of the degenerate input.
        message: String,
    },
}

impl BloomError {
    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: u64, max: u32) -> Self {
        Self::InvalidFilterSize { size, max }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: u64) -> Self {
        Self::InvalidHashCount { count }
    }

    /// Create an `InvalidParameters` error.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `IncompatibleFilters` error.
    #[must_use]
    pub fn incompatible_filters(reason: impl Into<String>) -> Self {
        Self::IncompatibleFilters {
            reason: reason.into(),
        }
    }

    /// Create an `Uninitialized` error.
    #[must_use]
    pub fn uninitialized(operation: &'static str) -> Self {
        Self::Uninitialized { operation }
    }

    /// Create an `UnsupportedKey` error.
    #[must_use]
    pub fn unsupported_key(type_name: impl Into<String>) -> Self {
        Self::UnsupportedKey {
            type_name: type_name.into(),
        }
    }

    /// Create an `Estimation` error.
    #[must_use]
    pub fn estimation(message: impl Into<String>) -> Self {
        Self::Estimation {
            message: message.into(),
        }
    }

    /// Family this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFilterSize { .. }
            | Self::InvalidHashCount { .. }
            | Self::InvalidParameters { .. }
            | Self::IncompatibleFilters { .. } => ErrorKind::Construction,
            Self::Uninitialized { .. } => ErrorKind::Uninitialized,
            Self::UnsupportedKey { .. } => ErrorKind::KeyType,
            Self::Estimation { .. } => ErrorKind::Estimation,
        }
    }
}
