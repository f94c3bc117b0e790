//! Core building blocks shared by the filter.
//!
//! ```text
//! core/
//! ├── bitarray.rs  - ByteBitArray and BitLayout (the bit-array store)
//! ├── params.rs    - Cardinality / false-positive math and optimal sizing
//! └── mod.rs       - This file
//! ```
//!
//! Nothing in here depends on the hash engine or on key encoding; the
//! filter composes them.

pub mod bitarray;
pub mod params;

pub use bitarray::{bytes_for_bits, BitLayout, ByteBitArray};
pub use params::{
    estimate_cardinality, false_positive_probability, optimal_bit_count, optimal_hash_count,
    MAX_BIT_LENGTH, MAX_HASH_COUNT,
};
