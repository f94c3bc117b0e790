//! Estimator and sizing math.
//!
//! All functions here are pure: they take filter parameters and counts and
//! never touch a bit array.
//!
//! # Mathematical Background
//!
//! Given `m` bits, `k` hash rounds and `x` bits currently set:
//!
//! - Cardinality (Swamidass & Baldi): `n̂ = ⌈-(m/k) × ln(1 - x/m)⌉`
//! - False positive rate for `n` items: `p = max(0, 1 - e^(-kn/m))^k`
//!
//! For sizing a filter to hold `n` items at target rate `ε`:
//!
//! - `m = ⌈-n × ln(ε) / (ln 2)²⌉`
//! - `k = round((m/n) × ln 2)`
//!
//! # References
//!
//! - Swamidass, S. J., & Baldi, P. (2007). "Mathematical correction for
//!   fingerprint similarity measures to improve chemical retrieval".
//! - Bloom, B. H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors".

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{BloomError, Result};
use std::f64::consts::LN_2;

/// (ln 2)².
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Largest accepted bit length.
pub const MAX_BIT_LENGTH: u32 = u16::MAX as u32;

/// Largest accepted hash count.
pub const MAX_HASH_COUNT: u8 = u8::MAX;

/// Estimate the number of distinct items inserted into a filter.
///
/// # Errors
///
/// Returns `Estimation` if `bit_length` or `hash_count` is zero, if
/// `set_bits > bit_length`, or if the filter is saturated (`set_bits ==
/// bit_length`), where `ln(0)` leaves the estimate undefined.
///
/// # Examples
///
/// ```
/// use bytebloom::core::params::estimate_cardinality;
///
/// assert_eq!(estimate_cardinality(128, 3, 0)?, 0);
/// assert_eq!(estimate_cardinality(128, 3, 12)?, 5);
/// assert!(estimate_cardinality(128, 3, 128).is_err());
/// # Ok::<(), bytebloom::BloomError>(())
/// ```
pub fn estimate_cardinality(bit_length: u32, hash_count: u8, set_bits: u32) -> Result<u64> {
    if bit_length == 0 || hash_count == 0 {
        return Err(BloomError::estimation(format!(
            "parameters must be positive (m={bit_length}, k={hash_count})"
        )));
    }
    if set_bits > bit_length {
        return Err(BloomError::estimation(format!(
            "{set_bits} set bits exceed bit length {bit_length}"
        )));
    }
    if set_bits == bit_length {
        return Err(BloomError::estimation(format!(
            "filter is saturated ({set_bits} of {bit_length} bits set), ln(0) is undefined"
        )));
    }

    let m = f64::from(bit_length);
    let k = f64::from(hash_count);
    let x = f64::from(set_bits);

    let estimate = (-(m / k) * (1.0 - x / m).ln()).ceil();
    if !estimate.is_finite() {
        return Err(BloomError::estimation(format!("estimate diverged for x={set_bits}, m={bit_length}")));
    }
    // -0.0 for an empty filter; clamp keeps the conversion exact.
    Ok(estimate.max(0.0) as u64)
}

/// Probability that a never-inserted key tests positive after `items`
/// insertions.
///
/// The base `1 - e^(-kn/m)` is clamped at 0 before exponentiation, so the
/// result always lies in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use bytebloom::core::params::false_positive_probability;
///
/// assert_eq!(false_positive_probability(128, 3, 0.0), 0.0);
/// let p = false_positive_probability(9_586, 7, 1_000.0);
/// assert!((p - 0.01).abs() < 0.001);
/// ```
#[must_use]
pub fn false_positive_probability(bit_length: u32, hash_count: u8, items: f64) -> f64 {
    if bit_length == 0 || hash_count == 0 {
        return 1.0;
    }
    let m = f64::from(bit_length);
    let k = f64::from(hash_count);

    let base = (1.0 - (-k * items / m).exp()).max(0.0);
    base.powf(k).clamp(0.0, 1.0)
}

/// Optimal bit length for `items` at target false positive rate `fp_rate`.
///
/// # Errors
///
/// - `InvalidParameters` if `items == 0` or `fp_rate` is outside `(0, 1)`.
/// - `InvalidFilterSize` if the result exceeds [`MAX_BIT_LENGTH`].
///
/// # Examples
///
/// ```
/// use bytebloom::core::params::optimal_bit_count;
///
/// assert_eq!(optimal_bit_count(1_000, 0.01)?, 9_586);
/// assert!(optimal_bit_count(100_000, 0.001).is_err()); // beyond 65535 bits
/// # Ok::<(), bytebloom::BloomError>(())
/// ```
pub fn optimal_bit_count(items: u64, fp_rate: f64) -> Result<u32> {
    if items == 0 {
        return Err(BloomError::invalid_parameters("expected items must be greater than 0"));
    }
    if !(fp_rate > 0.0 && fp_rate < 1.0) {
        return Err(BloomError::invalid_parameters(format!(
            "false positive rate {fp_rate} is out of bounds, must be in range (0, 1)"
        )));
    }

    let bits = (-(items as f64) * fp_rate.ln() / LN2_SQUARED).ceil();
    if bits > f64::from(MAX_BIT_LENGTH) {
        return Err(BloomError::invalid_filter_size(bits as u64, MAX_BIT_LENGTH));
    }
    Ok((bits as u32).max(1))
}

/// Optimal hash count for a filter of `bit_length` bits holding `items`.
///
/// Clamped to `[1, 255]`.
///
/// # Errors
///
/// `InvalidParameters` if either argument is zero.
///
/// # Examples
///
/// ```
/// use bytebloom::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(9_586, 1_000)?, 7);
/// assert_eq!(optimal_hash_count(8, 1_000)?, 1);
/// # Ok::<(), bytebloom::BloomError>(())
/// ```
pub fn optimal_hash_count(bit_length: u32, items: u64) -> Result<u8> {
    if bit_length == 0 || items == 0 {
        return Err(BloomError::invalid_parameters(format!(
            "cannot size hash count for m={bit_length}, n={items}"
        )));
    }
    let k = (f64::from(bit_length) / items as f64 * LN_2).round();
    Ok(k.clamp(1.0, f64::from(MAX_HASH_COUNT)) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_cardinality_empty_filter() {
        assert_eq!(estimate_cardinality(128, 3, 0).unwrap(), 0);
    }

    #[test]
    fn test_cardinality_reference_values() {
        // -(128/3) * ln(1 - x/128), rounded up
        assert_eq!(estimate_cardinality(128, 3, 3).unwrap(), 2);
        assert_eq!(estimate_cardinality(128, 3, 6).unwrap(), 3);
        assert_eq!(estimate_cardinality(128, 3, 11).unwrap(), 4);
        assert_eq!(estimate_cardinality(128, 3, 12).unwrap(), 5);
    }

    #[test]
    fn test_cardinality_is_monotonic() {
        let mut previous = 0;
        for x in 0..128 {
            let n = estimate_cardinality(128, 3, x).unwrap();
            assert!(n >= previous);
            previous = n;
        }
    }

    #[test]
    fn test_cardinality_saturated() {
        let err = estimate_cardinality(64, 2, 64).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Estimation);
        assert!(err.to_string().contains("saturated"));
    }

    #[test]
    fn test_cardinality_degenerate_parameters() {
        assert!(estimate_cardinality(0, 3, 0).is_err());
        assert!(estimate_cardinality(128, 0, 0).is_err());
        assert!(estimate_cardinality(8, 1, 9).is_err());
    }

    #[test]
    fn test_fpp_bounds() {
        for n in [0.0, 1.0, 10.0, 100.0, 1e6] {
            let p = false_positive_probability(128, 3, n);
            assert!((0.0..=1.0).contains(&p), "p={p} for n={n}");
        }
        assert!(false_positive_probability(128, 3, 1e9) > 0.99);
    }

    #[test]
    fn test_fpp_monotonic_in_items() {
        let mut previous = 0.0;
        for n in 0..200 {
            let p = false_positive_probability(128, 3, f64::from(n));
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn test_fpp_clamps_negative_base() {
        assert_eq!(false_positive_probability(128, 3, -5.0), 0.0);
    }

    #[test]
    fn test_optimal_bit_count() {
        assert_eq!(optimal_bit_count(1_000, 0.01).unwrap(), 9_586);
        assert!(optimal_bit_count(0, 0.01).is_err());
        assert!(optimal_bit_count(10, 0.0).is_err());
        assert!(optimal_bit_count(10, 1.0).is_err());
        assert!(optimal_bit_count(10, f64::NAN).is_err());
        assert_eq!(
            optimal_bit_count(1_000_000, 0.01).unwrap_err().kind(),
            ErrorKind::Construction
        );
    }

    #[test]
    fn test_optimal_hash_count() {
        assert_eq!(optimal_hash_count(9_586, 1_000).unwrap(), 7);
        assert_eq!(optimal_hash_count(65_535, 1).unwrap(), 255);
        assert!(optimal_hash_count(0, 10).is_err());
        assert!(optimal_hash_count(10, 0).is_err());
    }
}
