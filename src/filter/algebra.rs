//! Union and intersection of two filters.
//!
//! Operands may have different bit lengths. The larger backing array is the
//! *major* array and the other the *minor* array. The result has the major
//! array's length:
//!
//! ```text
//! index:      0 .. minor.len()          minor.len() .. major.len()
//! union:      major[i] | minor[i]       major[i]
//! intersect:  major[i] & minor[i]       0
//! ```
//!
//! The result takes the larger `bit_length`, the left operand's hash count
//! and a clone of the left operand's hasher. Inputs are never mutated.
//!
//! # Caveats
//!
//! Positions are `hash mod bit_length`, so when sizes differ the smaller
//! operand's keys generally hash to different positions in the result. Only
//! equal-sized operands preserve membership exactly. Even then the union can
//! report extra false positives, and the intersection can report keys found
//! in neither input whenever unrelated keys happen to share every bit.

use super::BloomFilter;
use crate::core::bitarray::ByteBitArray;
use crate::error::{BloomError, Result};
use crate::hash::BloomHasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetOp {
    Union,
    Intersection,
}

impl SetOp {
    #[inline]
    fn overlap(self, major: u8, minor: u8) -> u8 {
        match self {
            Self::Union => major | minor,
            Self::Intersection => major & minor,
        }
    }

    /// Bytes of the major array with no counterpart in the minor one.
    #[inline]
    fn excess(self, major: u8) -> u8 {
        match self {
            Self::Union => major,
            Self::Intersection => 0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
        }
    }
}

impl<H: BloomHasher + Clone> BloomFilter<H> {
    /// Filter answering "possibly present" for keys of either operand.
    ///
    /// # Errors
    ///
    /// `IncompatibleFilters` if hash counts or layouts differ;
    /// `Uninitialized` if either operand has no storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let mut fruit = BloomFilter::new(128, 3)?;
    /// let mut more = BloomFilter::new(128, 3)?;
    /// fruit.insert_all(["apple", "banana", "cherry"])?;
    /// more.insert_all(["cherry", "date", "fig"])?;
    ///
    /// let both = fruit.union(&more)?;
    /// for key in ["apple", "banana", "cherry", "date", "fig"] {
    ///     assert!(both.contains(key)?);
    /// }
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.combine(other, SetOp::Union)
    }

    /// Filter answering "possibly present" for keys found in both operands.
    ///
    /// # Errors
    ///
    /// Same as [`union`](Self::union).
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebloom::BloomFilter;
    ///
    /// let mut fruit = BloomFilter::new(128, 3)?;
    /// let mut more = BloomFilter::new(128, 3)?;
    /// fruit.insert_all(["apple", "banana", "cherry"])?;
    /// more.insert_all(["cherry", "date", "fig"])?;
    ///
    /// let common = fruit.intersection(&more)?;
    /// assert!(common.contains("cherry")?);
    /// assert!(!common.contains("apple")?);
    /// # Ok::<(), bytebloom::BloomError>(())
    /// ```
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        self.combine(other, SetOp::Intersection)
    }

    fn combine(&self, other: &Self, op: SetOp) -> Result<Self> {
        self.bits.ensure_allocated(op.name())?;
        other.bits.ensure_allocated(op.name())?;

        if self.hash_count != other.hash_count {
            return Err(BloomError::incompatible_filters(format!(
                "hash counts differ (left k={}, right k={})",
                self.hash_count, other.hash_count
            )));
        }
        if self.layout() != other.layout() {
            return Err(BloomError::incompatible_filters(format!(
                "bit layouts differ (left {}, right {})",
                self.layout().name(),
                other.layout().name()
            )));
        }

        let (major, minor) = if self.byte_len() >= other.byte_len() {
            (self.raw_bits(), other.raw_bits())
        } else {
            (other.raw_bits(), self.raw_bits())
        };

        let bytes: Vec<u8> = major
            .iter()
            .enumerate()
            .map(|(i, &byte)| match minor.get(i) {
                Some(&other_byte) => op.overlap(byte, other_byte),
                None => op.excess(byte),
            })
            .collect();

        let bit_length = self.bit_length().max(other.bit_length());
        tracing::debug!(
            op = op.name(),
            left_bits = self.bit_length(),
            right_bits = other.bit_length(),
            bit_length,
            "combining filters"
        );

        Ok(Self {
            bits: ByteBitArray::from_bytes(bit_length, self.layout(), bytes)?,
            hash_count: self.hash_count,
            hasher: self.hasher.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::FilterConfig;
    use crate::core::bitarray::BitLayout;
    use crate::error::ErrorKind;
    use crate::hash::DefaultHasher;
    use crate::BloomFilter;

    fn fruit_filters() -> (BloomFilter, BloomFilter) {
        let mut f1 = BloomFilter::new(128, 3).unwrap();
        let mut f2 = BloomFilter::new(128, 3).unwrap();
        f1.insert_all(["apple", "banana", "cherry"]).unwrap();
        f2.insert_all(["cherry", "date", "fig"]).unwrap();
        (f1, f2)
    }

    #[test]
    fn test_union_is_bytewise_or() {
        let (f1, f2) = fruit_filters();
        let union = f1.union(&f2).unwrap();
        let expected: Vec<u8> = f1.raw_bits().iter().zip(f2.raw_bits()).map(|(a, b)| a | b).collect();
        assert_eq!(union.raw_bits(), expected.as_slice());
        assert_eq!(union.bit_length(), 128);
        assert_eq!(union.hash_count(), 3);
    }

    #[test]
    fn test_intersection_is_bytewise_and() {
        let (f1, f2) = fruit_filters();
        let inter = f1.intersection(&f2).unwrap();
        // cherry's positions 58 and 10 survive, plus 43, set by both apple and fig.
        let mut expected = [0u8; 16];
        expected[1] = 0b0000_0010;
        expected[5] = 0b0000_0100;
        expected[7] = 0b0000_0010;
        assert_eq!(inter.raw_bits(), &expected);
    }

    #[test]
    fn test_inputs_unchanged() {
        let (f1, f2) = fruit_filters();
        let (c1, c2) = (f1.clone(), f2.clone());
        let _ = f1.union(&f2).unwrap();
        let _ = f1.intersection(&f2).unwrap();
        assert_eq!(f1, c1);
        assert_eq!(f2, c2);
    }

    #[test]
    fn test_operations_are_commutative_on_bits() {
        let (f1, f2) = fruit_filters();
        assert_eq!(f1.union(&f2).unwrap().raw_bits(), f2.union(&f1).unwrap().raw_bits());
        assert_eq!(
            f1.intersection(&f2).unwrap().raw_bits(),
            f2.intersection(&f1).unwrap().raw_bits()
        );
    }

    #[test]
    fn test_mismatched_sizes() {
        let mut small = BloomFilter::new(32, 3).unwrap();
        let mut large = BloomFilter::new(128, 3).unwrap();
        small.insert_all(["a", "b", "c"]).unwrap();
        large.insert_all(["x", "y"]).unwrap();

        let union = small.union(&large).unwrap();
        assert_eq!(union.bit_length(), 128);
        assert_eq!(union.byte_len(), 16);
        assert_eq!(&union.raw_bits()[4..], &large.raw_bits()[4..]);
        for i in 0..4 {
            assert_eq!(union.raw_bits()[i], small.raw_bits()[i] | large.raw_bits()[i]);
        }

        let inter = large.intersection(&small).unwrap();
        assert_eq!(inter.bit_length(), 128);
        assert!(inter.raw_bits()[4..].iter().all(|&b| b == 0));
        // Keys of the larger operand are preserved by the union.
        assert!(union.contains("x").unwrap());
        assert!(union.contains("y").unwrap());
    }

    #[test]
    fn test_same_bytes_different_bit_lengths() {
        // 30 and 32 bits both use 4 bytes; the result adopts 32.
        let a = BloomFilter::new(30, 2).unwrap();
        let b = BloomFilter::new(32, 2).unwrap();
        assert_eq!(a.union(&b).unwrap().bit_length(), 32);
        assert_eq!(b.intersection(&a).unwrap().bit_length(), 32);
    }

    #[test]
    fn test_hash_count_mismatch_rejected() {
        let a = BloomFilter::new(128, 3).unwrap();
        let b = BloomFilter::new(128, 4).unwrap();
        let err = a.union(&b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
        assert!(err.to_string().contains("hash counts differ"));
        assert!(a.intersection(&b).is_err());
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let a = BloomFilter::new(128, 3).unwrap();
        let b = BloomFilter::with_config(
            FilterConfig::new(128, 3).with_layout(BitLayout::Linear),
            DefaultHasher::default(),
        )
        .unwrap();
        assert!(a.union(&b).unwrap_err().to_string().contains("layouts differ"));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let (f1, _) = fruit_filters();
        let empty = BloomFilter::new(128, 3).unwrap();
        assert_eq!(f1.union(&empty).unwrap(), f1);
        assert!(f1.intersection(&empty).unwrap().is_empty());
    }
}
