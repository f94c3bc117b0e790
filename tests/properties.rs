//! Property tests for membership, hashing and set algebra.

use bytebloom::hash::murmur::murmur3_32;
use bytebloom::{BitLayout, BloomFilter, FilterConfig, Murmur3Hasher};
use proptest::prelude::*;

fn layout_strategy() -> impl Strategy<Value = BitLayout> {
    prop_oneof![Just(BitLayout::Reference), Just(BitLayout::Linear)]
}

fn filled(config: FilterConfig, keys: &[String]) -> BloomFilter {
    let mut filter = BloomFilter::with_config(config, Murmur3Hasher::new()).unwrap();
    filter.insert_all(keys).unwrap();
    filter
}

/// `true` if every bit set in `sub` is also set in `sup`.
fn bits_subset(sub: &[u8], sup: &[u8]) -> bool {
    sub.iter()
        .enumerate()
        .all(|(i, &byte)| byte & sup.get(i).copied().unwrap_or(0) == byte)
}

proptest! {
    #[test]
    fn no_false_negatives(
        keys in prop::collection::vec(".*", 0..64),
        bit_length in 1u32..4_096,
        hash_count in 1u8..12,
        layout in layout_strategy(),
    ) {
        let filter = filled(FilterConfig::new(bit_length, hash_count).with_layout(layout), &keys);
        for key in &keys {
            prop_assert!(filter.contains(key).unwrap());
        }
    }

    #[test]
    fn integer_keys_no_false_negatives(keys in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut filter = BloomFilter::new(1_024, 5).unwrap();
        filter.insert_all(&keys).unwrap();
        for key in &keys {
            prop_assert!(filter.contains(key).unwrap());
        }
    }

    #[test]
    fn hashing_is_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..128), seed in any::<u32>()) {
        prop_assert_eq!(murmur3_32(&bytes, seed), murmur3_32(&bytes, seed));
    }

    #[test]
    fn filters_are_deterministic(keys in prop::collection::vec(".*", 0..32)) {
        let config = FilterConfig::new(512, 4);
        prop_assert_eq!(filled(config, &keys), filled(config, &keys));
    }

    #[test]
    fn raw_bits_length_is_ceil_bytes(bit_length in 1u32..=65_535, hash_count in 1u8..=255) {
        let filter = BloomFilter::new(bit_length, hash_count).unwrap();
        prop_assert_eq!(filter.raw_bits().len(), bit_length.div_ceil(8) as usize);
        prop_assert!(filter.is_empty());
    }

    #[test]
    fn union_is_superset(
        left in prop::collection::vec(".*", 0..32),
        right in prop::collection::vec(".*", 0..32),
        layout in layout_strategy(),
    ) {
        let config = FilterConfig::new(256, 3).with_layout(layout);
        let (a, b) = (filled(config, &left), filled(config, &right));
        let union = a.union(&b).unwrap();

        prop_assert!(bits_subset(a.raw_bits(), union.raw_bits()));
        prop_assert!(bits_subset(b.raw_bits(), union.raw_bits()));
        for key in left.iter().chain(&right) {
            prop_assert!(union.contains(key).unwrap());
        }
    }

    #[test]
    fn intersection_is_subset(
        left in prop::collection::vec(".*", 0..32),
        right in prop::collection::vec(".*", 0..32),
        shared in prop::collection::vec(".*", 0..8),
    ) {
        let config = FilterConfig::new(256, 3);
        let (mut a, mut b) = (filled(config, &left), filled(config, &right));
        a.insert_all(&shared).unwrap();
        b.insert_all(&shared).unwrap();
        let inter = a.intersection(&b).unwrap();

        prop_assert!(bits_subset(inter.raw_bits(), a.raw_bits()));
        prop_assert!(bits_subset(inter.raw_bits(), b.raw_bits()));
        for key in &shared {
            prop_assert!(inter.contains(key).unwrap());
        }
    }

    #[test]
    fn combine_takes_larger_size(small in 1u32..512, large in 512u32..4_096) {
        let a = BloomFilter::new(small, 2).unwrap();
        let b = BloomFilter::new(large, 2).unwrap();
        prop_assert_eq!(a.union(&b).unwrap().bit_length(), large);
        prop_assert_eq!(b.intersection(&a).unwrap().bit_length(), large);
        prop_assert_eq!(a.union(&b).unwrap().raw_bits().len(), b.raw_bits().len());
    }

    #[test]
    fn estimates_never_decrease(keys in prop::collection::vec(any::<u32>(), 1..48)) {
        let mut filter = BloomFilter::new(4_096, 3).unwrap();
        let mut last_cardinality = 0;
        let mut last_rate = 0.0;
        for key in &keys {
            filter.insert(key).unwrap();
            let cardinality = filter.estimated_cardinality().unwrap();
            let rate = filter.false_positive_rate().unwrap();
            prop_assert!(cardinality >= last_cardinality);
            prop_assert!(rate >= last_rate);
            prop_assert!((0.0..=1.0).contains(&rate));
            last_cardinality = cardinality;
            last_rate = rate;
        }
    }
}
