//! MurmurHash 32-bit kernels.
//!
//! Two generations of Austin Appleby's MurmurHash are provided:
//!
//! - [`murmur3_32`]: MurmurHash3 x86_32. Little-endian 4-byte blocks mixed with
//!   multiply/rotate/xor, a 1-3 byte tail step, then the `fmix32` avalanche.
//!   This is the default engine of every filter.
//! - [`murmur2_32`]: MurmurHash2. Older, slightly weaker avalanche, kept so
//!   filters built with it can still be queried bit-for-bit.
//!
//! Both read blocks with an explicit little-endian decode, so output is
//! identical on every platform.
//!
//! # Examples
//!
//! ```
//! use bytebloom::hash::murmur::murmur3_32;
//!
//! assert_eq!(murmur3_32(b"", 0), 0);
//! assert_eq!(murmur3_32(b"hello", 0), 0x248b_fa47);
//! ```

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const M2: u32 = 0x5bd1_e995;
const R2: u32 = 24;

#[inline(always)]
fn read_u32_le(block: &[u8]) -> u32 {
    u32::from_le_bytes([block[0], block[1], block[2], block[3]])
}

#[inline(always)]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

/// MurmurHash3 finalizer: forces every input bit to affect every output bit.
#[inline(always)]
#[must_use]
pub const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// MurmurHash3 x86_32 of `key` under `seed`.
#[must_use]
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;
    let mut blocks = key.chunks_exact(4);

    for block in &mut blocks {
        h1 ^= mix_k1(read_u32_le(block));
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    let mut k1 = 0u32;
    if tail.len() >= 3 {
        k1 ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        k1 ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        k1 ^= u32::from(tail[0]);
        h1 ^= mix_k1(k1);
    }

    // Length is folded in modulo 2^32, as in the reference implementation.
    h1 ^= key.len() as u32;
    fmix32(h1)
}

/// MurmurHash2 (32-bit) of `key` under `seed`.
#[must_use]
pub fn murmur2_32(key: &[u8], seed: u32) -> u32 {
    let mut h = seed ^ (key.len() as u32);
    let mut blocks = key.chunks_exact(4);

    for block in &mut blocks {
        let mut k = read_u32_le(block);
        k = k.wrapping_mul(M2);
        k ^= k >> R2;
        k = k.wrapping_mul(M2);

        h = h.wrapping_mul(M2);
        h ^= k;
    }

    let tail = blocks.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(M2);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M2);
    h ^= h >> 15;
    h
}
