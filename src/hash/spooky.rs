//! SpookyHash-style 128-bit short hash.
//!
//! This is the only hash the filters use. Its output is part of the storage
//! contract: a persisted filter buffer is only meaningful to a reader that
//! derives exactly the same bit positions, so the function below must stay
//! bit-for-bit stable across versions and platforms.
//!
//! # Algorithm Overview
//!
//! ```text
//! state:  a = b = 0, c = d = MAGIC
//! 32-byte blocks:  c += w0; d += w1; mix(); a += w2; b += w3
//! 16-byte block (if 16..31 bytes remain):  c += w0; d += w1; mix()
//! d += len << 56
//! tail (len & 15 bytes): packed little-endian into c, then d
//! end(); result = (a, b)
//! ```
//!
//! Words are always read with `from_le_bytes`, so big-endian hosts produce the
//! same output as little-endian ones.
//!
//! # Examples
//!
//! ```
//! use pagebloom::hash::{hash128, HashCode128};
//!
//! let code = hash128(b"");
//! assert_eq!(code, HashCode128::new(0x232706fc6bf50919, 0x8b72ee65b4e851c7));
//! ```

#![allow(clippy::unreadable_literal)]

use std::fmt;

/// Initial value of the `c`/`d` registers, also mixed in for empty tails.
const MAGIC: u64 = 0xdead_beef_dead_beef;

/// 128-bit hash value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashCode128 {
    /// Low 64 bits (register `a`).
    pub low: u64,
    /// High 64 bits (register `b`).
    pub high: u64,
}

impl HashCode128 {
    /// Build a code from its two halves.
    #[must_use]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// The four 32-bit words `[low.lo, low.hi, high.lo, high.hi]`.
    #[inline(always)]
    #[must_use]
    pub const fn words(&self) -> [u32; 4] {
        [
            self.low as u32,
            (self.low >> 32) as u32,
            self.high as u32,
            (self.high >> 32) as u32,
        ]
    }
}

impl fmt::LowerHex for HashCode128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.high, self.low)
    }
}

impl From<HashCode128> for u128 {
    fn from(code: HashCode128) -> Self {
        (u128::from(code.high) << 64) | u128::from(code.low)
    }
}

struct State {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl State {
    #[inline(always)]
    const fn new() -> Self {
        Self {
            a: 0,
            b: 0,
            c: MAGIC,
            d: MAGIC,
        }
    }

    #[inline(always)]
    #[rustfmt::skip]
    fn mix(&mut self) {
        self.c = self.c.rotate_left(50); self.c = self.c.wrapping_add(self.d); self.a ^= self.c;
        self.d = self.d.rotate_left(52); self.d = self.d.wrapping_add(self.a); self.b ^= self.d;
        self.a = self.a.rotate_left(30); self.a = self.a.wrapping_add(self.b); self.c ^= self.a;
        self.b = self.b.rotate_left(41); self.b = self.b.wrapping_add(self.c); self.d ^= self.b;
        self.c = self.c.rotate_left(54); self.c = self.c.wrapping_add(self.d); self.a ^= self.c;
        self.d = self.d.rotate_left(48); self.d = self.d.wrapping_add(self.a); self.b ^= self.d;
        self.a = self.a.rotate_left(38); self.a = self.a.wrapping_add(self.b); self.c ^= self.a;
        self.b = self.b.rotate_left(37); self.b = self.b.wrapping_add(self.c); self.d ^= self.b;
        self.c = self.c.rotate_left(62); self.c = self.c.wrapping_add(self.d); self.a ^= self.c;
        self.d = self.d.rotate_left(34); self.d = self.d.wrapping_add(self.a); self.b ^= self.d;
        self.a = self.a.rotate_left(5);  self.a = self.a.wrapping_add(self.b); self.c ^= self.a;
        self.b = self.b.rotate_left(36); self.b = self.b.wrapping_add(self.c); self.d ^= self.b;
    }

    #[inline(always)]
    #[rustfmt::skip]
    fn end(&mut self) {
        self.d ^= self.c; self.c = self.c.rotate_left(15); self.d = self.d.wrapping_add(self.c);
        self.a ^= self.d; self.d = self.d.rotate_left(52); self.a = self.a.wrapping_add(self.d);
        self.b ^= self.a; self.a = self.a.rotate_left(26); self.b = self.b.wrapping_add(self.a);
        self.c ^= self.b; self.b = self.b.rotate_left(51); self.c = self.c.wrapping_add(self.b);
        self.d ^= self.c; self.c = self.c.rotate_left(28); self.d = self.d.wrapping_add(self.c);
        self.a ^= self.d; self.d = self.d.rotate_left(9);  self.a = self.a.wrapping_add(self.d);
        self.b ^= self.a; self.a = self.a.rotate_left(47); self.b = self.b.wrapping_add(self.a);
        self.c ^= self.b; self.b = self.b.rotate_left(54); self.c = self.c.wrapping_add(self.b);
        self.d ^= self.c; self.c = self.c.rotate_left(32); self.d = self.d.wrapping_add(self.c);
        self.a ^= self.d; self.d = self.d.rotate_left(25); self.a = self.a.wrapping_add(self.d);
        self.b ^= self.a; self.a = self.a.rotate_left(63); self.b = self.b.wrapping_add(self.a);
    }
}

/// Hash a byte slice to 128 bits.
///
/// Total over every input length, including the empty slice.
///
/// # Examples
///
/// ```
/// use pagebloom::hash::hash128;
///
/// let code = hash128(b"0");
/// assert_eq!(code.low, 0x50209687d54ec67e);
/// assert_eq!(code.high, 0x62fe85108df1cf6d);
/// ```
#[must_use]
pub fn hash128(bytes: &[u8]) -> HashCode128 {
    let mut s = State::new();

    let mut blocks = bytes.chunks_exact(32);
    for block in &mut blocks {
        s.c = s.c.wrapping_add(read_u64(&block[0..8]));
        s.d = s.d.wrapping_add(read_u64(&block[8..16]));
        s.mix();
        s.a = s.a.wrapping_add(read_u64(&block[16..24]));
        s.b = s.b.wrapping_add(read_u64(&block[24..32]));
    }

    let mut rest = blocks.remainder();
    if rest.len() >= 16 {
        s.c = s.c.wrapping_add(read_u64(&rest[0..8]));
        s.d = s.d.wrapping_add(read_u64(&rest[8..16]));
        s.mix();
        rest = &rest[16..];
    }

    s.d = s.d.wrapping_add((bytes.len() as u64) << 56);
    match rest.len() {
        0 => {
            s.c = s.c.wrapping_add(MAGIC);
            s.d = s.d.wrapping_add(MAGIC);
        }
        1..=7 => {
            s.c = s.c.wrapping_add(read_partial(rest));
        }
        _ => {
            s.c = s.c.wrapping_add(read_u64(&rest[0..8]));
            s.d = s.d.wrapping_add(read_partial(&rest[8..]));
        }
    }

    s.end();
    HashCode128::new(s.a, s.b)
}

/// Low 64 bits of [`hash128`].
#[inline]
#[must_use]
pub fn hash64(bytes: &[u8]) -> u64 {
    hash128(bytes).low
}

/// Low 32 bits of [`hash64`].
#[inline]
#[must_use]
pub fn hash32(bytes: &[u8]) -> u32 {
    hash64(bytes) as u32
}

/// Read exactly 8 bytes as a little-endian u64.
#[inline(always)]
fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

/// Read up to 8 bytes as a zero-padded little-endian u64.
///
/// Matches the byte-shift packing of the tail: byte `i` lands at bit `8 * i`.
#[inline(always)]
fn read_partial(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() < 8);
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    const EXPECTED: [(u64, u64); 37] = [
        (0x232706fc6bf50919, 0x8b72ee65b4e851c7),
        (0x50209687d54ec67e, 0x62fe85108df1cf6d),
        (0xfbe67d8368f3fb4f, 0xb54a5a89706d5a5a),
        (0x2882d11a5846ccfa, 0x6b21b0e870109222),
        (0xf5e0d56325d6d000, 0xaf8703c9f9ac75e5),
        (0x59a0f67b7ae7a5ad, 0x84d7aeabc053b848),
        (0xf01562a268e42c21, 0xdfe994ab22873e7e),
        (0x16133104620725dd, 0xa5ca36afa7182e6a),
        (0x7a9378dcdf599479, 0x30f5a569a74ecdd7),
        (0xd9f07bdc76c20a78, 0x34f0621847f7888a),
        (0x332a4fff07df83da, 0xfa40557cc0ea6b72),
        (0x976beeefd11659dc, 0x8a3187b6a72d0039),
        (0xc3fcc139e4c6832a, 0xdadfeff6e01e2f2e),
        (0x86130593c7746a6f, 0x8ac9fb14904fe39d),
        (0x70550dbe5cdde280, 0xddb95757282706c0),
        (0x67211fbaf6b9122d, 0x68f4e8f3bbc700db),
        (0xe2d06846964b80ad, 0x6005068ac75c4c20),
        (0xd55b3c010258ce93, 0x981c8b03659d9950),
        (0x5a2507daa032fa13, 0x0d1c989bfc0c6cf7),
        (0xaf8618678ae5cd55, 0xe0b75cfad427eefc),
        (0xad5a7047e8a139d8, 0x183621cf988a753e),
        (0x8fc110192723cd5e, 0x203129f80764b844),
        (0x50170b4485d7af19, 0x7f2c79d145db7d35),
        (0x7c32444652212bf3, 0x27fd51b9156e2ad2),
        (0x90e571225cce7360, 0xf743b8f6f7433428),
        (0x9919537c1add41e1, 0x7ff0158f05b261f2),
        (0x3a70a8070883029f, 0xc5dcba911815d20a),
        (0xcc32b418290e2879, 0xbb7945d6d79b5dfb),
        (0xde493e4646077aeb, 0x465c2ea52660973a),
        (0x4d3ad9b55316f970, 0x9137e3040a7d87bb),
        (0x1547de75efe848f4, 0x21ae3f08b5330aac),
        (0xe2ead0cc6aab6aff, 0x29a20bccf77e70a7),
        (0x3dc2f4a9e9b451b4, 0x27de306dde7b60d2),
        (0xce247654a4de9f51, 0x040097e45e948d66),
        (0xbc118f2ba2305503, 0x810f05d0ea32853f),
        (0xb55cd8bdcac2a118, 0x4e93b65164705d2a),
        (0xb7c97db807c32f38, 0x510723230adef63d),
    ];

    #[test]
    fn test_known_vectors() {
        for (len, &(low, high)) in EXPECTED.iter().enumerate() {
            let code = hash128(&KEY[..len]);
            assert_eq!(
                code,
                HashCode128::new(low, high),
                "prefix length {} hashed to {:x}",
                len,
                code
            );
        }
    }

    #[test]
    fn test_derived_widths() {
        let code = hash128(KEY);
        assert_eq!(hash64(KEY), code.low);
        assert_eq!(hash32(KEY), code.low as u32);
        assert_eq!(hash64(b""), 0x232706fc6bf50919);
        assert_eq!(hash32(b""), 0x6bf50919);
    }

    #[test]
    fn test_words_order() {
        let code = HashCode128::new(0x1111_2222_3333_4444, 0x5555_6666_7777_8888);
        assert_eq!(
            code.words(),
            [0x3333_4444, 0x1111_2222, 0x7777_8888, 0x5555_6666]
        );
    }

    #[test]
    fn test_u128_and_hex() {
        let code = HashCode128::new(1, 2);
        assert_eq!(u128::from(code), (2u128 << 64) | 1);
        assert_eq!(format!("{:x}", code), "00000000000000020000000000000001");
    }

    #[test]
    fn test_unaligned_input() {
        // Same bytes at a different alignment must hash identically.
        let mut padded = vec![0xAAu8; 3];
        padded.extend_from_slice(KEY);
        assert_eq!(hash128(&padded[3..]), hash128(KEY));
    }

    #[test]
    fn test_long_input_is_deterministic() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 251) as u8).collect();
        assert_eq!(hash128(&data), hash128(&data));
        assert_ne!(hash128(&data), hash128(&data[..999]));
    }

    #[test]
    fn test_length_is_mixed_in() {
        // Zero-padded tails must not collide with shorter keys.
        assert_ne!(hash128(&[0u8; 3]), hash128(&[0u8; 4]));
        assert_ne!(hash128(&[0u8; 16]), hash128(&[0u8; 32]));
    }
}
