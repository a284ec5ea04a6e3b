//! `std::hash` adapters over the spooky hash.
//!
//! The filters operate on byte keys. These adapters bridge typed items into
//! that world: an item's `Hash` impl is streamed into a [`SpookyHasher`],
//! which buffers the bytes and hashes them in one pass when finished.
//!
//! Unlike `std::collections::hash_map::DefaultHasher`, the result does not
//! depend on a per-process seed. Integer writes are little-endian and `usize`
//! / `isize` are widened to 64 bits, so keys of fixed-width integers and byte
//! slices are the same on every platform and can be persisted.
//!
//! Other types are only as stable as their `Hash` impls. `str`, tuples and
//! derived impls follow std's encoding, which carries no guarantee across
//! Rust releases; persist filters of such items as raw bytes instead.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use pagebloom::hash::SpookyBuildHasher;
//!
//! let mut map: HashMap<&str, u32, SpookyBuildHasher> = HashMap::default();
//! map.insert("pages", 5);
//! assert_eq!(map["pages"], 5);
//! ```

#![allow(clippy::module_name_repetitions)]

use std::hash::{BuildHasher, Hash, Hasher};

use super::spooky::{hash128, hash64, HashCode128};

/// Streaming hasher that buffers input and runs [`hash128`] on finish.
///
/// `write_*` calls append to an internal buffer, so the result depends only
/// on the exact byte sequence written, not on how it was split into calls.
#[derive(Debug, Clone, Default)]
pub struct SpookyHasher {
    buf: Vec<u8>,
}

impl SpookyHasher {
    /// Create an empty hasher.
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create an empty hasher with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Full 128-bit hash of the bytes written so far.
    #[must_use]
    pub fn finish128(&self) -> HashCode128 {
        hash128(&self.buf)
    }

    /// Drop buffered bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

impl Hasher for SpookyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.write(&i.to_le_bytes());
    }

    // Fixed width regardless of the target's pointer size.
    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.write_u16(i as u16);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.write_u32(i as u32);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn write_i128(&mut self, i: i128) {
        self.write_u128(i as u128);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.write_u64(i as i64 as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        hash64(&self.buf)
    }
}

/// [`BuildHasher`] producing [`SpookyHasher`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpookyBuildHasher;

impl BuildHasher for SpookyBuildHasher {
    type Hasher = SpookyHasher;

    #[inline]
    fn build_hasher(&self) -> SpookyHasher {
        SpookyHasher::new()
    }
}

/// Derive a fixed 16-byte filter key from any hashable item.
///
/// The key is the little-endian encoding of the item's 128-bit hash, which
/// keeps the per-item cost of typed inserts independent of the item size.
/// Note that `item_key(&"abc")` is not `b"abc"`: `str`'s `Hash` impl appends
/// a terminator, so typed and raw-byte keys live in different key spaces.
///
/// Keys of fixed-width integers and byte slices are platform independent.
/// For `str` and composite types the key follows std's `Hash` encoding, which
/// may change between Rust releases, so do not persist filters keyed that way.
///
/// # Examples
///
/// ```
/// use pagebloom::hash::item_key;
///
/// assert_eq!(item_key(&42u64), item_key(&42u64));
/// assert_ne!(item_key(&42u64), item_key(&43u64));
/// ```
#[must_use]
pub fn item_key<T: Hash + ?Sized>(item: &T) -> [u8; 16] {
    let mut hasher = SpookyHasher::with_capacity(32);
    item.hash(&mut hasher);
    let code = hasher.finish128();

    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&code.low.to_le_bytes());
    key[8..].copy_from_slice(&code.high.to_le_bytes());
    key
}
