//! Filter trait definitions.
//!
//! Filters operate on byte keys. Typed items go through [`item_key`], which
//! reduces any `T: Hash` to a stable 16-byte key.
//!
//! # Trait Hierarchy
//!
//! ```text
//! BloomFilter        (single owner, &mut self writes)
//!     ├── PageBloomFilter<W>
//!     └── DynPageBloomFilter
//!
//! SharedBloomFilter  (&self writes through interior locking)
//!     └── SharedPageBloomFilter
//! ```
//!
//! # Guarantees
//!
//! 1. **No False Negatives**: after `set(k)`, `test(k)` is `true` until `clear()`
//! 2. **Single Page**: every operation touches exactly one page
//! 3. **Thread Safety**: all implementations are `Send + Sync`
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::Way6Filter;
//!
//! let mut filter = Way6Filter::new(8, 4)?;
//! assert!(filter.set(b"alpha"));
//! assert!(filter.test(b"alpha"));
//! assert!(filter.set_item("typed"));
//! assert!(filter.test_item("typed"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

use std::hash::Hash;

use crate::core::params::{self, expected_fp_rate};
use crate::hash::item_key;

/// Single-owner paged Bloom filter.
pub trait BloomFilter: Send + Sync {
    /// Record `key`.
    ///
    /// Returns `true` if any probed bit was previously unset, in which case
    /// [`unique_cnt`](Self::unique_cnt) grows by one. A `false` return means
    /// the key (or a key colliding with it on every probe) was already present.
    fn set(&mut self, key: &[u8]) -> bool;

    /// Check whether `key` may have been recorded.
    ///
    /// `false` is definitive; `true` may be a false positive.
    #[must_use]
    fn test(&self, key: &[u8]) -> bool;

    /// Zero all bits and reset the unique counter.
    fn clear(&mut self);

    /// Raw page buffer. Persist this together with `way`, `page_level` and
    /// `unique_cnt` to rebuild the filter later.
    #[must_use]
    fn data(&self) -> &[u8];

    /// Bits probed per key.
    #[must_use]
    fn way(&self) -> usize;

    /// `log2` of the page size in bytes.
    #[must_use]
    fn page_level(&self) -> u32;

    /// Number of pages.
    #[must_use]
    fn page_num(&self) -> u32;

    /// Number of `set` calls that returned `true` since construction or the
    /// last `clear`.
    #[must_use]
    fn unique_cnt(&self) -> u64;

    /// `data_len * 8 / way`.
    #[must_use]
    fn capacity(&self) -> usize {
        params::capacity(self.data().len(), self.way())
    }

    /// Keys the filter can take before the estimated rate reaches `fp_rate`.
    #[must_use]
    fn virtual_capacity(&self, fp_rate: f64) -> u64 {
        params::virtual_capacity(self.data().len(), self.way(), fp_rate)
    }

    /// Estimated false-positive rate at the current unique count.
    #[must_use]
    fn false_positive_rate(&self) -> f64 {
        expected_fp_rate(self.data().len() as u64 * 8, self.unique_cnt(), self.way())
    }

    /// `true` if nothing has been recorded since construction or `clear`.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.unique_cnt() == 0
    }

    /// Record a typed item through its stable [`item_key`].
    fn set_item<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        self.set(&item_key(item))
    }

    /// Check a typed item through its stable [`item_key`].
    #[must_use]
    fn test_item<T: Hash + ?Sized>(&self, item: &T) -> bool {
        self.test(&item_key(item))
    }

    /// Record every key; returns how many were new.
    fn set_batch<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().filter(|key| self.set(key)).count()
    }

    /// `true` if every key tests positive. Short-circuits.
    #[must_use]
    fn test_all<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().all(|key| self.test(key))
    }

    /// `true` if at least one key tests positive. Short-circuits.
    #[must_use]
    fn test_any<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().any(|key| self.test(key))
    }
}

/// Paged Bloom filter usable through a shared reference.
///
/// Implementations serialize writers internally; `set` and `clear` take
/// `&self` so the filter can sit behind an `Arc`.
pub trait SharedBloomFilter: Send + Sync {
    /// Record `key` (thread-safe).
    fn set(&self, key: &[u8]) -> bool;

    /// Check `key` (thread-safe).
    #[must_use]
    fn test(&self, key: &[u8]) -> bool;

    /// Zero all bits and reset the counter (thread-safe).
    fn clear(&self);

    /// Bits probed per key.
    #[must_use]
    fn way(&self) -> usize;

    /// `log2` of the page size in bytes.
    #[must_use]
    fn page_level(&self) -> u32;

    /// Number of pages.
    #[must_use]
    fn page_num(&self) -> u32;

    /// Unique insert count.
    #[must_use]
    fn unique_cnt(&self) -> u64;

    /// Buffer length in bytes.
    #[must_use]
    fn data_len(&self) -> usize {
        (self.page_num() as usize) << self.page_level()
    }

    /// `data_len * 8 / way`.
    #[must_use]
    fn capacity(&self) -> usize {
        params::capacity(self.data_len(), self.way())
    }

    /// Keys the filter can take before the estimated rate reaches `fp_rate`.
    #[must_use]
    fn virtual_capacity(&self, fp_rate: f64) -> u64 {
        params::virtual_capacity(self.data_len(), self.way(), fp_rate)
    }

    /// Estimated false-positive rate at the current unique count.
    #[must_use]
    fn false_positive_rate(&self) -> f64 {
        expected_fp_rate(self.data_len() as u64 * 8, self.unique_cnt(), self.way())
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.unique_cnt() == 0
    }

    /// Record a typed item (thread-safe).
    fn set_item<T: Hash + ?Sized>(&self, item: &T) -> bool {
        self.set(&item_key(item))
    }

    /// Check a typed item (thread-safe).
    #[must_use]
    fn test_item<T: Hash + ?Sized>(&self, item: &T) -> bool {
        self.test(&item_key(item))
    }

    /// Record every key; returns how many were new.
    fn set_batch<'a, I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().filter(|key| self.set(key)).count()
    }

    /// Test every key, preserving order.
    #[must_use]
    fn test_batch<'a, I>(&self, keys: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().map(|key| self.test(key)).collect()
    }

    /// `true` if every key tests positive.
    #[must_use]
    fn test_all<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().all(|key| self.test(key))
    }

    /// `true` if at least one key tests positive.
    #[must_use]
    fn test_any<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        keys.into_iter().any(|key| self.test(key))
    }
}
