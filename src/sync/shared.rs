//! Lock-wrapped paged Bloom filter for shared use.
//!
//! The single-owner filters need `&mut self` to write. This wrapper puts a
//! [`DynPageBloomFilter`] behind one instance-wide `parking_lot::RwLock` so
//! it can be shared through an `Arc`.
//!
//! ## Locking Protocol
//!
//! | Operation        | Lock  |
//! |------------------|-------|
//! | `set()`          | Write |
//! | `clear()`        | Write |
//! | `test()`         | Read  |
//! | `snapshot_data()`| Read  |
//!
//! Readers run in parallel. `parking_lot::RwLock` is writer-fair, so a steady
//! stream of `test` calls cannot starve `set`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use pagebloom::core::SharedBloomFilter;
//! use pagebloom::sync::SharedPageBloomFilter;
//!
//! let filter = Arc::new(SharedPageBloomFilter::with_rate(10_000, 0.01)?);
//!
//! let writer = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     writer.set(b"concurrent");
//! })
//! .join()
//! .unwrap();
//!
//! assert!(filter.test(b"concurrent"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

use parking_lot::RwLock;

use crate::core::filter::{BloomFilter, SharedBloomFilter};
use crate::core::params::FilterParams;
use crate::error::Result;
use crate::filters::DynPageBloomFilter;

/// [`DynPageBloomFilter`] behind an instance-wide reader-writer lock.
#[derive(Debug)]
pub struct SharedPageBloomFilter {
    inner: RwLock<DynPageBloomFilter>,
    params: FilterParams,
}

impl SharedPageBloomFilter {
    /// Wrap an existing filter.
    #[must_use]
    pub fn new(filter: DynPageBloomFilter) -> Self {
        let params = filter.params();
        Self {
            inner: RwLock::new(filter),
            params,
        }
    }

    /// Plan for `items` keys at `fp_rate` and allocate.
    ///
    /// # Errors
    ///
    /// As [`DynPageBloomFilter::with_rate`].
    pub fn with_rate(items: usize, fp_rate: f64) -> Result<Self> {
        Ok(Self::new(DynPageBloomFilter::with_rate(items, fp_rate)?))
    }

    /// Rebuild from an exported buffer.
    ///
    /// # Errors
    ///
    /// As [`DynPageBloomFilter::from_bytes`].
    pub fn from_bytes(way: usize, page_level: u32, bytes: &[u8], unique_cnt: u64) -> Result<Self> {
        Ok(Self::new(DynPageBloomFilter::from_bytes(
            way, page_level, bytes, unique_cnt,
        )?))
    }

    /// Geometry of the wrapped filter. Fixed for the wrapper's lifetime.
    #[must_use]
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Copy the buffer and unique count under one read lock.
    ///
    /// The pair is consistent: no `set` lands between the two reads.
    #[must_use]
    pub fn snapshot_data(&self) -> (Vec<u8>, u64) {
        let guard = self.inner.read();
        (guard.data().to_vec(), guard.unique_cnt())
    }

    /// Clone the wrapped filter under a read lock.
    #[must_use]
    pub fn to_filter(&self) -> DynPageBloomFilter {
        self.inner.read().clone()
    }

    /// Unwrap the filter.
    #[must_use]
    pub fn into_inner(self) -> DynPageBloomFilter {
        self.inner.into_inner()
    }
}

impl SharedBloomFilter for SharedPageBloomFilter {
    fn set(&self, key: &[u8]) -> bool {
        #[cfg(feature = "trace")]
        tracing::trace!(len = key.len(), "SharedPageBloomFilter::set");

        self.inner.write().set(key)
    }

    fn test(&self, key: &[u8]) -> bool {
        #[cfg(feature = "trace")]
        tracing::trace!(len = key.len(), "SharedPageBloomFilter::test");

        self.inner.read().test(key)
    }

    fn clear(&self) {
        #[cfg(feature = "trace")]
        tracing::debug!("SharedPageBloomFilter::clear");

        self.inner.write().clear();
    }

    fn way(&self) -> usize {
        self.params.way
    }

    fn page_level(&self) -> u32 {
        self.params.page_level
    }

    fn page_num(&self) -> u32 {
        self.params.page_num
    }

    fn unique_cnt(&self) -> u64 {
        self.inner.read().unique_cnt()
    }

    // One lock for the whole batch instead of one per key.
    fn set_batch<'a, I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut guard = self.inner.write();
        keys.into_iter().filter(|key| guard.set(key)).count()
    }

    fn test_batch<'a, I>(&self, keys: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let guard = self.inner.read();
        keys.into_iter().map(|key| guard.test(key)).collect()
    }
}

impl Clone for SharedPageBloomFilter {
    fn clone(&self) -> Self {
        Self::new(self.to_filter())
    }
}

impl From<DynPageBloomFilter> for SharedPageBloomFilter {
    fn from(filter: DynPageBloomFilter) -> Self {
        Self::new(filter)
    }
}
