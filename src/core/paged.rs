//! Paged bit storage shared by every way specialization.
//!
//! The buffer is `page_num` pages of `2^page_level` bytes. Each key maps to
//! one page and probes `way` bits inside it, so an operation touches a single
//! contiguous region of at most 8 KiB.
//!
//! # Architecture
//!
//! - `PageHash` selects the page and yields eight 16-bit codes
//! - The first `way` codes, masked to the page's bit width, are the probes
//! - `way` is passed in by the caller; the way-specialized front-ends pass a
//!   constant so the probe loop has a fixed trip count
//!
//! # Unique Count
//!
//! `set` reports whether the key changed any bit. Keys that only hit bits
//! already set are treated as duplicates and leave `unique_cnt` unchanged, so
//! the counter slightly undercounts distinct keys once false positives start.

use tracing::debug;

use crate::core::page::PageHash;
use crate::core::params::{validate_page_level, FilterParams};
use crate::error::{PageBloomError, Result};
use crate::util::FastDivisor;

/// Owned page buffer plus unique-insert counter.
///
/// # Examples
///
/// ```
/// use pagebloom::core::paged::PagedBitset;
///
/// let mut bits = PagedBitset::new(6, 8, 4).unwrap();
/// assert!(bits.set(6, b"alpha"));
/// assert!(!bits.set(6, b"alpha"));
/// assert!(bits.test(6, b"alpha"));
/// assert_eq!(bits.unique_cnt(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedBitset {
    data: Vec<u8>,
    page_level: u32,
    pages: FastDivisor,
    unique_cnt: u64,
}

impl PagedBitset {
    /// Allocate a zeroed buffer of `page_num` pages.
    ///
    /// # Errors
    ///
    /// - [`PageBloomError::InvalidWay`] if `way` is outside `[4, 8]`
    /// - [`PageBloomError::InvalidPageLevel`] if `page_level` is outside `[8 - 8/way, 13]`
    /// - [`PageBloomError::InvalidDataSize`] if `page_num` is zero
    pub fn new(way: usize, page_level: u32, page_num: u32) -> Result<Self> {
        let params = FilterParams::new(way, page_level, page_num)?;
        debug!(
            way,
            page_level,
            page_num,
            bytes = params.data_len(),
            "allocating paged filter"
        );
        Ok(Self {
            data: vec![0u8; params.data_len()],
            page_level,
            pages: FastDivisor::new(page_num),
            unique_cnt: 0,
        })
    }

    /// Rebuild from a previously exported buffer.
    ///
    /// `bytes` is copied; the caller's buffer is never aliased.
    ///
    /// # Errors
    ///
    /// Way and page level errors as in [`PagedBitset::new`], and
    /// [`PageBloomError::InvalidDataSize`] if `bytes` is empty, not a
    /// multiple of the page size, or holds more than `u32::MAX` pages.
    pub fn from_bytes(way: usize, page_level: u32, bytes: &[u8], unique_cnt: u64) -> Result<Self> {
        validate_page_level(way, page_level)?;

        let page_size = 1usize << page_level;
        if bytes.is_empty() || bytes.len() % page_size != 0 {
            return Err(PageBloomError::invalid_data_size(bytes.len(), page_size));
        }
        let page_num = u32::try_from(bytes.len() >> page_level)
            .map_err(|_| PageBloomError::invalid_data_size(bytes.len(), page_size))?;

        debug!(
            way,
            page_level,
            page_num,
            unique_cnt,
            "restoring paged filter"
        );
        Ok(Self {
            data: bytes.to_vec(),
            page_level,
            pages: FastDivisor::new(page_num),
            unique_cnt,
        })
    }

    /// Set the `way` probe bits of `key`.
    ///
    /// Returns `true` if at least one bit was previously unset (the key is
    /// new), in which case `unique_cnt` is incremented.
    #[inline(always)]
    pub fn set(&mut self, way: usize, key: &[u8]) -> bool {
        let ph = PageHash::compute(key, &self.pages, self.page_level);
        let mask = (1u32 << (self.page_level + 3)) - 1;
        let page = &mut self.data[ph.offset..ph.offset + (1usize << self.page_level)];

        let mut hit = 1u8;
        for &code in &ph.codes[..way] {
            let idx = (u32::from(code) & mask) as usize;
            let byte = &mut page[idx >> 3];
            hit &= *byte >> (idx & 7);
            *byte |= 1u8 << (idx & 7);
        }

        if hit & 1 != 0 {
            return false;
        }
        self.unique_cnt += 1;
        true
    }

    /// Check the `way` probe bits of `key`, stopping at the first unset one.
    #[inline(always)]
    #[must_use]
    pub fn test(&self, way: usize, key: &[u8]) -> bool {
        let ph = PageHash::compute(key, &self.pages, self.page_level);
        let mask = (1u32 << (self.page_level + 3)) - 1;
        let page = &self.data[ph.offset..ph.offset + (1usize << self.page_level)];

        ph.codes[..way].iter().all(|&code| {
            let idx = (u32::from(code) & mask) as usize;
            page[idx >> 3] & (1u8 << (idx & 7)) != 0
        })
    }

    /// Zero every bit and reset the unique counter.
    pub fn clear(&mut self) {
        debug!(
            bytes = self.data.len(),
            unique_cnt = self.unique_cnt,
            "clearing paged filter"
        );
        self.data.fill(0);
        self.unique_cnt = 0;
    }

    /// Raw buffer, suitable for persisting.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the bitset and return its buffer.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// `log2` of the page size.
    #[inline]
    #[must_use]
    pub const fn page_level(&self) -> u32 {
        self.page_level
    }

    /// Number of pages.
    #[inline]
    #[must_use]
    pub const fn page_num(&self) -> u32 {
        self.pages.value()
    }

    /// Page size in bytes.
    #[inline]
    #[must_use]
    pub const fn page_size(&self) -> usize {
        1usize << self.page_level
    }

    /// Count of `set` calls that changed at least one bit.
    #[inline]
    #[must_use]
    pub const fn unique_cnt(&self) -> u64 {
        self.unique_cnt
    }

    /// Number of set bits across the whole buffer.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.data.iter().map(|b| u64::from(b.count_ones())).sum()
    }
}
