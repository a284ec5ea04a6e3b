//! Way-specialized paged Bloom filters.
//!
//! `PageBloomFilter<W>` fixes the probe count at compile time. The probe
//! loop in the shared core then runs over `codes[..W]` with a constant bound,
//! which the compiler fully unrolls. Only `W` in `[4, 8]` compiles.
//!
//! # Architecture
//!
//! - Filter divided into `page_num` pages of `2^page_level` bytes
//! - One 128-bit hash selects the page and yields the `W` probe codes
//! - Guarantees one page (at most 8 KiB, typically one or two cache lines
//!   for small levels) per operation
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::Way7Filter;
//!
//! let mut filter = Way7Filter::new(7, 3)?;
//! for i in 0u64..200 {
//!     assert!(filter.set(&i.to_le_bytes()));
//! }
//! assert!(filter.test(&5u64.to_le_bytes()));
//! assert_eq!(filter.unique_cnt(), 200);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

use crate::core::filter::BloomFilter;
use crate::core::paged::PagedBitset;
use crate::core::params::{FilterParams, MAX_WAY, MIN_WAY};
use crate::error::Result;

/// Paged Bloom filter probing exactly `W` bits per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBloomFilter<const W: usize> {
    bits: PagedBitset,
}

/// 4 probes per key.
pub type Way4Filter = PageBloomFilter<4>;
/// 5 probes per key.
pub type Way5Filter = PageBloomFilter<5>;
/// 6 probes per key.
pub type Way6Filter = PageBloomFilter<6>;
/// 7 probes per key.
pub type Way7Filter = PageBloomFilter<7>;
/// 8 probes per key.
pub type Way8Filter = PageBloomFilter<8>;

impl<const W: usize> PageBloomFilter<W> {
    /// Probe count of this specialization.
    pub const WAY: usize = W;

    const VALID_WAY: () = assert!(W >= MIN_WAY && W <= MAX_WAY, "way must be in [4, 8]");

    /// Create an empty filter of `page_num` pages of `2^page_level` bytes.
    ///
    /// # Errors
    ///
    /// [`PageBloomError::InvalidPageLevel`](crate::PageBloomError::InvalidPageLevel)
    /// if `page_level` is outside `[8 - 8/W, 13]`,
    /// [`PageBloomError::InvalidDataSize`](crate::PageBloomError::InvalidDataSize)
    /// if `page_num` is zero.
    pub fn new(page_level: u32, page_num: u32) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WAY;
        Ok(Self {
            bits: PagedBitset::new(W, page_level, page_num)?,
        })
    }

    /// Rebuild a filter from an exported buffer and unique count.
    ///
    /// # Errors
    ///
    /// As [`PageBloomFilter::new`], plus
    /// [`PageBloomError::InvalidDataSize`](crate::PageBloomError::InvalidDataSize)
    /// if `bytes` is empty or not a whole number of pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagebloom::core::BloomFilter;
    /// use pagebloom::filters::Way5Filter;
    ///
    /// let mut original = Way5Filter::new(8, 2)?;
    /// original.set(b"persisted");
    ///
    /// let restored = Way5Filter::from_bytes(8, original.data(), original.unique_cnt())?;
    /// assert!(restored.test(b"persisted"));
    /// # Ok::<(), pagebloom::PageBloomError>(())
    /// ```
    pub fn from_bytes(page_level: u32, bytes: &[u8], unique_cnt: u64) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WAY;
        Ok(Self {
            bits: PagedBitset::from_bytes(W, page_level, bytes, unique_cnt)?,
        })
    }

    /// Geometry of this filter.
    #[must_use]
    pub fn params(&self) -> FilterParams {
        FilterParams {
            way: W,
            page_level: self.bits.page_level(),
            page_num: self.bits.page_num(),
        }
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Consume the filter and return its buffer.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.bits.into_data()
    }
}

impl<const W: usize> BloomFilter for PageBloomFilter<W> {
    #[inline]
    fn set(&mut self, key: &[u8]) -> bool {
        self.bits.set(W, key)
    }

    #[inline]
    fn test(&self, key: &[u8]) -> bool {
        self.bits.test(W, key)
    }

    fn clear(&mut self) {
        self.bits.clear();
    }

    fn data(&self) -> &[u8] {
        self.bits.data()
    }

    fn way(&self) -> usize {
        W
    }

    fn page_level(&self) -> u32 {
        self.bits.page_level()
    }

    fn page_num(&self) -> u32 {
        self.bits.page_num()
    }

    fn unique_cnt(&self) -> u64 {
        self.bits.unique_cnt()
    }
}
