//! Runtime-selected way.
//!
//! [`plan`] picks the way from the target rate, so callers sizing at runtime
//! cannot name a `PageBloomFilter<W>` up front. `DynPageBloomFilter` holds one
//! of the five specializations and forwards to it; the match happens once per
//! call, outside the probe loop.

use tracing::debug;

use crate::core::filter::BloomFilter;
use crate::core::params::{plan, validate_params, FilterParams};
use crate::error::{PageBloomError, Result};
use crate::filters::page::{Way4Filter, Way5Filter, Way6Filter, Way7Filter, Way8Filter};

/// A paged Bloom filter whose way is chosen at runtime.
///
/// # Examples
///
/// ```
/// use pagebloom::core::BloomFilter;
/// use pagebloom::filters::DynPageBloomFilter;
///
/// let mut filter = DynPageBloomFilter::with_rate(500, 0.01)?;
/// assert_eq!(filter.way(), 7);
/// assert_eq!(filter.data().len(), 640);
///
/// filter.set(b"hello");
/// assert!(filter.test(b"hello"));
/// # Ok::<(), pagebloom::PageBloomError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynPageBloomFilter {
    /// 4 probes per key.
    Way4(Way4Filter),
    /// 5 probes per key.
    Way5(Way5Filter),
    /// 6 probes per key.
    Way6(Way6Filter),
    /// 7 probes per key.
    Way7(Way7Filter),
    /// 8 probes per key.
    Way8(Way8Filter),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            DynPageBloomFilter::Way4($f) => $body,
            DynPageBloomFilter::Way5($f) => $body,
            DynPageBloomFilter::Way6($f) => $body,
            DynPageBloomFilter::Way7($f) => $body,
            DynPageBloomFilter::Way8($f) => $body,
        }
    };
}

impl DynPageBloomFilter {
    /// Create an empty filter with explicit geometry.
    ///
    /// # Errors
    ///
    /// Any [`validate_params`] failure.
    pub fn new(params: FilterParams) -> Result<Self> {
        validate_params(&params)?;
        let FilterParams {
            way,
            page_level,
            page_num,
        } = params;
        Ok(match way {
            4 => Self::Way4(Way4Filter::new(page_level, page_num)?),
            5 => Self::Way5(Way5Filter::new(page_level, page_num)?),
            6 => Self::Way6(Way6Filter::new(page_level, page_num)?),
            7 => Self::Way7(Way7Filter::new(page_level, page_num)?),
            8 => Self::Way8(Way8Filter::new(page_level, page_num)?),
            _ => return Err(PageBloomError::invalid_way(way)),
        })
    }

    /// Plan for `items` keys at `fp_rate` and allocate.
    ///
    /// # Errors
    ///
    /// Any [`plan`] failure.
    pub fn with_rate(items: usize, fp_rate: f64) -> Result<Self> {
        let params = plan(items, fp_rate)?;
        debug!(items, fp_rate, "creating filter from target rate");
        Self::new(params)
    }

    /// Rebuild a filter of the given way from an exported buffer.
    ///
    /// # Errors
    ///
    /// [`PageBloomError::InvalidWay`], [`PageBloomError::InvalidPageLevel`]
    /// or [`PageBloomError::InvalidDataSize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pagebloom::core::BloomFilter;
    /// use pagebloom::filters::DynPageBloomFilter;
    ///
    /// let mut filter = DynPageBloomFilter::with_rate(1_000, 0.02)?;
    /// filter.set(b"kept");
    ///
    /// let restored = DynPageBloomFilter::from_bytes(
    ///     filter.way(),
    ///     filter.page_level(),
    ///     filter.data(),
    ///     filter.unique_cnt(),
    /// )?;
    /// assert!(restored.test(b"kept"));
    /// # Ok::<(), pagebloom::PageBloomError>(())
    /// ```
    pub fn from_bytes(way: usize, page_level: u32, bytes: &[u8], unique_cnt: u64) -> Result<Self> {
        Ok(match way {
            4 => Self::Way4(Way4Filter::from_bytes(page_level, bytes, unique_cnt)?),
            5 => Self::Way5(Way5Filter::from_bytes(page_level, bytes, unique_cnt)?),
            6 => Self::Way6(Way6Filter::from_bytes(page_level, bytes, unique_cnt)?),
            7 => Self::Way7(Way7Filter::from_bytes(page_level, bytes, unique_cnt)?),
            8 => Self::Way8(Way8Filter::from_bytes(page_level, bytes, unique_cnt)?),
            _ => return Err(PageBloomError::invalid_way(way)),
        })
    }

    /// Geometry of this filter.
    #[must_use]
    pub fn params(&self) -> FilterParams {
        dispatch!(self, f => f.params())
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> u64 {
        dispatch!(self, f => f.count_ones())
    }

    /// Consume the filter and return its buffer.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        dispatch!(self, f => f.into_data())
    }
}

impl BloomFilter for DynPageBloomFilter {
    #[inline]
    fn set(&mut self, key: &[u8]) -> bool {
        dispatch!(self, f => f.set(key))
    }

    #[inline]
    fn test(&self, key: &[u8]) -> bool {
        dispatch!(self, f => f.test(key))
    }

    fn clear(&mut self) {
        dispatch!(self, f => f.clear())
    }

    fn data(&self) -> &[u8] {
        dispatch!(self, f => f.data())
    }

    fn way(&self) -> usize {
        dispatch!(self, f => f.way())
    }

    fn page_level(&self) -> u32 {
        dispatch!(self, f => f.page_level())
    }

    fn page_num(&self) -> u32 {
        dispatch!(self, f => f.page_num())
    }

    fn unique_cnt(&self) -> u64 {
        dispatch!(self, f => f.unique_cnt())
    }
}

impl From<Way4Filter> for DynPageBloomFilter {
    fn from(filter: Way4Filter) -> Self {
        Self::Way4(filter)
    }
}

impl From<Way5Filter> for DynPageBloomFilter {
    fn from(filter: Way5Filter) -> Self {
        Self::Way5(filter)
    }
}

impl From<Way6Filter> for DynPageBloomFilter {
    fn from(filter: Way6Filter) -> Self {
        Self::Way6(filter)
    }
}

impl From<Way7Filter> for DynPageBloomFilter {
    fn from(filter: Way7Filter) -> Self {
        Self::Way7(filter)
    }
}

impl From<Way8Filter> for DynPageBloomFilter {
    fn from(filter: Way8Filter) -> Self {
        Self::Way8(filter)
    }
}
