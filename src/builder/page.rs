//! Builder for paged Bloom filters.
//!
//! # Type-State Pattern
//!
//! The builder cannot produce a filter until both sizing inputs are given:
//!
//! ```text
//! Initial → WithItems → Complete → DynPageBloomFilter
//!     ↓         ↓           ↓
//!   .expected_items()  .false_positive_rate()  .build()
//! ```
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```
//! use pagebloom::builder::PageBloomFilterBuilder;
//! use pagebloom::core::BloomFilter;
//!
//! let filter = PageBloomFilterBuilder::new()
//!     .expected_items(500)
//!     .false_positive_rate(0.01)
//!     .build()?;
//! assert_eq!(filter.data().len(), 640);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```
//!
//! ## Forcing the Way
//!
//! ```
//! use pagebloom::builder::PageBloomFilterBuilder;
//! use pagebloom::core::BloomFilter;
//!
//! let filter = PageBloomFilterBuilder::new()
//!     .expected_items(500)
//!     .false_positive_rate(0.01)
//!     .way(5)
//!     .build()?;
//! assert_eq!(filter.way(), 5);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::marker::PhantomData;

use crate::core::params::{self, min_page_level, plan, validate_way, FilterParams};
use crate::error::Result;
use crate::filters::DynPageBloomFilter;
use crate::sync::SharedPageBloomFilter;

/// Type-state marker: no parameters set.
pub struct Initial;

/// Type-state marker: item count is set.
pub struct WithItems;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`DynPageBloomFilter`] with type-state guarantees.
pub struct PageBloomFilterBuilder<State> {
    expected_items: usize,
    fp_rate: f64,
    way: Option<usize>,
    _state: PhantomData<State>,
}

impl PageBloomFilterBuilder<Initial> {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_items: 0,
            fp_rate: 0.0,
            way: None,
            _state: PhantomData,
        }
    }

    /// Set the expected number of distinct keys. Zero is treated as one.
    #[must_use]
    pub fn expected_items(self, items: usize) -> PageBloomFilterBuilder<WithItems> {
        PageBloomFilterBuilder {
            expected_items: items,
            fp_rate: self.fp_rate,
            way: self.way,
            _state: PhantomData,
        }
    }
}

impl PageBloomFilterBuilder<WithItems> {
    /// Set the target false-positive rate.
    ///
    /// Values outside `[0.0005, 0.1]` are clamped when the filter is built.
    #[must_use]
    pub fn false_positive_rate(self, fp_rate: f64) -> PageBloomFilterBuilder<Complete> {
        PageBloomFilterBuilder {
            expected_items: self.expected_items,
            fp_rate,
            way: self.way,
            _state: PhantomData,
        }
    }
}

impl PageBloomFilterBuilder<Complete> {
    /// Override the planned probe count (optional).
    ///
    /// The planned byte budget is kept. If the planned page level is too
    /// small for `way`, pages are enlarged to the minimum level and the page
    /// count is recomputed to cover the same budget.
    #[must_use]
    pub fn way(mut self, way: usize) -> Self {
        self.way = Some(way);
        self
    }

    /// Resolve the final parameters without allocating.
    ///
    /// # Errors
    ///
    /// Any [`plan`] failure, or [`PageBloomError::InvalidWay`](crate::PageBloomError::InvalidWay)
    /// for a bad override.
    pub fn params(&self) -> Result<FilterParams> {
        let mut params = plan(self.expected_items, self.fp_rate)?;
        if let Some(way) = self.way {
            validate_way(way)?;
            params.way = way;
            let min = min_page_level(way);
            if params.page_level < min {
                let bytes = params.data_len();
                let page_size = 1usize << min;
                params.page_level = min;
                params.page_num = ((bytes + page_size - 1) / page_size).max(1) as u32;
            }
        }
        params::validate_params(&params)?;
        Ok(params)
    }

    /// Build the filter.
    ///
    /// # Errors
    ///
    /// As [`PageBloomFilterBuilder::params`].
    pub fn build(self) -> Result<DynPageBloomFilter> {
        DynPageBloomFilter::new(self.params()?)
    }

    /// Build a lock-wrapped filter for shared use across threads.
    ///
    /// # Errors
    ///
    /// As [`PageBloomFilterBuilder::params`].
    pub fn build_shared(self) -> Result<SharedPageBloomFilter> {
        Ok(SharedPageBloomFilter::new(self.build()?))
    }

    /// Build the filter and return it with the resolved sizing.
    ///
    /// # Errors
    ///
    /// As [`PageBloomFilterBuilder::params`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pagebloom::builder::PageBloomFilterBuilder;
    ///
    /// let (_filter, metadata) = PageBloomFilterBuilder::new()
    ///     .expected_items(10_000)
    ///     .false_positive_rate(0.01)
    ///     .build_with_metadata()?;
    ///
    /// println!("pages: {} x {} bytes", metadata.params.page_num, metadata.params.page_size());
    /// println!("bytes per item: {:.2}", metadata.bytes_per_item);
    /// # Ok::<(), pagebloom::PageBloomError>(())
    /// ```
    pub fn build_with_metadata(self) -> Result<(DynPageBloomFilter, FilterMetadata)> {
        let params = self.params()?;
        let filter = DynPageBloomFilter::new(params)?;

        let items = self.expected_items.max(1);
        let fp_rate = self.fp_rate.clamp(params::MIN_FP_RATE, params::MAX_FP_RATE);
        let data_len = params.data_len();
        let metadata = FilterMetadata {
            expected_items: items,
            fp_rate,
            params,
            capacity: params::capacity(data_len, params.way),
            virtual_capacity: params::virtual_capacity(data_len, params.way, fp_rate),
            bytes_per_item: data_len as f64 / items as f64,
        };
        Ok((filter, metadata))
    }
}

impl Default for PageBloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sizing details of a built filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMetadata {
    /// Expected number of keys (at least 1).
    pub expected_items: usize,
    /// Target false-positive rate after clamping.
    pub fp_rate: f64,
    /// Resolved geometry.
    pub params: FilterParams,
    /// `data_len * 8 / way`.
    pub capacity: usize,
    /// Keys that fit before the estimate reaches `fp_rate`.
    pub virtual_capacity: u64,
    /// Buffer bytes per expected key.
    pub bytes_per_item: f64,
}

impl FilterMetadata {
    /// Buffer size in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.params.data_len()
    }

    /// Buffer size in kilobytes.
    #[must_use]
    pub fn memory_kb(&self) -> f64 {
        self.memory_bytes() as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BloomFilter, SharedBloomFilter};
    use crate::PageBloomError;

    #[test]
    fn test_builder_minimal() {
        let filter = PageBloomFilterBuilder::new()
            .expected_items(500)
            .false_positive_rate(0.01)
            .build()
            .unwrap();

        assert!(filter.is_empty());
        assert_eq!(filter.params(), plan(500, 0.01).unwrap());
    }

    #[test]
    fn test_builder_way_override_keeps_level() {
        let filter = PageBloomFilterBuilder::new()
            .expected_items(500)
            .false_positive_rate(0.01)
            .way(8)
            .build()
            .unwrap();

        assert_eq!(filter.way(), 8);
        assert_eq!(filter.page_level(), 7);
        assert_eq!(filter.data().len(), 640);
    }

    #[test]
    fn test_builder_way_override_raises_level() {
        // One item at 10% plans a single 64-byte page at way 4.
        let params = PageBloomFilterBuilder::new()
            .expected_items(1)
            .false_positive_rate(0.1)
            .way(6)
            .params()
            .unwrap();

        assert_eq!(params.way, 6);
        assert_eq!(params.page_level, 7);
        assert_eq!(params.page_num, 1);
    }

    #[test]
    fn test_builder_rejects_bad_way() {
        let result = PageBloomFilterBuilder::new()
            .expected_items(100)
            .false_positive_rate(0.01)
            .way(3)
            .build();

        assert_eq!(result, Err(PageBloomError::invalid_way(3)));
    }

    #[test]
    fn test_builder_rejects_nan_rate() {
        let result = PageBloomFilterBuilder::new()
            .expected_items(100)
            .false_positive_rate(f64::NAN)
            .build();

        assert!(matches!(
            result,
            Err(PageBloomError::FalsePositiveRateOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_builder_with_metadata() {
        let (filter, metadata) = PageBloomFilterBuilder::new()
            .expected_items(10_000)
            .false_positive_rate(0.01)
            .build_with_metadata()
            .unwrap();

        assert!(filter.is_empty());
        assert_eq!(metadata.expected_items, 10_000);
        assert_eq!(metadata.params, filter.params());
        assert_eq!(metadata.memory_bytes(), filter.data().len());
        assert_eq!(metadata.capacity, filter.capacity());
        assert!(metadata.virtual_capacity > 10_000);
        assert!(metadata.bytes_per_item > 1.0 && metadata.bytes_per_item < 1.5);
    }

    #[test]
    fn test_builder_metadata_clamps_rate() {
        let (_, metadata) = PageBloomFilterBuilder::new()
            .expected_items(0)
            .false_positive_rate(0.5)
            .build_with_metadata()
            .unwrap();

        assert_eq!(metadata.expected_items, 1);
        assert_eq!(metadata.fp_rate, params::MAX_FP_RATE);
    }

    #[test]
    fn test_builder_shared() {
        let shared = PageBloomFilterBuilder::default()
            .expected_items(1_000)
            .false_positive_rate(0.02)
            .build_shared()
            .unwrap();

        assert!(shared.set(b"k"));
        assert!(shared.test(b"k"));
    }
}
