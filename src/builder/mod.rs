//! Builder pattern for paged Bloom filter construction.
//!
//! # Type-State Pattern
//!
//! The builder progresses through `Initial -> WithItems -> Complete`.
//! `build` only exists once both the expected item count and the target
//! false positive rate have been supplied, so forgetting one is a compile
//! error rather than a runtime one.
//!
//! Out-of-range values are still runtime errors: they surface from `build`
//! as [`PageBloomError`](crate::PageBloomError).
//!
//! # Examples
//!
//! ```
//! use pagebloom::builder::PageBloomFilterBuilder;
//! use pagebloom::core::BloomFilter;
//!
//! let filter = PageBloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()?;
//! assert_eq!(filter.page_level(), 10);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```
//!
//! Forcing the probe count:
//!
//! ```
//! use pagebloom::builder::PageBloomFilterBuilder;
//! use pagebloom::core::BloomFilter;
//!
//! let filter = PageBloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .way(5)
//!     .build()?;
//! assert_eq!(filter.way(), 5);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod page;

pub use page::{Complete, FilterMetadata, Initial, PageBloomFilterBuilder, WithItems};

/// Prelude for convenient builder imports.
pub mod prelude {
    pub use super::{FilterMetadata, PageBloomFilterBuilder};
}
