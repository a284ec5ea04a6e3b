//! PageBloom: paged Bloom filters for Rust.
//!
//! A paged Bloom filter splits its bit array into equally sized pages. Every
//! key is hashed once; the hash picks one page and up to eight 16-bit probe
//! codes, and all of the key's bits are set or tested inside that page. A
//! lookup therefore touches a single cache-friendly region of memory.
//!
//! # What are Bloom Filters?
//!
//! A Bloom filter is a space-efficient probabilistic data structure that tests whether
//! an element is a member of a set. It can produce:
//! - **False positives**: May indicate an element is in the set when it isn't
//! - **Zero false negatives**: If it says an element isn't in the set, it definitely isn't
//!
//! # Quick Start
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::DynPageBloomFilter;
//!
//! // Plan for 10,000 keys at a 1% false positive rate
//! let mut filter = DynPageBloomFilter::with_rate(10_000, 0.01)?;
//!
//! filter.set(b"hello");
//! filter.set(b"world");
//!
//! assert!(filter.test(b"hello"));
//! assert!(filter.test(b"world"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```
//!
//! # Sizing
//!
//! [`plan`] turns `(items, fp_rate)` into a [`FilterParams`]: the number of
//! probes per key (`way`, 4 to 8), the page size (`2^page_level` bytes) and
//! the page count.
//!
//! ```
//! use pagebloom::plan;
//!
//! let params = plan(500, 0.01)?;
//! assert_eq!((params.way, params.page_level, params.page_num), (7, 7, 5));
//! assert_eq!(params.data_len(), 640);
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```
//!
//! # Front-Ends
//!
//! | Type | Way | Mutation |
//! |------|-----|----------|
//! | [`PageBloomFilter<W>`] / [`Way4Filter`]..[`Way8Filter`] | compile time | `&mut self` |
//! | [`DynPageBloomFilter`] | runtime | `&mut self` |
//! | [`SharedPageBloomFilter`] | runtime | `&self`, `RwLock` inside |
//!
//! All front-ends for the same `(way, page_level)` produce identical buffers
//! for identical key sequences, and a buffer exported from one can be loaded
//! into any other.
//!
//! # Typed Items
//!
//! Filters work on byte strings. Any `Hash` type can be inserted through
//! [`BloomFilter::set_item`], which derives a stable 16-byte key with
//! [`item_key`]:
//!
//! ```
//! use pagebloom::prelude::*;
//!
//! let mut filter = Way6Filter::new(8, 4)?;
//! filter.set_item(&42u64);
//! assert!(filter.test_item(&42u64));
//! # Ok::<(), PageBloomError>(())
//! ```
//!
//! # Sharing Across Threads
//!
//! ```
//! use std::sync::Arc;
//! use pagebloom::builder::PageBloomFilterBuilder;
//! use pagebloom::core::SharedBloomFilter;
//!
//! let filter = Arc::new(
//!     PageBloomFilterBuilder::new()
//!         .expected_items(10_000)
//!         .false_positive_rate(0.01)
//!         .build_shared()?,
//! );
//!
//! let writer = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     writer.set(b"from another thread");
//! })
//! .join()
//! .unwrap();
//!
//! assert!(filter.test(b"from another thread"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```
//!
//! # Features
//!
//! - `serde` - Serde snapshots and the framed binary codec
//! - `trace` - `tracing` events for every shared-filter operation
//!
//! Sizing and reconstruction always log through `tracing` at `debug`/`warn`;
//! install a subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::bool_assert_comparison)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/pagebloom/0.1.0")]

/// Core traits, page addressing and sizing.
pub mod core;

/// Error types.
pub mod error;

/// Paged Bloom filter front-ends.
pub mod filters;

/// SpookyHash-style 128-bit hashing.
pub mod hash;

/// Low-level helpers.
pub mod util;

/// Lock-wrapped filter for shared use.
pub mod sync;

/// Type-state builder.
pub mod builder;

/// Serialization support.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support;

// Re-export core types
pub use error::{PageBloomError, Result};

pub use core::filter::{BloomFilter, SharedBloomFilter};
pub use core::params::{plan, FilterParams};

pub use filters::{
    DynPageBloomFilter, PageBloomFilter, Way4Filter, Way5Filter, Way6Filter, Way7Filter,
    Way8Filter,
};

pub use builder::{FilterMetadata, PageBloomFilterBuilder};

pub use sync::SharedPageBloomFilter;

pub use hash::{hash128, hash32, hash64, item_key, HashCode128};

#[cfg(feature = "serde")]
pub use serde_support as serde;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use pagebloom::prelude::*;
///
/// let mut filter = DynPageBloomFilter::with_rate(1_000, 0.01)?;
/// filter.set(b"hello");
/// assert!(filter.test(b"hello"));
/// # Ok::<(), PageBloomError>(())
/// ```
pub mod prelude {
    pub use crate::builder::{FilterMetadata, PageBloomFilterBuilder};
    pub use crate::core::filter::{BloomFilter, SharedBloomFilter};
    pub use crate::core::params::{plan, FilterParams};
    pub use crate::error::{PageBloomError, Result};
    pub use crate::filters::{
        DynPageBloomFilter, PageBloomFilter, Way4Filter, Way5Filter, Way6Filter, Way7Filter,
        Way8Filter,
    };
    pub use crate::hash::{hash128, item_key, HashCode128};
    pub use crate::sync::SharedPageBloomFilter;

    #[cfg(feature = "serde")]
    pub use crate::serde_support::{FilterSnapshot, PageFrame};
}
