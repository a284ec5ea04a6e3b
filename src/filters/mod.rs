//! Paged Bloom filter front-ends.
//!
//! # Available Filters
//!
//! - [`PageBloomFilter<W>`] - probe count fixed at compile time (`W` in `[4, 8]`)
//! - [`Way4Filter`] .. [`Way8Filter`] - aliases for each specialization
//! - [`DynPageBloomFilter`] - probe count chosen at runtime, usually by [`plan`](crate::core::plan)
//!
//! # Choosing a Front-End
//!
//! | Front-end | Way known | Dispatch |
//! |-----------|-----------|----------|
//! | [`PageBloomFilter<W>`] | compile time | none |
//! | [`DynPageBloomFilter`] | runtime | one `match` per call |
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::{DynPageBloomFilter, Way8Filter};
//!
//! let mut fixed = Way8Filter::new(10, 16)?;
//! fixed.set(b"static");
//!
//! let mut planned = DynPageBloomFilter::with_rate(10_000, 0.001)?;
//! planned.set(b"dynamic");
//!
//! assert!(fixed.test(b"static") && planned.test(b"dynamic"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

pub mod dynamic;
pub mod page;

pub use dynamic::DynPageBloomFilter;
pub use page::{PageBloomFilter, Way4Filter, Way5Filter, Way6Filter, Way7Filter, Way8Filter};
