//! Core types, traits and sizing for paged Bloom filters.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── filter.rs  - BloomFilter / SharedBloomFilter traits
//! ├── params.rs  - Capacity planning and validation
//! ├── page.rs    - Key to (page offset, probe codes)
//! ├── paged.rs   - Owned page buffer with generic-way set/test
//! └── mod.rs     - This file (public API)
//! ```
//!
//! # Data Flow
//!
//! ```text
//! plan(items, fpr) ──► FilterParams ──► PagedBitset::new
//!                                             │
//!           set/test(key) ──► PageHash::compute ──► hash128
//! ```
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::{plan, PagedBitset};
//!
//! let params = plan(1_000, 0.01)?;
//! let mut bits = PagedBitset::new(params.way, params.page_level, params.page_num)?;
//! assert!(bits.set(params.way, b"k"));
//! assert!(bits.test(params.way, b"k"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

pub mod filter;
pub mod page;
pub mod paged;
pub mod params;

pub use filter::{BloomFilter, SharedBloomFilter};
pub use page::PageHash;
pub use paged::PagedBitset;
pub use params::{plan, FilterParams};
