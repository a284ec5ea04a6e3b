//! Thread-safe paged Bloom filter.
//!
//! - [`SharedPageBloomFilter`] - instance-wide `RwLock`, implements
//!   [`SharedBloomFilter`](crate::core::SharedBloomFilter)
//!
//! Pages are small and a key touches only one of them, so critical sections
//! are a single hash plus at most eight bit operations.

pub mod shared;

pub use shared::SharedPageBloomFilter;
