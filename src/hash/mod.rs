//! Hashing for paged Bloom filters.
//!
//! Every bit position a filter touches is derived from one 128-bit hash of
//! the key, computed in a single pass.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── spooky.rs  - 128-bit short hash (bit-exact, persisted-format critical)
//! ├── hasher.rs  - std::hash adapters and typed-item keys
//! └── mod.rs     - This file (public API)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use pagebloom::hash::{hash128, hash64, hash32};
//!
//! let code = hash128(b"hello");
//! assert_eq!(hash64(b"hello"), code.low);
//! assert_eq!(hash32(b"hello"), code.low as u32);
//! ```

pub mod hasher;
pub mod spooky;

pub use hasher::{item_key, SpookyBuildHasher, SpookyHasher};
pub use spooky::{hash128, hash32, hash64, HashCode128};
