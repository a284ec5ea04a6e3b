//! Persistence for paged Bloom filters.
//!
//! This module is only available with the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! pagebloom = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Formats
//!
//! ## Serde Snapshot
//!
//! [`FilterSnapshot`] carries `(way, page_level, unique_cnt, data)` and backs
//! the `Serialize`/`Deserialize` impls of every filter type. Use it with any
//! serde format (JSON, bincode, ...).
//!
//! ## Binary Frame
//!
//! [`PageFrame`] writes a 24-byte header followed by the raw buffer. No serde
//! format is involved, so the data section is the page buffer byte for byte
//! and can be read back by any implementation of the same hash.
//!
//! Both formats validate on the way in: a malformed input yields an error,
//! never a filter with an inconsistent geometry.

pub mod frame;
pub mod snapshot;

pub use frame::{FrameError, FrameHeader, PageFrame};
pub use snapshot::FilterSnapshot;
