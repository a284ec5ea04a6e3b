//! Serde support for paged Bloom filters.
//!
//! Every filter serializes through [`FilterSnapshot`]: the raw buffer plus
//! the three numbers needed to interpret it. Works with any serde format.
//!
//! Deserialization re-runs the same validation as construction, so a
//! tampered snapshot fails with an error instead of producing a filter with
//! an impossible geometry.
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::DynPageBloomFilter;
//!
//! let mut filter = DynPageBloomFilter::with_rate(1_000, 0.01)?;
//! filter.set(b"hello");
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! let restored: DynPageBloomFilter = serde_json::from_str(&json).unwrap();
//! assert!(restored.test(b"hello"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::filter::BloomFilter;
use crate::error::{PageBloomError, Result};
use crate::filters::{DynPageBloomFilter, PageBloomFilter};
use crate::sync::SharedPageBloomFilter;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// Owned, serializable image of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    /// Format version for compatibility checking.
    pub version: u16,
    /// Bits probed per key.
    pub way: usize,
    /// `log2` of the page size in bytes.
    pub page_level: u32,
    /// Unique insert count.
    pub unique_cnt: u64,
    /// Raw page buffer.
    pub data: Vec<u8>,
}

impl FilterSnapshot {
    /// Capture a filter's state.
    #[must_use]
    pub fn from_filter<F: BloomFilter + ?Sized>(filter: &F) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            way: filter.way(),
            page_level: filter.page_level(),
            unique_cnt: filter.unique_cnt(),
            data: filter.data().to_vec(),
        }
    }

    fn check_version(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PageBloomError::serialization_error(format!(
                "incompatible snapshot version: expected {}, got {}",
                SNAPSHOT_VERSION, self.version
            )));
        }
        Ok(())
    }

    /// Rebuild a runtime-way filter.
    ///
    /// # Errors
    ///
    /// Version mismatch, or any reconstruction error from
    /// [`DynPageBloomFilter::from_bytes`].
    pub fn to_filter(&self) -> Result<DynPageBloomFilter> {
        self.check_version()?;
        DynPageBloomFilter::from_bytes(self.way, self.page_level, &self.data, self.unique_cnt)
    }

    /// Rebuild a fixed-way filter. The stored way must equal `W`.
    ///
    /// # Errors
    ///
    /// Version mismatch, [`PageBloomError::InvalidWay`] if the stored way
    /// differs from `W`, or any reconstruction error.
    pub fn to_page_filter<const W: usize>(&self) -> Result<PageBloomFilter<W>> {
        self.check_version()?;
        if self.way != W {
            return Err(PageBloomError::invalid_way(self.way));
        }
        PageBloomFilter::<W>::from_bytes(self.page_level, &self.data, self.unique_cnt)
    }
}

impl TryFrom<FilterSnapshot> for DynPageBloomFilter {
    type Error = PageBloomError;

    fn try_from(snapshot: FilterSnapshot) -> Result<Self> {
        snapshot.to_filter()
    }
}

impl Serialize for DynPageBloomFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        FilterSnapshot::from_filter(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DynPageBloomFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FilterSnapshot::deserialize(deserializer)?
            .to_filter()
            .map_err(de::Error::custom)
    }
}

impl<const W: usize> Serialize for PageBloomFilter<W> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        FilterSnapshot::from_filter(self).serialize(serializer)
    }
}

impl<'de, const W: usize> Deserialize<'de> for PageBloomFilter<W> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FilterSnapshot::deserialize(deserializer)?
            .to_page_filter::<W>()
            .map_err(de::Error::custom)
    }
}

impl Serialize for SharedPageBloomFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (data, unique_cnt) = self.snapshot_data();
        let params = self.params();
        FilterSnapshot {
            version: SNAPSHOT_VERSION,
            way: params.way,
            page_level: params.page_level,
            unique_cnt,
            data,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SharedPageBloomFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        DynPageBloomFilter::deserialize(deserializer).map(SharedPageBloomFilter::new)
    }
}
