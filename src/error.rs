//! Error types for pagebloom operations.
//!
//! Every error is a construction-time validation failure. Once a filter
//! exists, `set`, `test` and `clear` cannot fail.
//!
//! # Error Propagation
//!
//! ```
//! use pagebloom::{Result, PageBloomError};
//! use pagebloom::core::params::{plan, FilterParams};
//!
//! fn plan_for_cache(entries: usize) -> Result<FilterParams> {
//!     let params = plan(entries, 0.01)?;
//!     Ok(params)
//! }
//! # assert!(plan_for_cache(10_000).is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for pagebloom operations.
///
/// # Examples
/// ```
/// use pagebloom::{PageBloomError, Result};
///
/// fn check_way(way: usize) -> Result<()> {
///     if !(4..=8).contains(&way) {
///         return Err(PageBloomError::invalid_way(way));
///     }
///     Ok(())
/// }
/// # assert!(check_way(6).is_ok());
/// # assert!(check_way(9).is_err());
/// ```
pub type Result<T> = std::result::Result<T, PageBloomError>;

/// Errors that can occur while planning or constructing a filter.
///
/// `Clone` + `PartialEq` keep errors comparable in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBloomError {
    /// Probe count outside `[4, 8]`.
    InvalidWay {
        /// The rejected way.
        way: usize,
    },

    /// Page level outside `[8 - 8/way, 13]`.
    ///
    /// The lower bound guarantees a page has enough bits for `way`
    /// independent 16-bit probe codes to stay spread out.
    InvalidPageLevel {
        /// The rejected page level.
        page_level: u32,
        /// Smallest level allowed for the requested way.
        min: u32,
        /// Largest level allowed.
        max: u32,
    },

    /// Buffer size is not a positive multiple of the page size, or it holds
    /// more pages than a 32-bit page index can address.
    InvalidDataSize {
        /// The rejected size in bytes.
        size: usize,
        /// Page size in bytes (`2^page_level`).
        page_size: usize,
    },

    /// Planning produced more pages than `i32::MAX`.
    TooManyItems {
        /// Requested item count.
        items: usize,
        /// Number of pages the plan would have needed.
        page_num: u64,
    },

    /// False positive rate is not a number.
    FalsePositiveRateOutOfBounds {
        /// The rejected rate.
        fp_rate: f64,
    },

    /// Snapshot or frame (de)serialization failed.
    #[cfg(feature = "serde")]
    SerializationError {
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for PageBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWay { way } => {
                write!(f, "Invalid way: {}. Must be in range [4, 8].", way)
            }
            Self::InvalidPageLevel {
                page_level,
                min,
                max,
            } => {
                write!(
                    f,
                    "Invalid page level: {}. Must be in range [{}, {}].",
                    page_level, min, max
                )
            }
            Self::InvalidDataSize { size, page_size } => {
                write!(
                    f,
                    "Invalid data size: {} bytes. Must be a positive multiple of the {}-byte page size.",
                    size, page_size
                )
            }
            Self::TooManyItems { items, page_num } => {
                write!(
                    f,
                    "Too many items: {} items would need {} pages (limit {}).",
                    items,
                    page_num,
                    i32::MAX
                )
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1).",
                    fp_rate
                )
            }
            #[cfg(feature = "serde")]
            Self::SerializationError { message } => {
                write!(f, "Serialization error: {}.", message)
            }
        }
    }
}

impl std::error::Error for PageBloomError {}

impl PageBloomError {
    /// Create an `InvalidWay` error.
    #[must_use]
    pub fn invalid_way(way: usize) -> Self {
        Self::InvalidWay { way }
    }

    /// Create an `InvalidPageLevel` error.
    #[must_use]
    pub fn invalid_page_level(page_level: u32, min: u32, max: u32) -> Self {
        Self::InvalidPageLevel {
            page_level,
            min,
            max,
        }
    }

    /// Create an `InvalidDataSize` error.
    #[must_use]
    pub fn invalid_data_size(size: usize, page_size: usize) -> Self {
        Self::InvalidDataSize { size, page_size }
    }

    /// Create a `TooManyItems` error.
    #[must_use]
    pub fn too_many_items(items: usize, page_num: u64) -> Self {
        Self::TooManyItems { items, page_num }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create a `SerializationError`.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_way() {
        let err = PageBloomError::invalid_way(9);
        let display = format!("{err}");
        assert!(display.contains("way"));
        assert!(display.contains('9'));
        assert!(display.contains("[4, 8]"));
    }

    #[test]
    fn test_error_display_invalid_page_level() {
        let err = PageBloomError::invalid_page_level(5, 7, 13);
        let display = format!("{err}");
        assert!(display.contains("page level"));
        assert!(display.contains("[7, 13]"));
    }

    #[test]
    fn test_error_display_invalid_data_size() {
        let err = PageBloomError::invalid_data_size(100, 128);
        let display = format!("{err}");
        assert!(display.contains("100 bytes"));
        assert!(display.contains("128-byte"));
    }

    #[test]
    fn test_error_display_too_many_items() {
        let err = PageBloomError::too_many_items(usize::MAX, 1 << 40);
        let display = format!("{err}");
        assert!(display.contains("Too many items"));
        assert!(display.contains(&(1u64 << 40).to_string()));
        assert!(display.contains(&i32::MAX.to_string()));
    }

    #[test]
    fn test_error_display_fp_rate() {
        let err = PageBloomError::fp_rate_out_of_bounds(f64::NAN);
        let display = format!("{err}");
        assert!(display.contains("NaN"));
        assert!(display.contains("(0, 1)"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_error_display_serialization() {
        let err = PageBloomError::serialization_error("bad magic");
        assert_eq!(format!("{err}"), "Serialization error: bad magic.");
    }

    #[test]
    fn test_error_implements_std_error() {
        let _err: Box<dyn std::error::Error> = Box::new(PageBloomError::invalid_way(3));
    }

    #[test]
    fn test_error_clone_eq() {
        let err1 = PageBloomError::invalid_data_size(0, 256);
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_ne!(err1, PageBloomError::invalid_data_size(1, 256));
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(PageBloomError::invalid_way(0))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(PageBloomError::InvalidWay { way: 0 }));
    }
}
