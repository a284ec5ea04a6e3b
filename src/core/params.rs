//! Capacity planning and parameter validation for paged Bloom filters.
//!
//! A paged filter is described by three numbers:
//!
//! - `way`: bits probed per key, in `[4, 8]`
//! - `page_level`: `log2` of the page size in bytes
//! - `page_num`: number of pages
//!
//! # Sizing
//!
//! With `w = -log2(ε)` for target rate `ε`, a classic Bloom filter needs
//! `w / ln 2` bits per item. Confining all probes of a key to one page raises
//! the effective rate, so the budget is inflated:
//!
//! ```text
//! bytes_per_item = w / (8 ln 2)
//!                × (1 + 0.0025 (w - 7)²)   if w > 9
//!                × 1.01                    if 3 < w <= 9
//! way            = clamp(round(w), 4, 8)
//! ```
//!
//! The page level is the smallest in `6..12` whose `2^(level + 4)` exceeds
//! the total byte budget, so small filters get small pages. A level below
//! `8 - 8/way` is bumped by one: smaller pages cannot keep `way` probe bits
//! apart. Anything larger uses 4 KiB pages.
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::params::plan;
//!
//! let params = plan(500, 0.01).unwrap();
//! assert_eq!(params.way, 7);
//! assert_eq!(params.page_level, 7);
//! assert_eq!(params.data_len(), 640);
//! ```

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::f64::consts::LN_2;

use tracing::{debug, warn};

use crate::error::{PageBloomError, Result};

/// Fewest probes per key.
pub const MIN_WAY: usize = 4;

/// Most probes per key; one 128-bit hash yields eight 16-bit codes.
pub const MAX_WAY: usize = 8;

/// Largest page level (8 KiB pages); 16-bit codes cannot address more bits.
pub const MAX_PAGE_LEVEL: u32 = 13;

/// Planning clamps the requested rate to at least this.
pub const MIN_FP_RATE: f64 = 0.0005;

/// Planning clamps the requested rate to at most this.
pub const MAX_FP_RATE: f64 = 0.1;

/// Resolved filter geometry.
///
/// Produced by [`plan`], or assembled by hand and checked with
/// [`FilterParams::new`] / [`validate_params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterParams {
    /// Bits probed per key.
    pub way: usize,
    /// `log2` of the page size in bytes.
    pub page_level: u32,
    /// Number of pages.
    pub page_num: u32,
}

impl FilterParams {
    /// Build validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `way`, `page_level` or `page_num` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagebloom::core::params::FilterParams;
    ///
    /// assert!(FilterParams::new(6, 9, 4).is_ok());
    /// assert!(FilterParams::new(9, 9, 4).is_err());
    /// assert!(FilterParams::new(6, 6, 4).is_err());
    /// assert!(FilterParams::new(6, 9, 0).is_err());
    /// ```
    pub fn new(way: usize, page_level: u32, page_num: u32) -> Result<Self> {
        let params = Self {
            way,
            page_level,
            page_num,
        };
        validate_params(&params)?;
        Ok(params)
    }

    /// Page size in bytes.
    #[inline]
    #[must_use]
    pub const fn page_size(&self) -> usize {
        1usize << self.page_level
    }

    /// Total buffer length in bytes.
    #[inline]
    #[must_use]
    pub const fn data_len(&self) -> usize {
        (self.page_num as usize) << self.page_level
    }

    /// Total number of bits.
    #[inline]
    #[must_use]
    pub const fn bit_count(&self) -> u64 {
        (self.data_len() as u64) * 8
    }
}

/// Smallest page level allowed for `way`: `8 - 8/way`.
///
/// ```
/// use pagebloom::core::params::min_page_level;
///
/// assert_eq!(min_page_level(4), 6);
/// assert_eq!(min_page_level(5), 7);
/// assert_eq!(min_page_level(8), 7);
/// ```
#[inline]
#[must_use]
pub const fn min_page_level(way: usize) -> u32 {
    (8 - 8 / way) as u32
}

/// Check that `way` is in `[4, 8]`.
///
/// # Errors
///
/// [`PageBloomError::InvalidWay`] otherwise.
pub fn validate_way(way: usize) -> Result<()> {
    if !(MIN_WAY..=MAX_WAY).contains(&way) {
        return Err(PageBloomError::invalid_way(way));
    }
    Ok(())
}

/// Check that `page_level` is in `[8 - 8/way, 13]`.
///
/// # Errors
///
/// [`PageBloomError::InvalidWay`] if `way` itself is invalid,
/// [`PageBloomError::InvalidPageLevel`] if the level is out of range.
pub fn validate_page_level(way: usize, page_level: u32) -> Result<()> {
    validate_way(way)?;
    let min = min_page_level(way);
    if page_level < min || page_level > MAX_PAGE_LEVEL {
        return Err(PageBloomError::invalid_page_level(
            page_level,
            min,
            MAX_PAGE_LEVEL,
        ));
    }
    Ok(())
}

/// Check a full parameter set.
///
/// # Errors
///
/// Way and page level errors as in [`validate_page_level`];
/// [`PageBloomError::InvalidDataSize`] when `page_num == 0`.
pub fn validate_params(params: &FilterParams) -> Result<()> {
    validate_page_level(params.way, params.page_level)?;
    if params.page_num == 0 {
        return Err(PageBloomError::invalid_data_size(0, params.page_size()));
    }
    Ok(())
}

/// Choose filter parameters for `items` keys at false-positive rate `fp_rate`.
///
/// `items` is raised to 1; `fp_rate` is clamped to
/// `[MIN_FP_RATE, MAX_FP_RATE]`. The result is advisory: it is deterministic
/// and always passes [`validate_params`].
///
/// # Errors
///
/// - [`PageBloomError::FalsePositiveRateOutOfBounds`] if `fp_rate` is NaN
/// - [`PageBloomError::TooManyItems`] if more than `i32::MAX` pages are needed
///
/// # Examples
///
/// ```
/// use pagebloom::core::params::plan;
///
/// let small = plan(1, 0.1).unwrap();
/// assert_eq!(small.page_num, 1);
///
/// let large = plan(10_000_000, 0.001).unwrap();
/// assert_eq!(large.page_level, 12);
/// assert_eq!(large.way, 8);
/// ```
pub fn plan(items: usize, fp_rate: f64) -> Result<FilterParams> {
    if fp_rate.is_nan() {
        return Err(PageBloomError::fp_rate_out_of_bounds(fp_rate));
    }

    let items = items.max(1);
    let clamped = fp_rate.clamp(MIN_FP_RATE, MAX_FP_RATE);
    if clamped != fp_rate {
        warn!(
            requested = fp_rate,
            used = clamped,
            "false positive rate clamped"
        );
    }

    let w = -clamped.log2();
    let mut bytes_per_item = w / (LN_2 * 8.0);
    if w > 9.0 {
        let x = w - 7.0;
        bytes_per_item *= 1.0 + 0.0025 * x * x;
    } else if w > 3.0 {
        bytes_per_item *= 1.01;
    }

    let way = (w.round() as usize).clamp(MIN_WAY, MAX_WAY);

    // Saturating float-to-int cast.
    let total = (bytes_per_item * items as f64) as usize;

    let page_level = (6..12u32)
        .find(|&i| (total as u128) < (1u128 << (i + 4)))
        .map_or(12, |i| {
            if i < min_page_level(way) {
                i + 1
            } else {
                i
            }
        });

    let page_size = 1u64 << page_level;
    let total = total as u64;
    let page_num = (total / page_size + u64::from(total % page_size != 0)).max(1);
    if page_num > i32::MAX as u64 {
        return Err(PageBloomError::too_many_items(items, page_num));
    }

    let params = FilterParams {
        way,
        page_level,
        page_num: page_num as u32,
    };
    debug!(
        items,
        fp_rate = clamped,
        way,
        page_level,
        page_num = params.page_num,
        bytes = params.data_len(),
        "planned filter"
    );
    Ok(params)
}

/// Distinct keys a buffer of `data_len` bytes holds at one bit per probe.
///
/// `data_len * 8 / way`.
#[inline]
#[must_use]
pub const fn capacity(data_len: usize, way: usize) -> usize {
    data_len * 8 / way
}

/// Keys that fit before the standard Bloom estimate reaches `fp_rate`.
///
/// Solves `(1 - (1 - 1/m)^(k n))^k = ε` for `n` with `m` bits and `k = way`:
///
/// ```text
/// n = ln(1 - ε^(1/k)) / ln(1 - 1/m) / k
/// ```
///
/// Computed with `ln_1p` so `1/m` keeps its precision for large `m`.
/// Non-finite or non-positive results map to 0.
///
/// # Examples
///
/// ```
/// use pagebloom::core::params::{capacity, virtual_capacity};
///
/// let v = virtual_capacity(640, 7, 0.01);
/// assert!(v > 0 && (v as usize) < capacity(640, 7));
/// ```
#[must_use]
pub fn virtual_capacity(data_len: usize, way: usize, fp_rate: f64) -> u64 {
    let bits = data_len as f64 * 8.0;
    if bits <= 1.0 || way == 0 {
        return 0;
    }
    let k = way as f64;
    let t = (-fp_rate.powf(1.0 / k)).ln_1p() / (-1.0 / bits).ln_1p();
    if !t.is_finite() || t <= 0.0 {
        return 0;
    }
    (t as u64) / way as u64
}

/// Standard Bloom estimate of the false-positive rate after `items` distinct
/// inserts into `bits` bits with `way` probes: `(1 - e^(-k n / m))^k`.
///
/// Page confinement makes the real rate somewhat higher; planning accounts
/// for that in its inflation factor.
#[must_use]
pub fn expected_fp_rate(bits: u64, items: u64, way: usize) -> f64 {
    if bits == 0 {
        return 1.0;
    }
    if items == 0 {
        return 0.0;
    }
    let k = way as f64;
    let exponent = -k * items as f64 / bits as f64;
    (1.0 - exponent.exp()).powf(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_reference_point() {
        let params = plan(500, 0.01).unwrap();
        assert_eq!(
            params,
            FilterParams {
                way: 7,
                page_level: 7,
                page_num: 5
            }
        );
        assert_eq!(params.data_len(), 640);
        assert_eq!(params.page_size(), 128);
        assert_eq!(params.bit_count(), 5120);
    }

    #[test]
    fn test_plan_zero_items_is_one() {
        assert_eq!(plan(0, 0.01).unwrap(), plan(1, 0.01).unwrap());
    }

    #[test]
    fn test_plan_always_at_least_one_page() {
        let params = plan(1, 0.1).unwrap();
        assert_eq!(params.page_num, 1);
        assert!(validate_params(&params).is_ok());
    }

    #[test]
    fn test_plan_clamps_rate() {
        assert_eq!(plan(1000, 0.5).unwrap(), plan(1000, MAX_FP_RATE).unwrap());
        assert_eq!(plan(1000, 1e-9).unwrap(), plan(1000, MIN_FP_RATE).unwrap());
        assert_eq!(plan(1000, 0.0).unwrap(), plan(1000, MIN_FP_RATE).unwrap());
        assert_eq!(plan(1000, -1.0).unwrap(), plan(1000, MIN_FP_RATE).unwrap());
    }

    #[test]
    fn test_plan_rejects_nan() {
        assert!(matches!(
            plan(1000, f64::NAN),
            Err(PageBloomError::FalsePositiveRateOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_plan_way_tracks_rate() {
        assert_eq!(plan(1000, 0.1).unwrap().way, 4);
        assert_eq!(plan(1000, 0.05).unwrap().way, 4);
        assert_eq!(plan(1000, 0.02).unwrap().way, 6);
        assert_eq!(plan(1000, 0.01).unwrap().way, 7);
        assert_eq!(plan(1000, 0.005).unwrap().way, 8);
        assert_eq!(plan(1000, 0.0005).unwrap().way, 8);
    }

    #[test]
    fn test_plan_page_level_grows_with_size() {
        let mut last = 0;
        for items in [10, 100, 1_000, 10_000, 100_000, 1_000_000] {
            let params = plan(items, 0.01).unwrap();
            assert!(params.page_level >= last);
            assert!(params.page_level >= min_page_level(params.way));
            assert!(params.page_level <= 12);
            last = params.page_level;
        }
        assert_eq!(last, 12);
    }

    #[test]
    fn test_plan_respects_bytes_budget() {
        let params = plan(100_000, 0.01).unwrap();
        // ~1.21 bytes per item at 1%
        let budget = 121_012usize;
        assert!(params.data_len() >= budget - 1);
        assert!(params.data_len() < budget + params.page_size());
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(plan(12_345, 0.003).unwrap(), plan(12_345, 0.003).unwrap());
    }

    #[test]
    fn test_plan_too_many_items() {
        let err = plan(usize::MAX, 0.0005).unwrap_err();
        assert!(matches!(err, PageBloomError::TooManyItems { .. }));
    }

    #[test]
    fn test_validate_way() {
        for way in 4..=8 {
            assert!(validate_way(way).is_ok());
        }
        assert_eq!(validate_way(3), Err(PageBloomError::invalid_way(3)));
        assert_eq!(validate_way(9), Err(PageBloomError::invalid_way(9)));
    }

    #[test]
    fn test_validate_page_level_bounds() {
        assert!(validate_page_level(4, 6).is_ok());
        assert!(validate_page_level(4, 5).is_err());
        assert!(validate_page_level(5, 6).is_err());
        assert!(validate_page_level(8, 7).is_ok());
        assert!(validate_page_level(8, 13).is_ok());
        assert_eq!(
            validate_page_level(8, 14),
            Err(PageBloomError::invalid_page_level(14, 7, 13))
        );
    }

    #[test]
    fn test_validate_params_zero_pages() {
        let params = FilterParams {
            way: 6,
            page_level: 8,
            page_num: 0,
        };
        assert_eq!(
            validate_params(&params),
            Err(PageBloomError::invalid_data_size(0, 256))
        );
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(640, 7), 731);
        assert_eq!(capacity(384, 4), 768);
        assert_eq!(capacity(384, 8), 384);
    }

    #[test]
    fn test_virtual_capacity_monotone_in_rate() {
        let strict = virtual_capacity(64 * 1024, 6, 0.001);
        let loose = virtual_capacity(64 * 1024, 6, 0.05);
        assert!(strict < loose);
    }

    #[test]
    fn test_virtual_capacity_degenerate_inputs() {
        assert_eq!(virtual_capacity(0, 6, 0.01), 0);
        assert_eq!(virtual_capacity(640, 6, 0.0), 0);
        assert_eq!(virtual_capacity(640, 0, 0.01), 0);
    }

    #[test]
    fn test_virtual_capacity_inverts_expected_rate() {
        let data_len = 1 << 16;
        let way = 7;
        let n = virtual_capacity(data_len, way, 0.01);
        let rate = expected_fp_rate(data_len as u64 * 8, n, way);
        assert!((rate - 0.01).abs() < 0.001, "rate = {}", rate);
    }

    #[test]
    fn test_expected_fp_rate_edges() {
        assert_eq!(expected_fp_rate(0, 10, 4), 1.0);
        assert_eq!(expected_fp_rate(1024, 0, 4), 0.0);
        let full = expected_fp_rate(64, 1_000_000, 4);
        assert!(full > 0.99);
    }
}
