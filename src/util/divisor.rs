//! Exact 32-bit division by a runtime-invariant divisor.
//!
//! Page selection computes `mix % page_num` on every operation. The page count
//! never changes after construction, so the reciprocal is precomputed once and
//! each remainder costs two multiplications instead of a hardware divide.
//!
//! Method: Lemire, Kaser & Kurz, "Faster Remainder by Direct Computation"
//! (2019). With `M = ceil(2^64 / n)`, for every 32-bit `x`:
//!
//! ```text
//! x / n = (x * M) >> 64
//! x % n = ((M * x mod 2^64) * n) >> 64
//! ```
//!
//! For `n == 1` the reciprocal wraps to zero; the remainder formula still
//! yields 0, and the quotient is special-cased to `x`.

#![allow(clippy::cast_possible_truncation)]

/// Precomputed reciprocal of a 32-bit divisor.
///
/// # Examples
///
/// ```
/// use pagebloom::util::FastDivisor;
///
/// let d = FastDivisor::new(7);
/// assert_eq!(d.rem(100), 100 % 7);
/// assert_eq!(d.div(100), 100 / 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastDivisor {
    factor: u64,
    value: u32,
}

impl FastDivisor {
    /// Precompute the reciprocal of `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero. Filter construction rejects a zero page count
    /// before a divisor is ever built.
    #[must_use]
    pub fn new(n: u32) -> Self {
        assert!(n != 0, "FastDivisor requires a non-zero divisor");
        Self {
            factor: (u64::MAX / u64::from(n)).wrapping_add(1),
            value: n,
        }
    }

    /// The divisor this reciprocal was built for.
    #[inline(always)]
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// `m % n`.
    #[inline(always)]
    #[must_use]
    pub fn rem(&self, m: u32) -> u32 {
        let low = self.factor.wrapping_mul(u64::from(m));
        ((u128::from(low) * u128::from(self.value)) >> 64) as u32
    }

    /// `m / n`.
    #[inline(always)]
    #[must_use]
    pub fn div(&self, m: u32) -> u32 {
        if self.factor == 0 {
            return m;
        }
        ((u128::from(m) * u128::from(self.factor)) >> 64) as u32
    }
}
