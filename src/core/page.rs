//! Key to (page, probe codes) mapping.
//!
//! One 128-bit hash is split into four 32-bit words. A rotate-xor of all four
//! picks the page; the eight 16-bit halves are the in-page probe codes, of
//! which a filter uses the first `way`. Codes are masked to the page's bit
//! width at probe time, so a page holds at most `2^16` addressable bits.
//!
//! ```text
//! low  = [w0 | w1]      high = [w2 | w3]
//! mix    = rotl(w0, 8) ^ rotl(w1, 6) ^ rotl(w2, 4) ^ rotl(w3, 2)
//! offset = (mix % page_num) << page_level
//! codes  = [w0.lo, w0.hi, w1.lo, w1.hi, w2.lo, w2.hi, w3.lo, w3.hi]
//! ```

#![allow(clippy::cast_possible_truncation)]

use crate::hash::hash128;
use crate::util::FastDivisor;

/// Page selection and probe codes for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHash {
    /// Byte offset of the selected page in the filter buffer.
    pub offset: usize,
    /// In-page bit codes; probe `i` uses `codes[i]`.
    pub codes: [u16; 8],
}

impl PageHash {
    /// Hash `key` and locate its page among `page_num` pages of `2^page_level` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagebloom::core::page::PageHash;
    /// use pagebloom::util::FastDivisor;
    ///
    /// let pages = FastDivisor::new(3);
    /// let ph = PageHash::compute(b"key", &pages, 7);
    /// assert_eq!(ph.offset % 128, 0);
    /// assert!(ph.offset < 3 * 128);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn compute(key: &[u8], page_num: &FastDivisor, page_level: u32) -> Self {
        let [w0, w1, w2, w3] = hash128(key).words();

        let mix = w0.rotate_left(8) ^ w1.rotate_left(6) ^ w2.rotate_left(4) ^ w3.rotate_left(2);
        let offset = (page_num.rem(mix) as usize) << page_level;

        let codes = [
            w0 as u16,
            (w0 >> 16) as u16,
            w1 as u16,
            (w1 >> 16) as u16,
            w2 as u16,
            (w2 >> 16) as u16,
            w3 as u16,
            (w3 >> 16) as u16,
        ];

        Self { offset, codes }
    }
}
