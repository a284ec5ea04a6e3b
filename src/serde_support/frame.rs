//! Compact binary framing for paged Bloom filters.
//!
//! A frame is a fixed header followed by the raw page buffer, byte for byte.
//! Decoding never reinterprets memory; every field is read with explicit
//! little-endian conversion.
//!
//! # Format
//!
//! ```text
//! [Header: 24 bytes]
//!   Magic:       4 bytes  ("PBF1")
//!   Version:     2 bytes  (u16, format version)
//!   Way:         1 byte
//!   Page Level:  1 byte
//!   Unique Cnt:  8 bytes  (u64)
//!   Data Len:    8 bytes  (u64, bytes that follow)
//!
//! [Data: Data Len bytes]
//!   Raw page buffer
//! ```
//!
//! # Examples
//!
//! ```
//! use pagebloom::core::BloomFilter;
//! use pagebloom::filters::DynPageBloomFilter;
//! use pagebloom::serde_support::PageFrame;
//!
//! let mut filter = DynPageBloomFilter::with_rate(500, 0.01)?;
//! filter.set(b"framed");
//!
//! let bytes = PageFrame::encode(&filter);
//! assert_eq!(bytes.len(), PageFrame::encoded_len(&filter));
//!
//! let restored = PageFrame::decode(&bytes)?;
//! assert!(restored.test(b"framed"));
//! # Ok::<(), pagebloom::PageBloomError>(())
//! ```

#![allow(clippy::cast_possible_truncation)]

use crate::core::filter::BloomFilter;
use crate::core::params::validate_page_level;
use crate::error::{PageBloomError, Result};
use crate::filters::DynPageBloomFilter;

/// Magic bytes for format identification.
const MAGIC: &[u8; 4] = b"PBF1";

/// Current frame version.
pub const FRAME_VERSION: u16 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 24;

/// Frame decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Magic bytes do not match
    #[error("Invalid magic bytes (expected 'PBF1')")]
    InvalidMagic,

    /// Frame written by an unknown format version
    #[error("Unsupported frame version: {0} (expected {})", FRAME_VERSION)]
    UnsupportedVersion(u16),

    /// Buffer shorter than the header or the declared data
    #[error("Buffer too small: expected at least {expected} bytes, got {actual}")]
    BufferTooSmall {
        /// Minimum size required
        expected: usize,
        /// Size provided
        actual: usize,
    },

    /// Bytes left over after the declared data
    #[error("Trailing bytes: frame declares {declared} data bytes, {actual} present")]
    TrailingBytes {
        /// Data length from the header
        declared: u64,
        /// Data bytes actually present
        actual: usize,
    },
}

impl From<FrameError> for PageBloomError {
    fn from(err: FrameError) -> Self {
        PageBloomError::serialization_error(err.to_string())
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Format version.
    pub version: u16,
    /// Bits probed per key.
    pub way: usize,
    /// `log2` of the page size in bytes.
    pub page_level: u32,
    /// Unique insert count.
    pub unique_cnt: u64,
    /// Length of the data section.
    pub data_len: u64,
}

/// Binary frame codec.
pub struct PageFrame;

impl PageFrame {
    /// Encode a filter as header plus raw buffer.
    #[must_use]
    pub fn encode<F: BloomFilter + ?Sized>(filter: &F) -> Vec<u8> {
        let data = filter.data();
        let mut bytes = Vec::with_capacity(HEADER_SIZE + data.len());

        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&FRAME_VERSION.to_le_bytes());
        // way <= 8 and page_level <= 13 for any constructed filter
        bytes.push(filter.way() as u8);
        bytes.push(filter.page_level() as u8);
        bytes.extend_from_slice(&filter.unique_cnt().to_le_bytes());
        bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
        debug_assert_eq!(bytes.len(), HEADER_SIZE);

        bytes.extend_from_slice(data);
        bytes
    }

    /// Size of [`PageFrame::encode`]'s output for `filter`.
    #[must_use]
    pub fn encoded_len<F: BloomFilter + ?Sized>(filter: &F) -> usize {
        HEADER_SIZE + filter.data().len()
    }

    /// Parse and check the header only.
    ///
    /// # Errors
    ///
    /// [`FrameError`] (converted) for a short buffer, bad magic or unknown version.
    pub fn read_header(bytes: &[u8]) -> Result<FrameHeader> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::BufferTooSmall {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        if &bytes[0..4] != MAGIC {
            return Err(FrameError::InvalidMagic.into());
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FRAME_VERSION {
            return Err(FrameError::UnsupportedVersion(version).into());
        }

        Ok(FrameHeader {
            version,
            way: usize::from(bytes[6]),
            page_level: u32::from(bytes[7]),
            unique_cnt: read_u64(&bytes[8..16]),
            data_len: read_u64(&bytes[16..24]),
        })
    }

    /// Check a frame without allocating a filter.
    ///
    /// # Errors
    ///
    /// Header errors, a data section whose length disagrees with the header,
    /// or a geometry that construction would reject.
    pub fn validate(bytes: &[u8]) -> Result<()> {
        let (header, data) = Self::split(bytes)?;
        validate_page_level(header.way, header.page_level)?;

        let page_size = 1usize << header.page_level;
        if data.is_empty()
            || data.len() % page_size != 0
            || (data.len() >> header.page_level) > u32::MAX as usize
        {
            return Err(PageBloomError::invalid_data_size(data.len(), page_size));
        }
        Ok(())
    }

    /// Decode a frame into a filter. The data section is copied.
    ///
    /// # Errors
    ///
    /// As [`PageFrame::validate`].
    pub fn decode(bytes: &[u8]) -> Result<DynPageBloomFilter> {
        let (header, data) = Self::split(bytes)?;
        DynPageBloomFilter::from_bytes(header.way, header.page_level, data, header.unique_cnt)
    }

    fn split(bytes: &[u8]) -> Result<(FrameHeader, &[u8])> {
        let header = Self::read_header(bytes)?;
        let data = &bytes[HEADER_SIZE..];

        let declared = usize::try_from(header.data_len).unwrap_or(usize::MAX);
        if data.len() < declared {
            return Err(FrameError::BufferTooSmall {
                expected: HEADER_SIZE.saturating_add(declared),
                actual: bytes.len(),
            }
            .into());
        }
        if data.len() > declared {
            return Err(FrameError::TrailingBytes {
                declared: header.data_len,
                actual: data.len(),
            }
            .into());
        }
        Ok((header, data))
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}
