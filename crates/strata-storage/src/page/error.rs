//! Page error types.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors produced by page-level operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// Read/write offset below the header or range past the page end.
    #[error("invalid offset {offset}: page byte range is [{min}, {max})")]
    InvalidOffset {
        /// The offending offset.
        offset: usize,
        /// First valid offset (the header size).
        min: usize,
        /// One past the last valid offset (the page size).
        max: usize,
    },

    /// A write would run past the end of the page.
    #[error("write of {len} bytes at offset {offset} overflows the page")]
    PageOverflow {
        /// Requested write offset.
        offset: usize,
        /// Requested write length.
        len: usize,
    },

    /// Zero-length read.
    #[error("read length must be greater than zero")]
    InvalidLength,

    /// Stored checksum does not match the recomputed one.
    #[error("checksum mismatch: stored {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Checksum recorded in the header.
        expected: u32,
        /// Checksum recomputed from the page bytes.
        computed: u32,
    },

    /// `free_space_offset` lies outside the page.
    #[error("free space offset {offset} outside valid range")]
    InvalidFreeSpaceOffset {
        /// The offending offset.
        offset: u16,
    },
}
