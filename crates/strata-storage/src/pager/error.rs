//! Pager error types.

use thiserror::Error;

use strata_common::memory::PoolError;
use strata_common::types::PageId;

use crate::file::IoError;
use crate::page::PageError;

/// Result type for pager operations.
pub type PagerResult<T> = Result<T, PagerError>;

/// Errors produced by the pager.
#[derive(Debug, Error)]
pub enum PagerError {
    /// A write was requested for a page the pager does not hold.
    #[error("page {page_id} not resident in the pager")]
    PageNotFound {
        /// The requested identifier.
        page_id: PageId,
    },

    /// A page read from disk records a different identifier than the slot
    /// it was read from.
    #[error("page {found} found where page {expected} was requested")]
    PageIdMismatch {
        /// Identifier the caller asked for.
        expected: PageId,
        /// Identifier recorded in the on-disk header.
        found: PageId,
    },

    /// Invalid pager configuration.
    #[error("invalid pager configuration: {message}")]
    Config {
        /// What was wrong.
        message: &'static str,
    },

    /// Page-level failure (bounds, checksum, free-space offset).
    #[error(transparent)]
    Page(#[from] PageError),

    /// File I/O failure, short page reads included.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Memory pool exhaustion.
    #[error(transparent)]
    Pool(#[from] PoolError),
}
