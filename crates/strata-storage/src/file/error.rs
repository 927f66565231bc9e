//! I/O error types for the file module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// Standard I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying error.
        #[from]
        source: io::Error,
    },

    /// File not found.
    #[error("file not found: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Permission denied.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The inaccessible path.
        path: PathBuf,
    },

    /// File already exists.
    #[error("file already exists: {path}")]
    AlreadyExists {
        /// The conflicting path.
        path: PathBuf,
    },

    /// Short read/write: less data than expected. A short read of a page
    /// means the file holds a torn page and is treated as corruption.
    #[error("short {operation}: expected {expected} bytes, got {actual}")]
    ShortIo {
        /// "read" or "write".
        operation: &'static str,
        /// Bytes expected.
        expected: usize,
        /// Bytes transferred.
        actual: usize,
    },

    /// Operation not allowed in the file's open mode.
    #[error("invalid operation: {operation} not allowed on a {mode} file")]
    InvalidOperation {
        /// The attempted operation.
        operation: &'static str,
        /// The file's open mode.
        mode: &'static str,
    },
}

impl IoError {
    /// Creates a `ShortIo` error for reads.
    pub fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortIo {
            operation: "read",
            expected,
            actual,
        }
    }

    /// Creates a `ShortIo` error for writes.
    pub fn short_write(expected: usize, actual: usize) -> Self {
        Self::ShortIo {
            operation: "write",
            expected,
            actual,
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Converts from `std::io::Error`, attaching path context to the
    /// kinds that benefit from it.
    pub fn from_io_with_path(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { source: err },
        }
    }
}
