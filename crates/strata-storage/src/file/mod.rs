//! File management and positioned I/O.
//!
//! All reads and writes are offset-based (`pread`/`pwrite` semantics) and
//! never advance a shared cursor, so concurrent access to disjoint offsets
//! is safe at the OS level. The [`FileHandle`] trait is the seam between
//! the pager and the filesystem; [`StandardFile`] is the std-backed
//! implementation.

mod error;
mod handle;
mod options;
mod std_io;

pub use error::{IoError, IoResult};
pub use handle::FileHandle;
pub use options::OpenOptions;
pub use std_io::StandardFile;
