//! File handle trait.

use std::path::Path;

use super::error::{IoError, IoResult};

/// Trait for positioned file I/O.
///
/// All operations are offset-based (`pread`/`pwrite` style): no call moves
/// a shared cursor, so a handle can serve reads of disjoint ranges without
/// coordination. Implementations may block; nothing else in the storage
/// core does.
pub trait FileHandle {
    /// Returns the file path.
    fn path(&self) -> &Path;

    /// Returns the current file size in bytes.
    fn size(&self) -> IoResult<u64>;

    /// Reads data from the file at the specified offset.
    ///
    /// Returns the number of bytes read; fewer than `buf.len()` bytes
    /// means EOF was reached.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> IoResult<usize>;

    /// Reads exactly `buf.len()` bytes at the specified offset.
    ///
    /// # Errors
    ///
    /// Returns a short-read error if EOF arrives before the buffer fills.
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> IoResult<()> {
        let mut total = 0;
        while total < buf.len() {
            let n = self.read_at(&mut buf[total..], offset + total as u64)?;
            if n == 0 {
                return Err(IoError::short_read(buf.len(), total));
            }
            total += n;
        }
        Ok(())
    }

    /// Writes data to the file at the specified offset.
    ///
    /// Returns the number of bytes written.
    fn write_at(&self, buf: &[u8], offset: u64) -> IoResult<usize>;

    /// Writes all of `buf` at the specified offset.
    ///
    /// # Errors
    ///
    /// Returns a short-write error if the file stops accepting bytes.
    fn write_all_at(&self, buf: &[u8], offset: u64) -> IoResult<()> {
        let mut total = 0;
        while total < buf.len() {
            let n = self.write_at(&buf[total..], offset + total as u64)?;
            if n == 0 {
                return Err(IoError::short_write(buf.len(), total));
            }
            total += n;
        }
        Ok(())
    }

    /// Syncs all data and metadata to disk.
    fn sync(&self) -> IoResult<()>;

    /// Syncs only data (not metadata) to disk.
    fn datasync(&self) -> IoResult<()>;

    /// Truncates or extends the file to the specified size.
    fn set_len(&self, size: u64) -> IoResult<()>;
}
