//! Standard file I/O implementation.
//!
//! Cross-platform positioned I/O over `std::fs::File`. On Unix the
//! `pread`/`pwrite` syscalls are used directly; elsewhere the handle falls
//! back to seek-then-read under its mutex, which preserves the positioned
//! semantics at the cost of serializing accesses.

use std::fs::File as StdFile;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::error::{IoError, IoResult};
use super::handle::FileHandle;
use super::options::OpenOptions;

/// Standard file implementation.
pub struct StandardFile {
    /// The underlying file. The mutex backs the non-Unix seek fallback and
    /// keeps the handle usable behind a shared reference everywhere.
    file: Mutex<StdFile>,
    path: PathBuf,
    writable: bool,
}

impl StandardFile {
    /// Opens a file with the specified options.
    pub fn open(path: impl AsRef<Path>, options: OpenOptions) -> IoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let writable = options.is_write();

        let file = options
            .to_std_options()
            .open(&path)
            .map_err(|e| IoError::from_io_with_path(e, &path))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
            writable,
        })
    }

    fn check_writable(&self, operation: &'static str) -> IoResult<()> {
        if self.writable {
            Ok(())
        } else {
            Err(IoError::InvalidOperation {
                operation,
                mode: "read-only",
            })
        }
    }
}

impl FileHandle for StandardFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn size(&self) -> IoResult<u64> {
        let file = self.file.lock();
        Ok(file.metadata()?.len())
    }

    #[cfg(unix)]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> IoResult<usize> {
        use std::os::unix::fs::FileExt;

        let file = self.file.lock();
        Ok(file.read_at(buf, offset)?)
    }

    #[cfg(not(unix))]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> IoResult<usize> {
        use std::io::{Read, Seek, SeekFrom};

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        Ok(file.read(buf)?)
    }

    #[cfg(unix)]
    fn write_at(&self, buf: &[u8], offset: u64) -> IoResult<usize> {
        use std::os::unix::fs::FileExt;

        self.check_writable("write")?;
        let file = self.file.lock();
        Ok(file.write_at(buf, offset)?)
    }

    #[cfg(not(unix))]
    fn write_at(&self, buf: &[u8], offset: u64) -> IoResult<usize> {
        use std::io::{Seek, SeekFrom, Write};

        self.check_writable("write")?;
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        Ok(file.write(buf)?)
    }

    fn sync(&self) -> IoResult<()> {
        let file = self.file.lock();
        Ok(file.sync_all()?)
    }

    fn datasync(&self) -> IoResult<()> {
        let file = self.file.lock();
        Ok(file.sync_data()?)
    }

    fn set_len(&self, size: u64) -> IoResult<()> {
        self.check_writable("set_len")?;
        let file = self.file.lock();
        Ok(file.set_len(size)?)
    }
}

impl std::fmt::Debug for StandardFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardFile")
            .field("path", &self.path)
            .field("writable", &self.writable)
            .finish()
    }
}
