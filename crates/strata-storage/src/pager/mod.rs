//! The pager: façade between page identifiers and the backing file.
//!
//! The pager translates `PageId -> Page` requests against a data file laid
//! out as a flat array of 4 KB pages (offset = id × page size). Resident
//! pages live in a [`PageCache`], which doubles as the pager's page table:
//! a page is either in the cache or on disk, never both in memory. Reads
//! stage through buffers recycled by a [`MemoryPool`].
//!
//! The pager tracks no dirty bits and evicts without write-back; callers
//! must [`write`](Pager::write) a modified page before letting it age out
//! of the cache.

mod config;
mod error;

pub use config::PagerConfig;
pub use error::{PagerError, PagerResult};

use std::path::Path;

use tracing::{debug, trace, warn};

use strata_common::memory::MemoryPool;
use strata_common::types::PageId;

use crate::cache::{CacheStats, PageCache};
use crate::file::{FileHandle, IoError, OpenOptions, StandardFile};
use crate::page::{Page, PageError, PageKind, PAGE_SIZE};

/// Outcome of reading one page-sized range from the file.
enum PageRead {
    /// The range is entirely past EOF (or a hole at the file tail).
    Empty,
    /// The full page was read into the staging buffer.
    Full,
}

/// Maps page identifiers to file offsets and keeps recently used pages
/// resident.
///
/// # Example
///
/// ```rust,no_run
/// use strata_storage::pager::Pager;
/// use strata_storage::page::PAGE_HEADER_SIZE;
/// use strata_common::types::PageId;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pager = Pager::new("strata.db")?;
///
/// let page = pager.get(PageId::new(1))?;
/// page.write(PAGE_HEADER_SIZE, b"hello")?;
/// pager.write(PageId::new(1))?;
/// # Ok(())
/// # }
/// ```
pub struct Pager {
    file: StandardFile,
    cache: PageCache,
    pool: MemoryPool,
    /// High-water mark of bytes known to be in the file.
    file_size: u64,
}

impl Pager {
    /// Opens or creates a data file with the default configuration.
    pub fn new(path: impl AsRef<Path>) -> PagerResult<Self> {
        Self::with_config(path, PagerConfig::default())
    }

    /// Opens or creates a data file.
    ///
    /// The file is opened read/write and never truncated; an existing file
    /// seeds the pager's size high-water mark.
    pub fn with_config(path: impl AsRef<Path>, config: PagerConfig) -> PagerResult<Self> {
        config
            .validate()
            .map_err(|message| PagerError::Config { message })?;

        let file = StandardFile::open(path.as_ref(), OpenOptions::for_database())?;
        let file_size = file.size()?;
        debug!(
            path = %path.as_ref().display(),
            file_size,
            cache_capacity = config.cache_capacity,
            "opened data file"
        );

        Ok(Self {
            file,
            cache: PageCache::new(config.cache_capacity),
            pool: MemoryPool::new(config.pool_buffers, PAGE_SIZE)?,
            file_size,
        })
    }

    /// Returns the page with the given identifier, reading it from the
    /// file if it is not resident.
    ///
    /// A read entirely past the end of the file materializes a fresh
    /// zeroed [`PageKind::Data`] page with that identifier: holes are how
    /// new pages are born. The returned borrow is invalidated by any
    /// subsequent call that may insert into the pager.
    ///
    /// # Errors
    ///
    /// - [`PagerError::Io`] on file errors, including a short (torn) page
    /// - [`PagerError::Page`] if the on-disk checksum does not verify
    /// - [`PagerError::PageIdMismatch`] if the on-disk header records a
    ///   different identifier
    pub fn get(&mut self, id: PageId) -> PagerResult<&mut Page> {
        if !self.cache.contains(id) {
            let page = self.load(id)?;
            if let Some(displaced) = self.cache.put(page) {
                trace!(evicted = %displaced.id(), "cache at capacity, page dropped");
            }
        } else {
            trace!(page = %id, "cache hit");
        }

        Ok(self.cache.get(id).expect("page resident after load"))
    }

    /// Serializes the resident page with the given identifier and writes
    /// it at its file offset.
    ///
    /// On success the size high-water mark covers the page. Flushing does
    /// not refresh the page's cache recency.
    ///
    /// # Errors
    ///
    /// [`PagerError::PageNotFound`] if the page is not resident; I/O
    /// failures propagate with `file_size` untouched.
    pub fn write(&mut self, id: PageId) -> PagerResult<()> {
        let page = self
            .cache
            .peek(id)
            .ok_or(PagerError::PageNotFound { page_id: id })?;

        let offset = id.offset();
        let buf = page.serialize();
        self.file.write_all_at(&buf, offset)?;

        let end = offset + PAGE_SIZE as u64;
        if end > self.file_size {
            debug!(page = %id, file_size = end, "file extended");
            self.file_size = end;
        }
        trace!(page = %id, offset, "page written");
        Ok(())
    }

    /// Writes a batch of resident pages in ascending identifier order.
    ///
    /// The input order is irrelevant; writes land at strictly
    /// non-decreasing file offsets. Duplicate identifiers are written once
    /// per occurrence. Atomicity is per page: a failure leaves earlier
    /// pages written.
    pub fn write_batch(&mut self, ids: &[PageId]) -> PagerResult<()> {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();

        for id in sorted {
            self.write(id)?;
        }
        Ok(())
    }

    /// Syncs file data and metadata to disk.
    pub fn sync(&self) -> PagerResult<()> {
        self.file.sync()?;
        Ok(())
    }

    /// Returns the size high-water mark in bytes.
    #[must_use]
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Returns the number of resident pages.
    #[must_use]
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Reads or materializes the page with the given identifier.
    fn load(&mut self, id: PageId) -> PagerResult<Page> {
        let offset = id.offset();
        let mut buf = self.pool.acquire()?;

        let result = match Self::read_page(&self.file, &mut buf, offset) {
            Ok(PageRead::Empty) => {
                debug!(page = %id, offset, "page past EOF, materializing fresh page");
                Ok(Page::new(PageKind::Data, id))
            }
            Ok(PageRead::Full) => match Page::deserialize(&buf) {
                Ok(page) if page.id() != id => Err(PagerError::PageIdMismatch {
                    expected: id,
                    found: page.id(),
                }),
                Ok(page) => Ok(page),
                Err(err @ PageError::ChecksumMismatch { .. }) => {
                    warn!(page = %id, offset, %err, "corrupt page");
                    Err(err.into())
                }
                Err(err) => Err(err.into()),
            },
            Err(err) => Err(err.into()),
        };

        self.pool.release(buf);
        result
    }

    /// Reads one page-sized range at `offset` into `buf`.
    ///
    /// Zero bytes at the first read mean the range is past EOF; anything
    /// between one byte and a full page is a torn page and surfaces as a
    /// short read.
    fn read_page(file: &StandardFile, buf: &mut [u8], offset: u64) -> Result<PageRead, IoError> {
        let mut total = 0;
        while total < buf.len() {
            let n = file.read_at(&mut buf[total..], offset + total as u64)?;
            if n == 0 {
                break;
            }
            total += n;
        }

        match total {
            0 => Ok(PageRead::Empty),
            n if n == buf.len() => Ok(PageRead::Full),
            n => Err(IoError::short_read(buf.len(), n)),
        }
    }
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("file", &self.file)
            .field("file_size", &self.file_size)
            .field("cached_pages", &self.cache.len())
            .finish()
    }
}
