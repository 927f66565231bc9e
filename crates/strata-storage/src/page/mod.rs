//! Page layout and disk format.
//!
//! All data is organized into fixed-size 4 KB pages. A page is a 24-byte
//! checksummed header followed by a raw data region; offsets into a page
//! are always measured from the page start, so the first writable byte is
//! at offset [`PAGE_HEADER_SIZE`].
//!
//! ```text
//! +------------------+  offset 0
//! |   Page Header    |  24 bytes, checksummed
//! +------------------+  offset 24
//! |   Data Region    |  4072 bytes
//! |                  |
//! +------------------+  offset 4096
//! ```
//!
//! The page is the sole enforcer of its own integrity: every mutation
//! re-establishes the checksum, and [`Page::deserialize`] refuses bytes
//! whose checksum or free-space offset is inconsistent.

mod checksum;
mod error;
mod header;
mod types;

pub use checksum::compute_page_checksum;
pub use error::{PageError, PageResult};
pub use header::PageHeader;
pub use types::PageKind;

use strata_common::memory::AlignedBuffer;
use strata_common::types::PageId;

/// Size of a page in bytes (4 KB).
pub const PAGE_SIZE: usize = strata_common::constants::PAGE_SIZE;

/// Size of the page header in bytes.
pub const PAGE_HEADER_SIZE: usize = strata_common::constants::PAGE_HEADER_SIZE;

/// Usable data bytes per page.
pub const PAGE_DATA_SIZE: usize = strata_common::constants::PAGE_DATA_SIZE;

/// Alignment of serialized page buffers.
const SERIALIZE_ALIGNMENT: usize = strata_common::constants::BUFFER_ALIGNMENT;

/// In-memory image of one disk block.
///
/// The data region lives inline in the struct, so a `Page` is a single
/// allocation wherever its owner puts it and serializes with one copy.
///
/// # Example
///
/// ```rust
/// use strata_storage::page::{Page, PageKind, PAGE_HEADER_SIZE};
/// use strata_common::types::PageId;
///
/// let mut page = Page::new(PageKind::Data, PageId::new(1));
/// page.write(PAGE_HEADER_SIZE, b"hello").unwrap();
/// assert_eq!(page.read(PAGE_HEADER_SIZE, 5).unwrap(), b"hello");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Page {
    header: PageHeader,
    data: [u8; PAGE_DATA_SIZE],
}

impl Page {
    /// Creates a zero-filled page of the given kind and identifier.
    ///
    /// The free-space offset starts right after the header; linkage fields
    /// start cleared.
    #[must_use]
    pub fn new(kind: PageKind, id: PageId) -> Self {
        let mut page = Self {
            header: PageHeader {
                kind,
                flags: 0,
                item_count: 0,
                free_space_offset: PAGE_HEADER_SIZE as u16,
                page_id: id.as_u32(),
                parent_id: 0,
                next_page: 0,
                prev_page: 0,
                checksum: 0,
            },
            data: [0u8; PAGE_DATA_SIZE],
        };
        page.refresh_checksum();
        page
    }

    // =========================================================================
    // Header accessors
    // =========================================================================

    /// Returns the page identifier recorded in the header.
    #[inline]
    #[must_use]
    pub fn id(&self) -> PageId {
        PageId::new(self.header.page_id)
    }

    /// Returns the page kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PageKind {
        self.header.kind
    }

    /// Sets the page kind.
    pub fn set_kind(&mut self, kind: PageKind) {
        self.header.kind = kind;
        self.refresh_checksum();
    }

    /// Returns the reserved flag bits.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> u8 {
        self.header.flags
    }

    /// Sets the reserved flag bits.
    pub fn set_flags(&mut self, flags: u8) {
        self.header.flags = flags;
        self.refresh_checksum();
    }

    /// Returns the caller-maintained record count.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> u16 {
        self.header.item_count
    }

    /// Sets the caller-maintained record count.
    pub fn set_item_count(&mut self, count: u16) {
        self.header.item_count = count;
        self.refresh_checksum();
    }

    /// Returns the compact parent slot for index pages; 0 = none.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> u16 {
        self.header.parent_id
    }

    /// Sets the compact parent slot; 0 clears it.
    pub fn set_parent_id(&mut self, parent: u16) {
        self.header.parent_id = parent;
        self.refresh_checksum();
    }

    /// Returns the forward sibling, if linked.
    #[inline]
    #[must_use]
    pub fn next_page(&self) -> Option<PageId> {
        (self.header.next_page != 0).then(|| PageId::new(self.header.next_page))
    }

    /// Links or unlinks the forward sibling.
    pub fn set_next_page(&mut self, next: Option<PageId>) {
        self.header.next_page = next.map_or(0, PageId::as_u32);
        self.refresh_checksum();
    }

    /// Returns the backward sibling, if linked.
    #[inline]
    #[must_use]
    pub fn prev_page(&self) -> Option<PageId> {
        (self.header.prev_page != 0).then(|| PageId::new(self.header.prev_page))
    }

    /// Links or unlinks the backward sibling.
    pub fn set_prev_page(&mut self, prev: Option<PageId>) {
        self.header.prev_page = prev.map_or(0, PageId::as_u32);
        self.refresh_checksum();
    }

    /// Returns the offset of the first free byte, measured from the page
    /// start.
    #[inline]
    #[must_use]
    pub fn free_space_offset(&self) -> u16 {
        self.header.free_space_offset
    }

    /// Returns the number of free bytes between the free-space offset and
    /// the end of the page.
    #[inline]
    #[must_use]
    pub fn free_space(&self) -> u16 {
        PAGE_SIZE as u16 - self.header.free_space_offset
    }

    // =========================================================================
    // Byte access
    // =========================================================================

    /// Copies `bytes` into the page at `offset` (measured from the page
    /// start) and advances the free-space offset to `offset + bytes.len()`.
    ///
    /// The free-space offset is advanced unconditionally; callers wanting
    /// append-only behavior are responsible for passing monotonic offsets.
    ///
    /// # Errors
    ///
    /// - [`PageError::InvalidOffset`] if `offset` lands inside the header
    /// - [`PageError::PageOverflow`] if the write would run past the page
    pub fn write(&mut self, offset: usize, bytes: &[u8]) -> PageResult<()> {
        if offset < PAGE_HEADER_SIZE {
            return Err(PageError::InvalidOffset {
                offset,
                min: PAGE_HEADER_SIZE,
                max: PAGE_SIZE,
            });
        }
        if offset + bytes.len() > PAGE_SIZE {
            return Err(PageError::PageOverflow {
                offset,
                len: bytes.len(),
            });
        }

        let start = offset - PAGE_HEADER_SIZE;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self.header.free_space_offset = (offset + bytes.len()) as u16;
        self.refresh_checksum();
        Ok(())
    }

    /// Borrows `len` bytes of the page at `offset` (measured from the page
    /// start). Does not mutate.
    ///
    /// # Errors
    ///
    /// - [`PageError::InvalidLength`] if `len` is zero
    /// - [`PageError::InvalidOffset`] if the range leaves the data region
    pub fn read(&self, offset: usize, len: usize) -> PageResult<&[u8]> {
        if len == 0 {
            return Err(PageError::InvalidLength);
        }
        if offset < PAGE_HEADER_SIZE || offset + len > PAGE_SIZE {
            return Err(PageError::InvalidOffset {
                offset,
                min: PAGE_HEADER_SIZE,
                max: PAGE_SIZE,
            });
        }

        let start = offset - PAGE_HEADER_SIZE;
        Ok(&self.data[start..start + len])
    }

    // =========================================================================
    // Serialization & integrity
    // =========================================================================

    /// Produces the exact on-disk representation: header first, data region
    /// second, checksum recomputed into the serialized header.
    ///
    /// The buffer is 8-byte aligned and exactly [`PAGE_SIZE`] bytes.
    #[must_use]
    pub fn serialize(&self) -> AlignedBuffer {
        let mut buf = AlignedBuffer::new(PAGE_SIZE, SERIALIZE_ALIGNMENT);
        self.header.write_to(&mut buf);
        buf[PAGE_HEADER_SIZE..].copy_from_slice(&self.data);

        let checksum = compute_page_checksum(
            &buf[..PageHeader::CHECKSUM_OFFSET],
            &buf[PAGE_HEADER_SIZE..],
        );
        buf[PageHeader::CHECKSUM_OFFSET..PAGE_HEADER_SIZE]
            .copy_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Reconstructs a page from its on-disk representation.
    ///
    /// # Errors
    ///
    /// - [`PageError::ChecksumMismatch`] if the stored checksum does not
    ///   match the recomputed one
    /// - [`PageError::InvalidFreeSpaceOffset`] if the free-space offset
    ///   lies outside the page
    ///
    /// # Panics
    ///
    /// Panics if `buf` is not exactly [`PAGE_SIZE`] bytes; handing this
    /// function a wrong-size buffer is a caller bug, not a data condition.
    pub fn deserialize(buf: &[u8]) -> PageResult<Self> {
        assert_eq!(buf.len(), PAGE_SIZE, "page buffer must be {PAGE_SIZE} bytes");

        let header = PageHeader::from_bytes(buf);

        let computed = compute_page_checksum(
            &buf[..PageHeader::CHECKSUM_OFFSET],
            &buf[PAGE_HEADER_SIZE..],
        );
        if computed != header.checksum {
            return Err(PageError::ChecksumMismatch {
                expected: header.checksum,
                computed,
            });
        }

        let offset = header.free_space_offset;
        if (offset as usize) < PAGE_HEADER_SIZE || (offset as usize) > PAGE_SIZE {
            return Err(PageError::InvalidFreeSpaceOffset { offset });
        }

        let mut data = [0u8; PAGE_DATA_SIZE];
        data.copy_from_slice(&buf[PAGE_HEADER_SIZE..]);
        Ok(Self { header, data })
    }

    /// Checks the page's integrity invariants.
    ///
    /// # Errors
    ///
    /// - [`PageError::ChecksumMismatch`] if the stored checksum is stale
    /// - [`PageError::InvalidFreeSpaceOffset`] if the free-space offset
    ///   lies outside the page
    pub fn validate(&self) -> PageResult<()> {
        let computed = self.compute_checksum();
        if computed != self.header.checksum {
            return Err(PageError::ChecksumMismatch {
                expected: self.header.checksum,
                computed,
            });
        }

        let offset = self.header.free_space_offset;
        if (offset as usize) < PAGE_HEADER_SIZE || (offset as usize) > PAGE_SIZE {
            return Err(PageError::InvalidFreeSpaceOffset { offset });
        }

        Ok(())
    }

    /// Compacts the data region in place.
    ///
    /// The valid prefix (everything below the free-space offset) is
    /// preserved byte-for-byte; the remainder is zero-filled and the
    /// checksum recomputed. The page does not track record boundaries, so
    /// nothing inside the prefix is rearranged. Idempotent.
    pub fn defragment(&mut self) {
        let valid = self.header.free_space_offset as usize - PAGE_HEADER_SIZE;
        self.data[valid..].fill(0);
        self.refresh_checksum();
    }

    /// Recomputes the checksum over the current header and data region.
    fn refresh_checksum(&mut self) {
        self.header.checksum = self.compute_checksum();
    }

    fn compute_checksum(&self) -> u32 {
        let header_bytes = self.header.to_bytes();
        compute_page_checksum(&header_bytes[..PageHeader::CHECKSUM_OFFSET], &self.data)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id())
            .field("kind", &self.header.kind)
            .field("item_count", &self.header.item_count)
            .field("free_space_offset", &self.header.free_space_offset)
            .field("checksum", &format_args!("{:#010x}", self.header.checksum))
            .finish_non_exhaustive()
    }
}
