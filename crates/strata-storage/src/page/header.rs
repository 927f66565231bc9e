//! Page header format.
//!
//! Every page starts with a 24-byte packed little-endian header:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//!   0       1   kind
//!   1       1   flags (reserved bits, carried verbatim)
//!   2       2   item_count
//!   4       2   free_space_offset (from page start; in [24, 4096])
//!   6       4   page_id
//!  10       2   parent_id (0 = none)
//!  12       4   next_page (0 = none)
//!  16       4   prev_page (0 = none)
//!  20       4   checksum (XXH3-64 of bytes [0, 20) and the data region,
//!                         truncated to 32 bits)
//! ```

use super::types::PageKind;
use super::PAGE_HEADER_SIZE;

/// Decoded page header.
///
/// A plain value type: mutating a header does not maintain the checksum.
/// [`Page`](super::Page) owns its header privately and re-establishes the
/// checksum invariant after every change; this type is exposed for code
/// that works with raw page buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    /// Page kind discriminant.
    pub kind: PageKind,
    /// Reserved flag bits, carried verbatim across round-trips.
    pub flags: u8,
    /// Caller-maintained record count.
    pub item_count: u16,
    /// Offset of the first free byte, measured from the page start.
    pub free_space_offset: u16,
    /// Identifier of the page; must match the slot the page is stored in.
    pub page_id: u32,
    /// Parent linkage for index pages; 0 = none.
    pub parent_id: u16,
    /// Forward sibling linkage; 0 = none.
    pub next_page: u32,
    /// Backward sibling linkage; 0 = none.
    pub prev_page: u32,
    /// Checksum over the preceding header bytes and the data region.
    pub checksum: u32,
}

impl PageHeader {
    /// Size of the encoded header in bytes.
    pub const SIZE: usize = PAGE_HEADER_SIZE;

    /// Byte offset of the checksum field within the header.
    pub const CHECKSUM_OFFSET: usize = 20;

    const OFFSET_KIND: usize = 0;
    const OFFSET_FLAGS: usize = 1;
    const OFFSET_ITEM_COUNT: usize = 2;
    const OFFSET_FREE_SPACE: usize = 4;
    const OFFSET_PAGE_ID: usize = 6;
    const OFFSET_PARENT_ID: usize = 10;
    const OFFSET_NEXT_PAGE: usize = 12;
    const OFFSET_PREV_PAGE: usize = 16;

    /// Decodes a header from the first [`Self::SIZE`] bytes of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than [`Self::SIZE`].
    pub fn from_bytes(data: &[u8]) -> Self {
        assert!(
            data.len() >= Self::SIZE,
            "buffer too small for page header"
        );

        Self {
            kind: PageKind::from_u8(data[Self::OFFSET_KIND]),
            flags: data[Self::OFFSET_FLAGS],
            item_count: read_u16(data, Self::OFFSET_ITEM_COUNT),
            free_space_offset: read_u16(data, Self::OFFSET_FREE_SPACE),
            page_id: read_u32(data, Self::OFFSET_PAGE_ID),
            parent_id: read_u16(data, Self::OFFSET_PARENT_ID),
            next_page: read_u32(data, Self::OFFSET_NEXT_PAGE),
            prev_page: read_u32(data, Self::OFFSET_PREV_PAGE),
            checksum: read_u32(data, Self::CHECKSUM_OFFSET),
        }
    }

    /// Encodes the header into the first [`Self::SIZE`] bytes of `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than [`Self::SIZE`].
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(
            data.len() >= Self::SIZE,
            "buffer too small for page header"
        );

        data[Self::OFFSET_KIND] = self.kind.as_u8();
        data[Self::OFFSET_FLAGS] = self.flags;
        write_u16(data, Self::OFFSET_ITEM_COUNT, self.item_count);
        write_u16(data, Self::OFFSET_FREE_SPACE, self.free_space_offset);
        write_u32(data, Self::OFFSET_PAGE_ID, self.page_id);
        write_u16(data, Self::OFFSET_PARENT_ID, self.parent_id);
        write_u32(data, Self::OFFSET_NEXT_PAGE, self.next_page);
        write_u32(data, Self::OFFSET_PREV_PAGE, self.prev_page);
        write_u32(data, Self::CHECKSUM_OFFSET, self.checksum);
    }

    /// Encodes the header into a fresh byte array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        self.write_to(&mut bytes);
        bytes
    }
}

#[inline]
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn write_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
