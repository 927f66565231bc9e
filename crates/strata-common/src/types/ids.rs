//! Identifier types for Strata.
//!
//! Type-safe wrappers around numeric identifiers, preventing accidental
//! misuse of different ID kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::PAGE_SIZE;

/// Page identifier - uniquely identifies a page in a data file.
///
/// Pages are the fundamental unit of storage. Each page is identified by a
/// 32-bit identifier that is stable for the life of the file; identifier 0
/// is a valid page. The byte offset of a page in its file is
/// `id * PAGE_SIZE`.
///
/// # Example
///
/// ```rust
/// use strata_common::types::PageId;
///
/// let page = PageId::new(42);
/// assert_eq!(page.as_u32(), 42);
/// assert_eq!(page.offset(), 42 * 4096);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PageId(u32);

impl PageId {
    /// Creates a new `PageId` from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the byte offset of this page in its data file.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.0 as u64 * PAGE_SIZE as u64
    }
}

impl fmt::Debug for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageId({})", self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PageId {
    #[inline]
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<PageId> for u32 {
    #[inline]
    fn from(id: PageId) -> Self {
        id.0
    }
}
