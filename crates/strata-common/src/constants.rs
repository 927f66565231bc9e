//! System-wide constants for Strata.

// =============================================================================
// Page geometry
// =============================================================================

/// Size of a page in bytes (4 KB).
///
/// This is both the unit of I/O and the unit of addressability in a data
/// file: the page with identifier `n` lives at byte offset `n * PAGE_SIZE`.
pub const PAGE_SIZE: usize = 4 * 1024;

/// Size of the page header in bytes.
///
/// The header contains: kind (1), flags (1), item_count (2),
/// free_space_offset (2), page_id (4), parent_id (2), next_page (4),
/// prev_page (4), checksum (4) = 24 bytes.
pub const PAGE_HEADER_SIZE: usize = 24;

/// Usable data bytes per page.
pub const PAGE_DATA_SIZE: usize = PAGE_SIZE - PAGE_HEADER_SIZE;

// =============================================================================
// Memory pool
// =============================================================================

/// Alignment of pool buffers and serialization buffers, in bytes.
pub const BUFFER_ALIGNMENT: usize = 8;

/// Number of slots in the pool's recently-released ring.
pub const POOL_RING_SLOTS: usize = 32;

/// Number of buffers allocated per pool growth step.
pub const POOL_GROW_BATCH: usize = 16;

/// Default number of buffers a pager pre-allocates in its pool.
pub const DEFAULT_POOL_BUFFERS: usize = 16;

// =============================================================================
// Pager cache
// =============================================================================

/// Default number of pages a pager keeps resident.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
