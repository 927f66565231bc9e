//! Bounded in-memory page cache.
//!
//! Maps page identifiers to resident [`Page`]s with approximate-LRU
//! eviction: each entry carries a last-access timestamp at one-second
//! resolution, and inserting into a full cache evicts the entry with the
//! smallest `(last_access, id)` pair. The identifier tie-break keeps
//! eviction deterministic when a burst of accesses lands within one
//! second.
//!
//! The cache tracks neither pins nor dirtiness and never writes back; the
//! pager flushes pages before letting them age out.

mod stats;

pub use stats::CacheStats;

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use strata_common::types::PageId;

use crate::page::Page;

/// A cached page plus its recency bookkeeping.
#[derive(Debug)]
struct CacheEntry {
    page: Page,
    /// Seconds since the epoch at the last access.
    last_access: u64,
    /// Number of `get` hits since insertion.
    access_count: u64,
}

/// Bounded `PageId -> Page` table with approximate-LRU eviction.
///
/// Borrows returned by [`get`](Self::get) are invalidated by any
/// subsequent [`put`](Self::put); the borrow checker enforces this.
///
/// # Example
///
/// ```rust
/// use strata_storage::cache::PageCache;
/// use strata_storage::page::{Page, PageKind};
/// use strata_common::types::PageId;
///
/// let mut cache = PageCache::new(2);
/// cache.put(Page::new(PageKind::Data, PageId::new(1)));
/// assert!(cache.get(PageId::new(1)).is_some());
/// assert!(cache.get(PageId::new(2)).is_none());
/// ```
#[derive(Debug)]
pub struct PageCache {
    entries: HashMap<PageId, CacheEntry>,
    max_size: usize,
    stats: CacheStats,
}

impl PageCache {
    /// Creates an empty cache holding at most `max_size` pages.
    ///
    /// A capacity of zero is clamped to one.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: HashMap::with_capacity(max_size),
            max_size,
            stats: CacheStats::new(),
        }
    }

    /// Returns the number of resident pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pages are resident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of resident pages.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Returns true if the page is resident, without touching recency.
    #[must_use]
    pub fn contains(&self, id: PageId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Looks up a page, refreshing its last-access timestamp and bumping
    /// its access counter.
    pub fn get(&mut self, id: PageId) -> Option<&mut Page> {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.last_access = unix_now_secs();
                entry.access_count += 1;
                self.stats.record_hit();
                Some(&mut entry.page)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Looks up a page without refreshing recency or counting the access.
    #[must_use]
    pub fn peek(&self, id: PageId) -> Option<&Page> {
        self.entries.get(&id).map(|entry| &entry.page)
    }

    /// Inserts a page, keyed by the identifier in its header.
    ///
    /// Re-inserting a resident identifier replaces the page. Inserting a
    /// new identifier into a full cache first evicts the least recently
    /// used entry (ties broken by smallest identifier). The displaced
    /// page (evicted or replaced) is returned; it is discarded as-is,
    /// never written back.
    pub fn put(&mut self, page: Page) -> Option<Page> {
        let id = page.id();
        self.stats.record_insert();

        let displaced = if self.entries.contains_key(&id) {
            self.entries.remove(&id).map(|entry| entry.page)
        } else if self.entries.len() >= self.max_size {
            self.evict()
        } else {
            None
        };

        self.entries.insert(
            id,
            CacheEntry {
                page,
                last_access: unix_now_secs(),
                access_count: 0,
            },
        );
        displaced
    }

    /// Returns the access count of a resident page; test and telemetry
    /// hook.
    #[must_use]
    pub fn access_count(&self, id: PageId) -> Option<u64> {
        self.entries.get(&id).map(|entry| entry.access_count)
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Evicts the entry with the smallest `(last_access, id)` pair.
    fn evict(&mut self) -> Option<Page> {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(id, entry)| (entry.last_access, id.as_u32()))
            .map(|(id, _)| *id)?;

        self.stats.record_eviction();
        self.entries.remove(&victim).map(|entry| entry.page)
    }

    /// Overrides an entry's last-access timestamp. Eviction order is a
    /// function of these timestamps, so tests pin them explicitly.
    #[cfg(test)]
    fn set_last_access(&mut self, id: PageId, last_access: u64) {
        self.entries
            .get_mut(&id)
            .expect("entry resident")
            .last_access = last_access;
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageKind;

    fn page(id: u32) -> Page {
        Page::new(PageKind::Data, PageId::new(id))
    }

    #[test]
    fn test_put_and_get() {
        let mut cache = PageCache::new(4);
        assert!(cache.is_empty());
        cache.put(page(1));

        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
        assert!(cache.contains(PageId::new(1)));
        assert_eq!(cache.get(PageId::new(1)).unwrap().id(), PageId::new(1));
        assert!(cache.get(PageId::new(2)).is_none());
    }

    #[test]
    fn test_get_returns_mutable_page() {
        let mut cache = PageCache::new(2);
        cache.put(page(1));

        let resident = cache.get(PageId::new(1)).unwrap();
        resident.write(64, b"mutated in place").unwrap();

        assert_eq!(
            cache.peek(PageId::new(1)).unwrap().read(64, 16).unwrap(),
            b"mutated in place"
        );
    }

    #[test]
    fn test_access_counting() {
        let mut cache = PageCache::new(2);
        cache.put(page(1));
        assert_eq!(cache.access_count(PageId::new(1)), Some(0));

        assert!(cache.get(PageId::new(1)).is_some());
        assert!(cache.get(PageId::new(1)).is_some());
        assert_eq!(cache.access_count(PageId::new(1)), Some(2));

        // peek does not count.
        assert!(cache.peek(PageId::new(1)).is_some());
        assert_eq!(cache.access_count(PageId::new(1)), Some(2));
    }

    #[test]
    fn test_eviction_by_timestamp() {
        let mut cache = PageCache::new(2);
        cache.put(page(10));
        cache.put(page(20));
        cache.set_last_access(PageId::new(10), 100);
        cache.set_last_access(PageId::new(20), 101);

        cache.put(page(30));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(PageId::new(10)));
        assert!(cache.contains(PageId::new(20)));
        assert!(cache.contains(PageId::new(30)));
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_eviction_tie_broken_by_smallest_id() {
        let mut cache = PageCache::new(3);
        cache.put(page(7));
        cache.put(page(3));
        cache.put(page(5));
        for id in [3, 5, 7] {
            cache.set_last_access(PageId::new(id), 200);
        }

        cache.put(page(9));

        assert!(!cache.contains(PageId::new(3)));
        assert!(cache.contains(PageId::new(5)));
        assert!(cache.contains(PageId::new(7)));
        assert!(cache.contains(PageId::new(9)));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = PageCache::new(2);
        cache.put(page(1));
        cache.put(page(2));
        cache.set_last_access(PageId::new(1), 100);
        cache.set_last_access(PageId::new(2), 100);

        // Touch page 1 so page 2 becomes the victim despite the id
        // tie-break favoring page 1.
        assert!(cache.get(PageId::new(1)).is_some());
        cache.set_last_access(PageId::new(1), 300);

        cache.put(page(3));
        assert!(cache.contains(PageId::new(1)));
        assert!(!cache.contains(PageId::new(2)));
    }

    #[test]
    fn test_reinsert_replaces_without_eviction() {
        let mut cache = PageCache::new(2);
        cache.put(page(1));
        cache.put(page(2));

        let mut replacement = page(1);
        replacement.set_item_count(7);
        let displaced = cache.put(replacement);

        assert_eq!(cache.len(), 2);
        assert_eq!(displaced.unwrap().item_count(), 0);
        assert_eq!(cache.peek(PageId::new(1)).unwrap().item_count(), 7);
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_eviction_returns_displaced_page() {
        let mut cache = PageCache::new(1);
        cache.put(page(1));
        let displaced = cache.put(page(2));
        assert_eq!(displaced.unwrap().id(), PageId::new(1));
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut cache = PageCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.put(page(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats_hits_and_misses() {
        let mut cache = PageCache::new(2);
        cache.put(page(1));

        assert!(cache.get(PageId::new(1)).is_some());
        assert!(cache.get(PageId::new(2)).is_none());

        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().inserts(), 1);
    }
}
