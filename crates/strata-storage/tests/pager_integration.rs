//! End-to-end tests exercising the pager against real files.

use tempfile::tempdir;

use strata_common::types::PageId;
use strata_storage::file::{FileHandle, OpenOptions, StandardFile};
use strata_storage::page::{PageError, PAGE_SIZE};
use strata_storage::pager::{Pager, PagerConfig, PagerError};

#[test]
fn write_read_round_trip_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.db");

    {
        let mut pager = Pager::new(&path).unwrap();
        let page = pager.get(PageId::new(1)).unwrap();
        page.write(32, b"Hello, Database!").unwrap();
        pager.write(PageId::new(1)).unwrap();
        pager.sync().unwrap();
    }

    let mut pager = Pager::new(&path).unwrap();
    let page = pager.get(PageId::new(1)).unwrap();
    assert_eq!(page.read(32, 16).unwrap(), b"Hello, Database!");
}

#[test]
fn on_disk_corruption_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.db");

    {
        let mut pager = Pager::new(&path).unwrap();
        let page = pager.get(PageId::new(0)).unwrap();
        page.write(64, b"important record").unwrap();
        pager.write(PageId::new(0)).unwrap();
    }

    // Flip byte 30 (inside the data region) directly on disk.
    {
        let file = StandardFile::open(&path, OpenOptions::for_write()).unwrap();
        let mut byte = [0u8; 1];
        file.read_exact_at(&mut byte, 30).unwrap();
        byte[0] ^= 0x01;
        file.write_all_at(&byte, 30).unwrap();
        file.sync().unwrap();
    }

    let mut pager = Pager::new(&path).unwrap();
    let err = pager.get(PageId::new(0)).unwrap_err();
    assert!(matches!(
        err,
        PagerError::Page(PageError::ChecksumMismatch { .. })
    ));
}

#[test]
fn batch_write_lands_every_page_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.db");

    {
        let mut pager = Pager::new(&path).unwrap();
        for id in [5u32, 1, 3] {
            let page = pager.get(PageId::new(id)).unwrap();
            let marker = [id as u8; 8];
            page.write(100, &marker).unwrap();
        }
        pager
            .write_batch(&[PageId::new(5), PageId::new(1), PageId::new(3)])
            .unwrap();

        // Offsets ascend with the identifiers: the high-water mark covers
        // page 5 and the file really is six pages long.
        assert_eq!(pager.file_size(), 6 * PAGE_SIZE as u64);
    }

    let file = StandardFile::open(&path, OpenOptions::for_read()).unwrap();
    assert_eq!(file.size().unwrap(), 6 * PAGE_SIZE as u64);

    let mut pager = Pager::new(&path).unwrap();
    for id in [1u32, 3, 5] {
        let page = pager.get(PageId::new(id)).unwrap();
        assert_eq!(page.read(100, 8).unwrap(), &[id as u8; 8]);
    }
}

#[test]
fn hole_materializes_fresh_page_and_write_extends_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sparse.db");

    let mut pager = Pager::new(&path).unwrap();
    assert_eq!(pager.file_size(), 0);

    // Reading far past EOF yields a fresh page and writes nothing.
    let page = pager.get(PageId::new(7)).unwrap();
    assert_eq!(page.id(), PageId::new(7));
    assert_eq!(pager.file_size(), 0);

    // Flushing it extends the file to cover pages 0..=7.
    pager.write(PageId::new(7)).unwrap();
    assert_eq!(pager.file_size(), 8 * PAGE_SIZE as u64);

    let file = StandardFile::open(&path, OpenOptions::for_read()).unwrap();
    assert_eq!(file.size().unwrap(), 8 * PAGE_SIZE as u64);
}

#[test]
fn mutations_survive_only_after_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flush.db");

    {
        let mut pager = Pager::new(&path).unwrap();
        let page = pager.get(PageId::new(0)).unwrap();
        page.write(200, b"flushed").unwrap();
        pager.write(PageId::new(0)).unwrap();

        // A second mutation is left unflushed on purpose.
        let page = pager.get(PageId::new(0)).unwrap();
        page.write(300, b"unflushed").unwrap();
    }

    let mut pager = Pager::new(&path).unwrap();
    let page = pager.get(PageId::new(0)).unwrap();
    assert_eq!(page.read(200, 7).unwrap(), b"flushed");
    assert_eq!(page.read(300, 9).unwrap(), &[0u8; 9]);
}

#[test]
fn many_pages_cycle_through_a_small_cache() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cycle.db");

    let total = 32u32;
    {
        let mut pager = Pager::with_config(&path, PagerConfig::new(4)).unwrap();
        for id in 0..total {
            let page = pager.get(PageId::new(id)).unwrap();
            page.write(500, &id.to_le_bytes()).unwrap();
            // Flush immediately: the 4-page cache will evict soon after.
            pager.write(PageId::new(id)).unwrap();
        }
        assert!(pager.cached_pages() <= 4);
        assert!(pager.cache_stats().evictions() >= (total as u64 - 4));
    }

    let mut pager = Pager::with_config(&path, PagerConfig::new(4)).unwrap();
    for id in 0..total {
        let page = pager.get(PageId::new(id)).unwrap();
        assert_eq!(page.read(500, 4).unwrap(), &id.to_le_bytes());
    }
}
