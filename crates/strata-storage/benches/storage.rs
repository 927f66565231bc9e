//! Storage core benchmarks.
//!
//! Benchmarks for:
//! - Page serialization and deserialization
//! - Page checksum computation
//! - Memory pool acquire/release cycles
//! - Page cache put/get

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use strata_common::memory::MemoryPool;
use strata_common::types::PageId;
use strata_storage::cache::PageCache;
use strata_storage::page::{compute_page_checksum, Page, PageKind, PAGE_HEADER_SIZE, PAGE_SIZE};

/// Builds a page with a deterministic payload filling half the data region.
fn sample_page(id: u32) -> Page {
    let mut page = Page::new(PageKind::Data, PageId::new(id));
    let payload: Vec<u8> = (0..2048u32).map(|i| (i * 31 + id) as u8).collect();
    page.write(PAGE_HEADER_SIZE, &payload).unwrap();
    page
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("page/serialize");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));

    let page = sample_page(1);
    group.bench_function("serialize", |b| {
        b.iter(|| black_box(page.serialize()));
    });

    let buf = page.serialize();
    group.bench_function("deserialize", |b| {
        b.iter(|| black_box(Page::deserialize(black_box(&buf)).unwrap()));
    });

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("page/checksum");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));

    let buf = sample_page(1).serialize();
    group.bench_function("compute", |b| {
        b.iter(|| {
            black_box(compute_page_checksum(
                black_box(&buf[..20]),
                black_box(&buf[PAGE_HEADER_SIZE..]),
            ))
        });
    });

    group.finish();
}

fn bench_page_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("page/write");

    for size in [16usize, 256, 2048] {
        let payload = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}b"), |b| {
            let mut page = Page::new(PageKind::Data, PageId::new(1));
            b.iter(|| page.write(PAGE_HEADER_SIZE, black_box(&payload)).unwrap());
        });
    }

    group.finish();
}

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");

    group.bench_function("acquire_release", |b| {
        let mut pool = MemoryPool::new(16, PAGE_SIZE).unwrap();
        b.iter(|| {
            let buf = pool.acquire().unwrap();
            pool.release(black_box(buf));
        });
    });

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");

    group.bench_function("get_hit", |b| {
        let mut cache = PageCache::new(64);
        for id in 0..64 {
            cache.put(sample_page(id));
        }
        b.iter(|| {
            let _ = black_box(cache.get(PageId::new(17)));
        });
    });

    group.bench_function("put_with_eviction", |b| {
        let mut cache = PageCache::new(64);
        for id in 0..64 {
            cache.put(sample_page(id));
        }
        let mut next = 64u32;
        b.iter(|| {
            cache.put(sample_page(next));
            next = next.wrapping_add(1);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_serialize,
    bench_checksum,
    bench_page_write,
    bench_pool,
    bench_cache
);
criterion_main!(benches);
