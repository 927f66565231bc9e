//! Page checksum utilities.
//!
//! Checksums are the low 32 bits of an XXH3-64 hash. The truncation keeps
//! the header field at 4 bytes while the 64-bit hash keeps throughput high
//! on modern CPUs. The hash is seedless and byte-order independent, so a
//! page written on one platform verifies on any other.

use xxhash_rust::xxh3::Xxh3;

/// Computes a page checksum from the header prefix (the header bytes that
/// precede the checksum field) and the data region.
///
/// The two regions are fed to one hasher, so the result is identical to
/// hashing their concatenation without materializing it.
#[must_use]
pub fn compute_page_checksum(header_prefix: &[u8], data: &[u8]) -> u32 {
    let mut hasher = Xxh3::new();
    hasher.update(header_prefix);
    hasher.update(data);
    hasher.digest() as u32
}
