//! # strata-storage
//!
//! Page-oriented storage core for the Strata database engine.
//!
//! This crate implements the lowest durable layer of the database:
//!
//! - **Page** ([`page`]): the fixed-size unit of I/O, with a checksummed
//!   header, bounds-checked byte access, and a defined on-disk format
//! - **File** ([`file`]): positioned (pread/pwrite) file I/O behind a
//!   small trait seam
//! - **PageCache** ([`cache`]): bounded in-memory page residence with
//!   approximate-LRU eviction
//! - **Pager** ([`pager`]): the façade mapping page identifiers to file
//!   offsets, reading and writing pages through the cache
//!
//! A data file is a flat array of 4096-byte pages indexed by identifier:
//! no file header, no trailer: the format is defined entirely by the
//! per-page header. Holes read back as zero bytes and materialize as
//! fresh pages.
//!
//! Everything here is single-threaded cooperative: no component is
//! internally thread-safe, and only pager I/O blocks. Callers needing
//! shared access wrap a component in their own synchronization.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod file;
pub mod page;
pub mod pager;

pub use page::{Page, PageKind};
pub use pager::Pager;
