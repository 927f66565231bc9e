//! # strata-common
//!
//! Common types and utilities for the Strata storage engine.
//!
//! This crate provides the foundation the storage layer is built on:
//!
//! - **Types**: the [`PageId`](types::PageId) identifier
//! - **Constants**: page geometry and pool sizing
//! - **Memory**: aligned buffers and the page-buffer [`MemoryPool`](memory::MemoryPool)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod memory;
pub mod types;

pub use types::PageId;
