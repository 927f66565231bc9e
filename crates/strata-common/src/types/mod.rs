//! Core types for Strata.

mod ids;

pub use ids::PageId;
