//! Memory primitives for the storage engine.
//!
//! - **Aligned buffers**: page-sized allocations with a guaranteed
//!   alignment, suitable for serialization and positioned I/O.
//! - **Memory pool**: amortized allocation of page buffers with a ring
//!   fast path for recently released buffers.

mod aligned;
mod pool;

pub use aligned::AlignedBuffer;
pub use pool::{MemoryPool, PoolError};
