//! Memory pool for page-sized buffer allocations.
//!
//! The pool amortizes allocation cost for the buffers the pager stages
//! page I/O through. Released buffers land in a small fixed-capacity ring
//! first, so the buffers a caller just touched are the first ones handed
//! back out while their cache lines are still warm; the ring overflows
//! into an unordered free list.
//!
//! A buffer is owned by at most one holder at a time: `acquire` moves a
//! buffer out of the pool and `release` moves it back. The pool never
//! zeroes a buffer on release, so callers must treat re-acquired buffers
//! as uninitialized.

use thiserror::Error;

use crate::constants::{BUFFER_ALIGNMENT, POOL_GROW_BATCH, POOL_RING_SLOTS};

use super::aligned::AlignedBuffer;

/// Errors produced by the memory pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The underlying allocator could not provide a buffer.
    #[error("out of memory allocating a {size}-byte pool buffer")]
    OutOfMemory {
        /// Requested buffer size in bytes.
        size: usize,
    },
}

/// A bounded producer/consumer of fixed-size, 8-byte-aligned byte buffers.
///
/// # Example
///
/// ```rust
/// use strata_common::memory::MemoryPool;
///
/// let mut pool = MemoryPool::new(4, 4096).unwrap();
/// let buffer = pool.acquire().unwrap();
/// assert_eq!(buffer.len(), 4096);
/// pool.release(buffer);
/// ```
pub struct MemoryPool {
    /// Size of every buffer in the pool, in bytes.
    buffer_size: usize,
    /// Idle buffers outside the ring. Popped from the tail.
    free: Vec<AlignedBuffer>,
    /// Fixed-capacity ring of the most recently released buffers.
    ring: [Option<AlignedBuffer>; POOL_RING_SLOTS],
    /// Index of the oldest occupied ring slot.
    ring_head: usize,
    /// Number of occupied ring slots.
    ring_len: usize,
    /// Buffers allocated over the pool's lifetime, in-flight ones included.
    total_buffers: usize,
}

impl MemoryPool {
    /// Creates a pool with `initial_buffers` buffers of `buffer_size` bytes
    /// allocated up front.
    ///
    /// All initial buffers start on the free list; the ring starts empty.
    pub fn new(initial_buffers: usize, buffer_size: usize) -> Result<Self, PoolError> {
        assert!(buffer_size > 0, "buffer_size must be greater than 0");

        let mut pool = Self {
            buffer_size,
            free: Vec::with_capacity(initial_buffers),
            ring: std::array::from_fn(|_| None),
            ring_head: 0,
            ring_len: 0,
            total_buffers: 0,
        };
        pool.grow(initial_buffers)?;
        Ok(pool)
    }

    /// Returns the size of each buffer in bytes.
    #[inline]
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the number of buffers allocated over the pool's lifetime.
    #[inline]
    #[must_use]
    pub const fn total_buffers(&self) -> usize {
        self.total_buffers
    }

    /// Returns the number of buffers currently idle in the pool.
    #[inline]
    #[must_use]
    pub fn idle_buffers(&self) -> usize {
        self.ring_len + self.free.len()
    }

    /// Takes a buffer out of the pool.
    ///
    /// Dequeues from the ring head if the ring is non-empty, then pops the
    /// free-list tail, and grows the pool by [`POOL_GROW_BATCH`] buffers as
    /// a last resort.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::OutOfMemory`] if the pool is empty and the
    /// allocator cannot satisfy a growth step.
    pub fn acquire(&mut self) -> Result<AlignedBuffer, PoolError> {
        if self.ring_len > 0 {
            let slot = self.ring_head;
            self.ring_head = (self.ring_head + 1) % POOL_RING_SLOTS;
            self.ring_len -= 1;
            let buffer = self.ring[slot].take().expect("occupied ring slot");
            return Ok(buffer);
        }

        if let Some(buffer) = self.free.pop() {
            return Ok(buffer);
        }

        self.grow(POOL_GROW_BATCH)?;
        Ok(self.free.pop().expect("free list non-empty after growth"))
    }

    /// Returns a buffer to the pool.
    ///
    /// The buffer is enqueued at the ring tail if the ring has room,
    /// otherwise pushed onto the free list. Contents are not zeroed.
    ///
    /// # Panics
    ///
    /// Panics if the buffer's size does not match the pool's buffer size;
    /// a foreign buffer in the pool would hand later callers a wrong-size
    /// I/O buffer.
    pub fn release(&mut self, buffer: AlignedBuffer) {
        assert_eq!(
            buffer.len(),
            self.buffer_size,
            "buffer does not belong to this pool"
        );

        if self.ring_len < POOL_RING_SLOTS {
            let slot = (self.ring_head + self.ring_len) % POOL_RING_SLOTS;
            debug_assert!(self.ring[slot].is_none());
            self.ring[slot] = Some(buffer);
            self.ring_len += 1;
        } else {
            self.free.push(buffer);
        }
    }

    /// Allocates `count` fresh buffers onto the free list.
    fn grow(&mut self, count: usize) -> Result<(), PoolError> {
        self.free.reserve(count);
        for _ in 0..count {
            let buffer = AlignedBuffer::try_new(self.buffer_size, BUFFER_ALIGNMENT)
                .ok_or(PoolError::OutOfMemory {
                    size: self.buffer_size,
                })?;
            self.free.push(buffer);
            self.total_buffers += 1;
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPool")
            .field("buffer_size", &self.buffer_size)
            .field("total_buffers", &self.total_buffers)
            .field("idle_buffers", &self.idle_buffers())
            .field("ring_len", &self.ring_len)
            .finish()
    }
}
