use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// Default number of idle buffers a pool keeps.
pub const DEFAULT_RETAINED_BUFFERS: usize = 16;

/// Thread-safe pool of reusable char buffers.
///
/// Buffers are borrowed with [`BufferPool::acquire`] and handed back by the
/// guard's `Drop`, so every exit path (including unwinding out of a
/// processor) returns the buffer exactly once. At most `retain` idle
/// buffers are kept; extra returns are freed.
#[derive(Debug)]
pub struct BufferPool {
    slots: Mutex<Vec<Vec<char>>>,
    retain: usize,
}

pub(super) static SHARED: BufferPool = BufferPool::new(DEFAULT_RETAINED_BUFFERS);

impl BufferPool {
    /// An empty pool keeping at most `retain` idle buffers.
    #[must_use]
    pub const fn new(retain: usize) -> Self {
        Self {
            slots: parking_lot::const_mutex(Vec::new()),
            retain,
        }
    }

    /// The process-wide pool used by the shared allocator.
    #[must_use]
    pub fn shared() -> &'static BufferPool {
        &SHARED
    }

    /// Borrows a zeroed buffer of exactly `length` chars.
    pub fn acquire(&self, length: usize) -> PooledBuffer<'_> {
        let reused = {
            let mut slots = self.slots.lock();
            slots
                .iter()
                .position(|buffer| buffer.capacity() >= length)
                .map(|at| slots.swap_remove(at))
        };
        let mut buffer = reused.unwrap_or_else(|| {
            log::debug!("buffer pool miss, allocating {length} chars");
            Vec::with_capacity(length)
        });
        buffer.clear();
        buffer.resize(length, '\0');
        PooledBuffer { buffer, pool: self }
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.slots.lock().len()
    }

    fn release(&self, buffer: Vec<char>) {
        let mut slots = self.slots.lock();
        if slots.len() < self.retain {
            slots.push(buffer);
        }
    }
}

/// A buffer borrowed from a [`BufferPool`]; returned on drop.
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    buffer: Vec<char>,
    pool: &'p BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = [char];

    fn deref(&self) -> &[char] {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [char] {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(core::mem::take(&mut self.buffer));
    }
}
