//! Lock-free pool of scratch buffers used to assemble log records.
//!
//! Every [`Logger::print`](crate::Logger::print) call borrows one buffer,
//! renders the record into it and hands the bytes to the sink in a single
//! write. Buffers are returned to the pool when the [`ScratchBuffer`] guard is
//! dropped, so early returns and failed writes never leak them.
//!
//! # Design
//!
//! The free-list is a bounded [`ArrayQueue`]. Acquiring pops a buffer (or
//! allocates a fresh one when the queue is empty); releasing clears the buffer
//! and pushes it back. When the queue is full, or when a buffer grew past the
//! retain limit while rendering an unusually large record, the buffer is
//! dropped instead of being kept alive for the rest of the process.
//!
//! # Thread Safety
//!
//! [`ArrayQueue`] is a multi-producer multi-consumer queue, so the pool needs
//! no lock of its own and is independent of any logger mutex.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

use crossbeam_queue::ArrayQueue;

/// Capacity of freshly allocated scratch buffers.
pub const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Buffers whose capacity exceeds this many bytes are not returned to the pool.
pub const DEFAULT_RETAIN_LIMIT: usize = 64 * 1024;

/// Bounded pool of reusable byte buffers.
#[derive(Debug)]
pub struct BufferPool {
    buffers: ArrayQueue<Vec<u8>>,
    retain_limit: usize,
}

impl BufferPool {
    /// Creates a pool retaining at most `max_buffers` idle buffers.
    ///
    /// A `max_buffers` of zero is raised to one.
    #[must_use]
    pub fn new(max_buffers: usize) -> Self {
        Self::with_retain_limit(max_buffers, DEFAULT_RETAIN_LIMIT)
    }

    /// Creates a pool that also drops buffers larger than `retain_limit` bytes.
    #[must_use]
    pub fn with_retain_limit(max_buffers: usize, retain_limit: usize) -> Self {
        Self {
            buffers: ArrayQueue::new(max_buffers.max(1)),
            retain_limit,
        }
    }

    /// Borrows an empty buffer from the pool.
    ///
    /// The buffer is recycled when one is idle and freshly allocated otherwise.
    /// It returns to the pool when the guard is dropped.
    pub fn acquire(&self) -> ScratchBuffer<'_> {
        let mut buffer = self
            .buffers
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(INITIAL_BUFFER_CAPACITY));
        buffer.clear();
        ScratchBuffer { buffer, pool: self }
    }

    fn release(&self, mut buffer: Vec<u8>) {
        if buffer.capacity() > self.retain_limit {
            return;
        }
        buffer.clear();
        // A full queue rejects the push and the buffer is dropped.
        let _ = self.buffers.push(buffer);
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn available(&self) -> usize {
        self.buffers.len()
    }

    /// Maximum number of idle buffers the pool keeps.
    #[must_use]
    pub fn max_buffers(&self) -> usize {
        self.buffers.capacity()
    }

    /// Capacity above which released buffers are dropped.
    #[must_use]
    pub const fn retain_limit(&self) -> usize {
        self.retain_limit
    }
}

impl Default for BufferPool {
    /// Sizes the pool from the available parallelism.
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4);
        Self::new(threads * 4)
    }
}

/// Process-wide pool shared by every [`Logger`](crate::Logger).
pub fn global() -> &'static BufferPool {
    static POOL: OnceLock<BufferPool> = OnceLock::new();
    POOL.get_or_init(BufferPool::default)
}

/// RAII guard over a pooled buffer.
///
/// Dereferences to the underlying [`Vec<u8>`] and implements [`Write`] so
/// formatting helpers can render straight into it.
#[derive(Debug)]
pub struct ScratchBuffer<'a> {
    buffer: Vec<u8>,
    pool: &'a BufferPool,
}

impl ScratchBuffer<'_> {
    /// Appends `text` verbatim.
    pub fn push_str(&mut self, text: &str) {
        self.buffer.extend_from_slice(text.as_bytes());
    }

    /// Appends a trailing newline unless the buffer already ends with one.
    ///
    /// Only a single `\n` is ever added; existing trailing newlines are kept
    /// as they are.
    pub fn terminate_line(&mut self) {
        if self.buffer.last() != Some(&b'\n') {
            self.buffer.push(b'\n');
        }
    }
}

impl Deref for ScratchBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for ScratchBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl Write for ScratchBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buffer));
    }
}
