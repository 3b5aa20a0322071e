//! Memory allocation utilities for texture decoding.
//!
//! Every buffer that outlives a single function call (decoded pixel data, chunked-read working
//! buffers) is rented from a [`BufferAllocator`] and handed out as a [`RentedBuffer`], which
//! gives its memory back to the allocator when dropped.
//!
//! ## Useful APIs
//!
//! [`allocate_zeroed_align_64`]: Allocates zeroed memory aligned to 64 bytes.
//! [`HeapAllocator`]: Non-pooling allocator, the default.
//! [`PoolAllocator`]: Reuses returned buffers and tracks outstanding rentals.
//!
//! ## Safety
//!
//! All allocation operations are wrapped in safe APIs. A [`RentedBuffer`] returns its memory
//! exactly once, so double-return and use-after-return cannot be expressed.

use core::alloc::{Layout, LayoutError};
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicUsize, Ordering};
use safe_allocator_api::prelude::*;
use safe_allocator_api::RawAlloc;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Allocates zeroed memory with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_zeroed_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new_zeroed(layout)?)
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// An error that occurred while creating a layout for allocation.
    #[error("Invalid layout provided. Likely due to `num_bytes` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// An error that occurred while allocating memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

/// A 64-byte aligned heap block handed out by a [`BufferAllocator`].
///
/// A buffer is zeroed when allocated and dirty from the moment it is first rented, so a
/// [`RentedBuffer`] only clears memory that somebody may have written.
pub struct RawBuffer {
    alloc: RawAlloc,
    zeroed: bool,
}

// SAFETY: `RawAlloc` uniquely owns its memory block and the global allocator is thread safe,
// so moving or sharing the handle across threads cannot alias the memory.
unsafe impl Send for RawBuffer {}
unsafe impl Sync for RawBuffer {}

impl RawBuffer {
    /// Allocates a zeroed buffer able to hold at least `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocateError> {
        // Zero sized layouts are not accepted by every allocator.
        let alloc = allocate_zeroed_align_64(capacity.max(1))?;
        Ok(Self {
            alloc,
            zeroed: true,
        })
    }

    /// Returns `true` if nothing has written to the buffer since it was allocated.
    #[inline]
    pub fn is_zeroed(&self) -> bool {
        self.zeroed
    }

    /// Number of usable bytes in the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.alloc.as_slice().len()
    }

    /// Views the whole buffer.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.alloc.as_slice()
    }

    /// Views the whole buffer mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.alloc.as_mut_slice()
    }
}

impl fmt::Debug for RawBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("capacity", &self.capacity())
            .field("zeroed", &self.zeroed)
            .finish()
    }
}

/// Rent/return contract for byte buffers.
///
/// `rent` yields a buffer with capacity of at least `size` bytes; its contents are unspecified.
/// `release` takes the buffer back. Callers normally go through [`RentedBuffer`], which pairs
/// every rent with exactly one release.
pub trait BufferAllocator: Send + Sync + fmt::Debug {
    /// Rents a buffer with at least `size` bytes of capacity.
    fn rent(&self, size: usize) -> Result<RawBuffer, AllocateError>;

    /// Gives a previously rented buffer back to the allocator.
    fn release(&self, buffer: RawBuffer);
}

/// Allocates straight from the heap and frees on release. No pooling.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn rent(&self, size: usize) -> Result<RawBuffer, AllocateError> {
        RawBuffer::with_capacity(size)
    }

    fn release(&self, buffer: RawBuffer) {
        drop(buffer);
    }
}

/// Keeps released buffers around for reuse and counts outstanding rentals.
///
/// A rent is served by the smallest pooled buffer that is large enough; otherwise a fresh
/// buffer is allocated. At most `max_retained` buffers are kept.
#[derive(Debug)]
pub struct PoolAllocator {
    free: Mutex<Vec<RawBuffer>>,
    outstanding: AtomicUsize,
    max_retained: usize,
}

impl PoolAllocator {
    /// Creates a pool that retains up to 16 released buffers.
    pub fn new() -> Self {
        Self::with_max_retained(16)
    }

    /// Creates a pool that retains up to `max_retained` released buffers.
    pub fn with_max_retained(max_retained: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            outstanding: AtomicUsize::new(0),
            max_retained,
        }
    }

    /// Number of buffers currently rented and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Number of buffers sitting in the pool, ready for reuse.
    pub fn pooled(&self) -> usize {
        self.lock_free().len()
    }

    fn lock_free(&self) -> std::sync::MutexGuard<'_, Vec<RawBuffer>> {
        // A panic while holding the lock cannot leave the list half-updated.
        self.free.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for PoolAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferAllocator for PoolAllocator {
    fn rent(&self, size: usize) -> Result<RawBuffer, AllocateError> {
        let reused = {
            let mut free = self.lock_free();
            free.iter()
                .enumerate()
                .filter(|(_, buffer)| buffer.capacity() >= size)
                .min_by_key(|(_, buffer)| buffer.capacity())
                .map(|(index, _)| index)
                .map(|index| free.swap_remove(index))
        };

        let buffer = match reused {
            Some(buffer) => buffer,
            None => RawBuffer::with_capacity(size)?,
        };
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        Ok(buffer)
    }

    fn release(&self, buffer: RawBuffer) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        let mut free = self.lock_free();
        if free.len() < self.max_retained {
            free.push(buffer);
        }
    }
}

/// A buffer rented from a [`BufferAllocator`] that is released when dropped.
///
/// The handle exposes a logical length which may be smaller than the rented capacity.
/// The logical range reads as zero on rent, so padding bytes never leak stale pool contents.
/// Freshly allocated memory is already zero and is left untouched, so pages the decoder never
/// writes are never committed.
pub struct RentedBuffer {
    buffer: Option<RawBuffer>,
    len: usize,
    allocator: Arc<dyn BufferAllocator>,
}

impl RentedBuffer {
    /// Rents `len` zeroed bytes from `allocator`.
    ///
    /// # Parameters
    ///
    /// - `allocator`: The allocator to rent from and later release to
    /// - `len`: The logical length of the buffer
    pub fn rent(allocator: &Arc<dyn BufferAllocator>, len: usize) -> Result<Self, AllocateError> {
        let mut buffer = allocator.rent(len)?;
        if !buffer.zeroed {
            buffer.as_mut_slice()[..len].fill(0);
        }
        buffer.zeroed = false;
        Ok(Self {
            buffer: Some(buffer),
            len,
            allocator: Arc::clone(allocator),
        })
    }

    /// Logical length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the logical length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Capacity of the underlying rented buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, RawBuffer::capacity)
    }

    /// Shortens the logical length. Has no effect if `len` is not smaller.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Extends the logical length to `len`. The new bytes read as zero.
    ///
    /// When `len` exceeds the capacity, a larger buffer is rented from the same allocator, the
    /// contents are copied across and the old buffer is released. Capacity at least doubles on
    /// each step but never exceeds `limit`, unless `len` itself does. Has no effect if `len` is
    /// not larger.
    pub fn grow(&mut self, len: usize, limit: usize) -> Result<(), AllocateError> {
        if len <= self.len {
            return Ok(());
        }

        if len > self.capacity() {
            let capacity = self.capacity().saturating_mul(2).min(limit).max(len);
            let mut grown = RentedBuffer::rent(&self.allocator, capacity)?;
            grown[..self.len].copy_from_slice(self.as_slice());
            grown.truncate(len);
            *self = grown;
            return Ok(());
        }

        let start = self.len;
        self.len = len;
        self.as_mut_slice()[start..].fill(0);
        Ok(())
    }

    /// The allocator this buffer goes back to.
    pub fn allocator(&self) -> &Arc<dyn BufferAllocator> {
        &self.allocator
    }

    /// Views the logical range.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.buffer {
            Some(buffer) => &buffer.as_slice()[..self.len],
            None => &[],
        }
    }

    /// Views the logical range mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.buffer {
            Some(buffer) => &mut buffer.as_mut_slice()[..self.len],
            None => &mut [],
        }
    }
}

impl Deref for RentedBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for RentedBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl Drop for RentedBuffer {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.allocator.release(buffer);
        }
    }
}

impl fmt::Debug for RentedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RentedBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}
