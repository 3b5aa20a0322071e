//! # Streaming Input
//!
//! Decoders pull bytes through the [`StreamSource`] trait, which has two implementations:
//!
//! - [`SliceSource`]: direct mode. The whole input is already in memory; every window is a
//!   subslice of it and nothing is copied.
//! - [`ChunkedSource`]: chunked mode. Input arrives from a [`Read`] and is staged in a bounded
//!   working buffer. When a decode step needs more bytes than the buffer holds, the unconsumed
//!   tail is moved to the front and the rest of the buffer is refilled (see [`translate`]).
//!
//! Both produce identical windows for identical input, so decoders never need to know which
//! one they are driving.
//!
//! ## Protocol
//!
//! ```text
//! loop {
//!     let window = source.fill(worst_case_packet_size)?; // may be shorter at end of input
//!     let used = decode_one_packet(window)?;
//!     source.consume(used);
//! }
//! ```

use crate::allocate::{BufferAllocator, RentedBuffer};
use crate::error::DecodeError;
use std::io::{self, ErrorKind, Read};
use std::sync::Arc;
use tracing::trace;

/// A byte source decoders consume through a sliding window.
pub trait StreamSource {
    /// Returns the unconsumed window, refilling first if it holds fewer than `min` bytes.
    ///
    /// The window is only shorter than `min` when the input is exhausted.
    fn fill(&mut self, min: usize) -> Result<&[u8], DecodeError>;

    /// Marks `n` bytes at the front of the window as consumed.
    ///
    /// `n` must not exceed the length of the last window returned by [`StreamSource::fill`].
    fn consume(&mut self, n: usize);

    /// Total number of bytes consumed so far.
    fn position(&self) -> usize;

    /// The whole unconsumed input, if it is already in memory.
    ///
    /// Only direct-mode sources return [`Some`]; decoders use it to skip staging entirely.
    fn remaining_contiguous(&self) -> Option<&[u8]> {
        None
    }

    /// Like [`StreamSource::fill`], but fails with [`DecodeError::TruncatedData`] unless at
    /// least `n` bytes are available. The returned slice is exactly `n` bytes long.
    fn require(&mut self, n: usize) -> Result<&[u8], DecodeError> {
        let window = self.fill(n)?;
        if window.len() < n {
            return Err(DecodeError::TruncatedData {
                required: n,
                actual: window.len(),
            });
        }
        Ok(&window[..n])
    }

    /// Copies exactly `dst.len()` bytes out of the source.
    ///
    /// Works for any length, including lengths larger than a chunked working buffer.
    fn read_exact_into(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        let mut copied = 0;
        while copied < dst.len() {
            let want = dst.len() - copied;
            let window = self.fill(want.min(PREFERRED_STEP))?;
            if window.is_empty() {
                return Err(DecodeError::TruncatedData {
                    required: dst.len(),
                    actual: copied,
                });
            }

            let take = window.len().min(want);
            dst[copied..copied + take].copy_from_slice(&window[..take]);
            self.consume(take);
            copied += take;
        }
        Ok(())
    }

    /// Discards exactly `n` bytes.
    fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        let mut skipped = 0;
        while skipped < n {
            let window = self.fill((n - skipped).min(PREFERRED_STEP))?;
            if window.is_empty() {
                return Err(DecodeError::TruncatedData {
                    required: n,
                    actual: skipped,
                });
            }

            let take = window.len().min(n - skipped);
            self.consume(take);
            skipped += take;
        }
        Ok(())
    }
}

/// Bulk copies drain whatever is staged before asking for more, so they never grow the
/// working buffer.
const PREFERRED_STEP: usize = 1;

/// Direct-mode source over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Wraps `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The unconsumed part of the input.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }
}

impl StreamSource for SliceSource<'_> {
    #[inline]
    fn fill(&mut self, _min: usize) -> Result<&[u8], DecodeError> {
        Ok(self.remaining())
    }

    #[inline]
    fn consume(&mut self, n: usize) {
        debug_assert!(self.position + n <= self.data.len());
        self.position = (self.position + n).min(self.data.len());
    }

    #[inline]
    fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn remaining_contiguous(&self) -> Option<&[u8]> {
        Some(self.remaining())
    }
}

/// Shift-refill step of the chunked reader.
///
/// Moves `buf[index..]` to the front of `buf`, then reads from `reader` into the freed space
/// until the buffer is full or the reader reports end of input. Bytes past the returned length
/// are left as they were.
///
/// # Returns
///
/// The number of valid bytes now at the front of `buf`.
///
/// # Examples
///
/// ```
/// use texdecode_common::stream::translate;
///
/// let mut buf = [1, 2, 3, 4, 5];
/// let valid = translate(&mut &[100u8][..], &mut buf, 1).unwrap();
/// assert_eq!(valid, 5);
/// assert_eq!(buf, [2, 3, 4, 5, 100]);
/// ```
pub fn translate<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    index: usize,
) -> io::Result<usize> {
    let index = index.min(buf.len());
    buf.copy_within(index.., 0);

    let carried = buf.len() - index;
    Ok(carried + read_fully(reader, &mut buf[carried..])?)
}

/// Reads until `buf` is full or `reader` reports end of input.
fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Chunked-mode source over a [`Read`].
///
/// Working memory is one rented buffer of `buffer_size` bytes. It only grows when a single
/// `fill` asks for more than it can hold.
pub struct ChunkedSource<R> {
    reader: R,
    buffer: RentedBuffer,
    start: usize,
    end: usize,
    eof: bool,
    consumed: usize,
    allocator: Arc<dyn BufferAllocator>,
}

impl<R: Read> ChunkedSource<R> {
    /// Creates a source that stages `reader` through a buffer of `buffer_size` bytes rented from
    /// `allocator`. Nothing is read until the first [`StreamSource::fill`].
    pub fn new(
        reader: R,
        buffer_size: usize,
        allocator: &Arc<dyn BufferAllocator>,
    ) -> Result<Self, DecodeError> {
        let buffer = RentedBuffer::rent(allocator, buffer_size.max(1))?;
        Ok(Self {
            reader,
            buffer,
            start: 0,
            end: 0,
            eof: false,
            consumed: 0,
            allocator: Arc::clone(allocator),
        })
    }

    /// Current working buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    fn grow(&mut self, min: usize) -> Result<(), DecodeError> {
        let new_size = min.max(self.buffer.len().saturating_mul(2));
        let mut grown = RentedBuffer::rent(&self.allocator, new_size)?;
        let tail = self.end - self.start;
        grown[..tail].copy_from_slice(&self.buffer[self.start..self.end]);
        trace!(
            old_size = self.buffer.len(),
            new_size,
            "growing chunked working buffer"
        );

        self.buffer = grown;
        self.start = 0;
        self.end = tail;
        Ok(())
    }

    fn refill(&mut self, min: usize) -> Result<(), DecodeError> {
        if min > self.buffer.len() {
            self.grow(min)?;
        }

        let tail = self.end - self.start;
        self.buffer.copy_within(self.start..self.end, 0);
        let read = read_fully(&mut self.reader, &mut self.buffer[tail..])?;
        self.start = 0;
        self.end = tail + read;
        if self.end < self.buffer.len() {
            self.eof = true;
        }

        trace!(
            position = self.consumed,
            carried = tail,
            read,
            "refilled chunked working buffer"
        );
        Ok(())
    }
}

impl<R: Read> StreamSource for ChunkedSource<R> {
    fn fill(&mut self, min: usize) -> Result<&[u8], DecodeError> {
        if self.end - self.start < min && !self.eof {
            self.refill(min)?;
        }
        Ok(&self.buffer[self.start..self.end])
    }

    fn consume(&mut self, n: usize) {
        debug_assert!(self.start + n <= self.end);
        let n = n.min(self.end - self.start);
        self.start += n;
        self.consumed += n;
    }

    fn position(&self) -> usize {
        self.consumed
    }
}
