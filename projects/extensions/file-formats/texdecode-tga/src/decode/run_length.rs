//! # Run-Length Packets
//!
//! A run-length TGA stores its pixels as a sequence of packets, each led by a control byte:
//!
//! ```text
//! 1nnnnnnn PIXEL              run: PIXEL repeated n + 1 times
//! 0nnnnnnn PIXEL * (n + 1)    raw: n + 1 literal pixels
//! ```
//!
//! Packets are supposed to end on a scanline boundary, but some encoders let them cross one.
//! The decoder carries the unfinished part of such a packet over to the next row.

use crate::tga::constants::{PACKET_COUNT_MASK, RUN_PACKET_FLAG};
use texdecode_common::{error::DecodeError, stream::StreamSource};

/// Largest supported pixel, in bytes.
const MAX_PIXEL_BYTES: usize = 4;

/// A packet with pixels left to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Packet {
    Run {
        pixel: [u8; MAX_PIXEL_BYTES],
        left: usize,
    },
    Raw {
        left: usize,
    },
}

impl Packet {
    #[inline]
    fn left(&self) -> usize {
        match *self {
            Packet::Run { left, .. } | Packet::Raw { left } => left,
        }
    }
}

/// Decodes run-length packets one scanline at a time.
#[derive(Debug, Clone)]
pub struct RunLengthDecoder {
    bytes_per_pixel: usize,
    pending: Option<Packet>,
}

impl RunLengthDecoder {
    /// Creates a decoder for pixels of `bytes_per_pixel` bytes (1 to 4).
    pub fn new(bytes_per_pixel: usize) -> Self {
        debug_assert!((1..=MAX_PIXEL_BYTES).contains(&bytes_per_pixel));
        Self {
            bytes_per_pixel,
            pending: None,
        }
    }

    /// Fills `row` with pixels decoded from `source`.
    ///
    /// `row` must be a whole number of pixels. A packet that does not fit in the row is kept
    /// and continued by the next call.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedData`] if the source ends before `row` is full.
    pub fn decode_row<S: StreamSource + ?Sized>(
        &mut self,
        source: &mut S,
        row: &mut [u8],
    ) -> Result<(), DecodeError> {
        let bpp = self.bytes_per_pixel;
        let mut written = 0;
        while written < row.len() {
            let mut packet = match self.pending.take() {
                Some(packet) => packet,
                None => read_packet(source, bpp)?,
            };

            let out = &mut row[written..];
            let pixels = packet.left().min(out.len() / bpp);
            let bytes = pixels * bpp;
            match &mut packet {
                Packet::Run { pixel, left } => {
                    replicate(&pixel[..bpp], &mut out[..bytes]);
                    *left -= pixels;
                }
                Packet::Raw { left } => {
                    out[..bytes].copy_from_slice(source.require(bytes)?);
                    source.consume(bytes);
                    *left -= pixels;
                }
            }
            written += bytes;

            if packet.left() > 0 {
                self.pending = Some(packet);
            }
        }
        Ok(())
    }
}

/// Reads the control byte of the next packet, plus the pixel of a run.
fn read_packet<S: StreamSource + ?Sized>(source: &mut S, bpp: usize) -> Result<Packet, DecodeError> {
    let control = source.require(1)?[0];
    let count = (control & PACKET_COUNT_MASK) as usize + 1;
    if control & RUN_PACKET_FLAG == 0 {
        source.consume(1);
        return Ok(Packet::Raw { left: count });
    }

    let window = source.require(1 + bpp)?;
    let mut pixel = [0u8; MAX_PIXEL_BYTES];
    pixel[..bpp].copy_from_slice(&window[1..1 + bpp]);
    source.consume(1 + bpp);
    Ok(Packet::Run { pixel, left: count })
}

/// Fills `out` with copies of `pixel`.
///
/// `out` must be a whole number of pixels. Wider pixels are written 12 bytes at a time from a
/// pattern that tiles for every pixel size from 1 to 4.
#[inline]
pub(crate) fn replicate(pixel: &[u8], out: &mut [u8]) {
    if let [value] = pixel {
        out.fill(*value);
        return;
    }

    let mut pattern = [0u8; 12];
    for (slot, value) in pattern.iter_mut().zip(pixel.iter().cycle()) {
        *slot = *value;
    }

    let mut chunks = out.chunks_exact_mut(pattern.len());
    for chunk in &mut chunks {
        chunk.copy_from_slice(&pattern);
    }
    let tail = chunks.into_remainder();
    let tail_len = tail.len();
    tail.copy_from_slice(&pattern[..tail_len]);
}
