//! Entry points that detect the container and decode it.

use crate::image::{DecodedImage, ImageKind};
use std::io::Read;
use texdecode_common::{
    config::Config,
    error::DecodeError,
    stream::{ChunkedSource, SliceSource, StreamSource},
};
use texdecode_dds::{decode_dds, likely_dds};
use texdecode_tga::decode_tga;
use tracing::debug;

/// Bytes needed to tell the containers apart.
const MAGIC_LEN: usize = 4;

/// The container formats this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// DirectDraw Surface, identified by its `DDS ` magic.
    Dds,
    /// Truevision TGA. It has no magic, so it is the fallback for everything else.
    Tga,
}

/// Picks the container for a file starting with `prefix`.
///
/// Only the first 4 bytes are inspected; a shorter prefix is never a DDS file.
#[inline]
pub fn detect_container(prefix: &[u8]) -> Container {
    match likely_dds(prefix) {
        true => Container::Dds,
        false => Container::Tga,
    }
}

/// Decodes a whole file held in memory.
///
/// Pixel and block data are read in place, without staging.
///
/// # Errors
///
/// Any [`DecodeError`] raised by the detected container. Buffers rented before the failure are
/// returned to `config.allocator`.
pub fn decode_from_slice(data: &[u8], config: &Config) -> Result<DecodedImage, DecodeError> {
    decode_source(&mut SliceSource::new(data), config)
}

/// Decodes a file read incrementally from `reader`.
///
/// Input is staged through a working buffer of `config.buffer_size` bytes, which only grows
/// when a single row of packets or blocks needs more.
///
/// # Errors
///
/// As [`decode_from_slice`], plus [`DecodeError::Io`] if `reader` fails.
pub fn decode_from_reader<R: Read>(reader: R, config: &Config) -> Result<DecodedImage, DecodeError> {
    let mut source = ChunkedSource::new(reader, config.buffer_size, &config.allocator)?;
    decode_source(&mut source, config)
}

fn decode_source<S: StreamSource + ?Sized>(
    source: &mut S,
    config: &Config,
) -> Result<DecodedImage, DecodeError> {
    let container = detect_container(source.fill(MAGIC_LEN)?);
    debug!(?container, decompress = config.decompress, "detected container");

    let kind = match container {
        Container::Dds => ImageKind::Dds(decode_dds(source, config)?),
        Container::Tga => ImageKind::Tga(decode_tga(source, config)?),
    };
    Ok(DecodedImage::new(kind, config))
}
