//! Decoding of DDS payloads into a [`Surface`].

mod levels;
mod uncompressed;

use crate::dds::{read_dds_header, DdsFormat, DdsHeader};
use levels::{decode_levels, decode_levels_from_stream, total_len, LevelDecoder};
use std::sync::Arc;
use texdecode_bcn::Workers;
use texdecode_common::{
    allocate::RentedBuffer,
    config::Config,
    error::DecodeError,
    mip_chain::{MipChain, MipDescriptor},
    stream::StreamSource,
    surface::Surface,
};
use tracing::{debug, warn};

/// A decoded DDS file.
#[derive(Debug)]
pub struct DdsImage {
    /// The parsed header.
    pub header: DdsHeader,
    /// How the payload was stored.
    pub format: DdsFormat,
    /// The decoded pixels, or the stored blocks if decompression was deferred.
    pub surface: Surface,
}

impl DdsImage {
    /// Decodes a surface whose decompression was deferred by [`Config::decompress`].
    ///
    /// Replaces the stored blocks with decoded pixels and clears [`Surface::compressed`]. Does
    /// nothing if the surface is already decoded.
    ///
    /// # Parameters
    ///
    /// - `threads`: Tile-row parallelism, as in [`Config::threads`]
    pub fn decompress(&mut self, threads: usize) -> Result<(), DecodeError> {
        let DdsFormat::Compressed(block) = self.format else {
            return Ok(());
        };
        if !self.surface.compressed {
            return Ok(());
        }

        let levels = self.surface.mip_maps.len() + 1;
        let chain = mip_chain(&self.header, &self.format);
        let layout = chain.decoded_layout(levels as u32, block.output_format().bits_per_pixel())?;
        let allocator = Arc::clone(self.surface.data.allocator());
        let mut data = RentedBuffer::rent(&allocator, total_len(&layout))?;
        decode_levels(
            LevelDecoder::Blocks(block),
            &chain,
            &self.surface.data,
            &layout,
            &mut data,
            &Workers::new(threads),
        )?;

        debug!(?block, levels, "decompressed deferred DDS surface");
        self.surface = build_surface(&self.header, &self.format, data, &layout, false);
        Ok(())
    }
}

/// Mip geometry of the stored payload.
fn mip_chain(header: &DdsHeader, format: &DdsFormat) -> MipChain {
    MipChain::new(
        header.width,
        header.height,
        format.block_size(),
        format.block_bytes(),
    )
}

/// Levels the header asks for. A declared count is capped at a full chain; without one, a full
/// chain is assumed.
fn requested_levels(header: &DdsHeader, chain: &MipChain) -> u32 {
    let full = chain.estimated_levels();
    header
        .declared_mip_count()
        .map_or(full, |declared| declared.min(full))
}

fn build_surface(
    header: &DdsHeader,
    format: &DdsFormat,
    mut data: RentedBuffer,
    layout: &[MipDescriptor],
    compressed: bool,
) -> Surface {
    data.truncate(total_len(layout));
    let output = format.output_format();
    Surface {
        data,
        width: header.width,
        height: header.height,
        stride: layout.first().map_or(0, |mip| mip.stride),
        bits_per_pixel: output.bits_per_pixel(),
        format: output,
        compressed,
        mip_maps: layout.get(1..).unwrap_or_default().to_vec(),
    }
}

/// Decodes a DDS file from `source`, header included.
///
/// Fully in-memory sources are decoded in place (direct mode), anything else one row of
/// blocks or pixels at a time (chunked mode). Both produce identical surfaces.
///
/// # Errors
///
/// - Header errors from [`read_dds_header`] and [`DdsFormat::from_header`].
/// - [`InvalidHeaderReason::DimensionsTooLarge`] if the size of any level does not fit in a
///   `usize`.
/// - [`DecodeError::TruncatedData`] if the base level is incomplete. Incomplete mip levels are
///   dropped instead.
///
/// Nothing is allocated for pixel data the source does not hold: direct mode checks the payload
/// length first, chunked mode grows its output as rows arrive.
///
/// [`InvalidHeaderReason::DimensionsTooLarge`]: texdecode_common::error::InvalidHeaderReason::DimensionsTooLarge
pub fn decode_dds<S: StreamSource + ?Sized>(
    source: &mut S,
    config: &Config,
) -> Result<DdsImage, DecodeError> {
    let header = read_dds_header(source)?;
    let format = DdsFormat::from_header(&header)?;
    let chain = mip_chain(&header, &format);
    let requested = requested_levels(&header, &chain);

    let decoder = match format {
        DdsFormat::Compressed(block) if config.decompress => LevelDecoder::Blocks(block),
        DdsFormat::Compressed(_) => LevelDecoder::Deferred,
        DdsFormat::Uncompressed(pixels) => LevelDecoder::Pixels(pixels),
    };
    let layout = match decoder {
        LevelDecoder::Deferred => chain.source_layout(requested)?,
        _ => chain.decoded_layout(requested, format.output_format().bits_per_pixel())?,
    };
    debug!(
        width = header.width,
        height = header.height,
        ?format,
        ?decoder,
        levels = requested,
        array_size = header.dx10.map_or(1, |dx10| dx10.array_size),
        "decoding DDS"
    );

    let (data, levels) = match source.remaining_contiguous() {
        Some(payload) => {
            let levels = chain.levels_present(requested, payload.len()) as usize;
            if levels == 0 {
                return Err(DecodeError::TruncatedData {
                    required: chain.level_source_len(0),
                    actual: payload.len(),
                });
            }

            let layout = &layout[..levels];
            let workers = Workers::new(config.threads);
            let mut data = RentedBuffer::rent(&config.allocator, total_len(layout))?;
            decode_levels(decoder, &chain, payload, layout, &mut data, &workers)?;
            source.consume(chain.source_len(levels as u32));
            (data, levels)
        }
        None => {
            let mut data = RentedBuffer::rent(&config.allocator, 0)?;
            let levels = decode_levels_from_stream(decoder, source, &layout, &mut data)?;
            (data, levels)
        }
    };

    if header.declared_mip_count().is_some() && levels < requested as usize {
        warn!(
            declared = requested,
            present = levels,
            "mip chain clamped to the levels present in the payload"
        );
    }

    let compressed = decoder == LevelDecoder::Deferred;
    let surface = build_surface(&header, &format, data, &layout[..levels], compressed);
    Ok(DdsImage {
        header,
        format,
        surface,
    })
}
