//! # Decoded Images
//!
//! [`DecodedImage`] wraps whichever container was decoded and exposes the common view of it:
//! one buffer with dimensions, stride, format and mip layout.
//!
//! Two operations mutate it after the fact, both one-shot and irreversible:
//!
//! - [`DecodedImage::apply_palette`] expands TGA palette indices to colors.
//! - [`DecodedImage::decompress`] decodes a DDS payload kept compressed by
//!   `Config::decompress = false`.

use texdecode_common::{
    config::Config, error::DecodeError, image_format::ImageFormat, mip_chain::MipDescriptor,
    surface::Surface,
};
use texdecode_dds::DdsImage;
use texdecode_tga::TgaImage;

/// The container-specific result of a decode.
#[derive(Debug)]
pub enum ImageKind {
    /// A block container, possibly with mip levels.
    Dds(DdsImage),
    /// A scanline image, possibly color-mapped.
    Tga(TgaImage),
}

/// A decoded DDS or TGA image.
///
/// Owns exactly one buffer from the configured allocator; it goes back to the allocator when
/// the image is dropped.
#[derive(Debug)]
pub struct DecodedImage {
    kind: ImageKind,
    threads: usize,
    target_format: Option<ImageFormat>,
}

impl DecodedImage {
    pub(crate) fn new(kind: ImageKind, config: &Config) -> Self {
        Self {
            kind,
            threads: config.threads,
            target_format: config.target_format,
        }
    }

    /// The container-specific image, with its parsed header.
    pub fn kind(&self) -> &ImageKind {
        &self.kind
    }

    /// Consumes the image, returning the container-specific result.
    pub fn into_kind(self) -> ImageKind {
        self.kind
    }

    /// The surface holding the pixels.
    pub fn surface(&self) -> &Surface {
        match &self.kind {
            ImageKind::Dds(image) => &image.surface,
            ImageKind::Tga(image) => &image.surface,
        }
    }

    /// Width of the base level in pixels.
    pub fn width(&self) -> u32 {
        self.surface().width
    }

    /// Height of the base level in pixels.
    pub fn height(&self) -> u32 {
        self.surface().height
    }

    /// Bytes per row of the base level, padding included. Always a multiple of 4.
    pub fn stride(&self) -> usize {
        self.surface().stride
    }

    /// Pixel format of the decoded data.
    ///
    /// While [`DecodedImage::is_compressed`] is set this is the format the data will have once
    /// decompressed.
    pub fn format(&self) -> ImageFormat {
        self.surface().format
    }

    /// Significant bits per pixel of [`DecodedImage::format`].
    pub fn bits_per_pixel(&self) -> u32 {
        self.surface().bits_per_pixel
    }

    /// Bytes each pixel occupies in a row.
    pub fn bytes_per_pixel(&self) -> usize {
        self.surface().bytes_per_pixel()
    }

    /// `true` if the data is still block compressed.
    pub fn is_compressed(&self) -> bool {
        self.surface().compressed
    }

    /// The whole buffer: the base level followed by any mip levels.
    pub fn data(&self) -> &[u8] {
        self.surface().data.as_slice()
    }

    /// Logical length of [`DecodedImage::data`], in bytes.
    pub fn len(&self) -> usize {
        self.surface().len()
    }

    /// `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.surface().is_empty()
    }

    /// Mip levels after the base level, largest first. Empty for TGA images.
    pub fn mip_maps(&self) -> &[MipDescriptor] {
        &self.surface().mip_maps
    }

    /// Bytes of mip `level`, where level 0 is the base level.
    pub fn mip_data(&self, level: usize) -> Option<&[u8]> {
        self.surface().mip_data(level)
    }

    /// The `Config::target_format` the image was decoded with.
    pub fn target_format(&self) -> Option<ImageFormat> {
        self.target_format
    }

    /// Replaces TGA palette indices with their colormap entries.
    ///
    /// The image takes the colormap's format and a matching stride. A no-op for images without
    /// a palette, DDS images included, and on every call after the first.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Allocation`] if the expanded buffer cannot be rented. The image is left
    /// unchanged.
    pub fn apply_palette(&mut self) -> Result<(), DecodeError> {
        match &mut self.kind {
            ImageKind::Tga(image) => image.apply_palette(),
            ImageKind::Dds(_) => Ok(()),
        }
    }

    /// Decodes a block compressed payload kept by `Config::decompress = false`.
    ///
    /// Afterwards the image is identical to one decoded with `Config::decompress = true`. A
    /// no-op if the image is not compressed.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Allocation`] if the decoded buffer cannot be rented. The image is left
    /// unchanged.
    pub fn decompress(&mut self) -> Result<(), DecodeError> {
        match &mut self.kind {
            ImageKind::Dds(image) => image.decompress(self.threads),
            ImageKind::Tga(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;
    use crate::*;
    use std::sync::Arc;

    #[test]
    fn accessors_follow_the_surface() {
        let data = tga_image(2, 32, 3, 2);
        let image = decode_from_slice(&data, &Config::default()).unwrap();

        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.stride(), 12);
        assert_eq!(image.format(), ImageFormat::Rgba32);
        assert_eq!(image.bits_per_pixel(), 32);
        assert_eq!(image.bytes_per_pixel(), 4);
        assert_eq!(image.len(), 24);
        assert_eq!(image.data().len(), image.len());
        assert!(!image.is_empty());
        assert!(!image.is_compressed());
        assert!(image.mip_maps().is_empty());
        assert_eq!(image.mip_data(0), Some(image.data()));
        assert_eq!(image.mip_data(1), None);
    }

    #[test]
    fn target_format_is_carried_through() {
        let config = Config::default().with_target_format(Some(ImageFormat::Rgba32));
        let image = decode_from_slice(&bc1_dds(4, 4), &config).unwrap();
        assert_eq!(image.target_format(), Some(ImageFormat::Rgba32));
        assert_eq!(image.format(), ImageFormat::Rgb24);
    }

    #[test]
    fn cross_container_operations_are_no_ops() {
        let mut dds = decode_from_slice(&bc1_dds(8, 4), &Config::default()).unwrap();
        let before = dds.data().to_vec();
        dds.apply_palette().unwrap();
        assert_eq!(dds.data(), before.as_slice());

        let mut tga = decode_from_slice(&tga_image(3, 8, 2, 2), &Config::default()).unwrap();
        let before = tga.data().to_vec();
        tga.decompress().unwrap();
        assert_eq!(tga.data(), before.as_slice());
    }

    #[test]
    fn decompress_uses_the_configured_allocator() {
        let pool = Arc::new(PoolAllocator::new());
        let allocator: Arc<dyn BufferAllocator> = pool.clone();
        let config = Config::default()
            .with_allocator(allocator)
            .with_decompress(false);

        let mut image = decode_from_slice(&bc1_dds(16, 16), &config).unwrap();
        assert!(image.is_compressed());
        assert_eq!(pool.outstanding(), 1);

        image.decompress().unwrap();
        assert!(!image.is_compressed());
        assert_eq!(pool.outstanding(), 1);

        match image.into_kind() {
            ImageKind::Dds(dds) => assert_eq!(dds.surface.len(), 16 * 48),
            ImageKind::Tga(_) => panic!("expected a DDS image"),
        }
        assert_eq!(pool.outstanding(), 0);
    }
}
