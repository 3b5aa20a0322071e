//! The decoded pixel buffer shared by every container decoder.

use crate::allocate::RentedBuffer;
use crate::image_format::ImageFormat;
use crate::mip_chain::MipDescriptor;

/// A decoded (or still compressed) image together with its layout.
///
/// The base level occupies `data[..base_len()]`; further mip levels follow and are described
/// by [`Surface::mip_maps`].
#[derive(Debug)]
pub struct Surface {
    /// Owned pixel bytes. Returned to the allocator when dropped.
    pub data: RentedBuffer,
    /// Width of the base level in pixels.
    pub width: u32,
    /// Height of the base level in pixels.
    pub height: u32,
    /// Bytes per row of the base level. A multiple of 4 once decoded.
    pub stride: usize,
    /// Bits per pixel of [`Surface::format`].
    pub bits_per_pixel: u32,
    /// Layout of the decoded pixels.
    pub format: ImageFormat,
    /// `true` while the data is still block-compressed.
    pub compressed: bool,
    /// Levels 1 and up. Empty for single level images.
    pub mip_maps: Vec<MipDescriptor>,
}

impl Surface {
    /// Logical byte length of [`Surface::data`].
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the surface holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per pixel of [`Surface::format`].
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Byte length of the base level.
    pub fn base_len(&self) -> usize {
        self.mip_maps
            .first()
            .map_or(self.data.len(), |mip| mip.offset)
    }

    /// Bytes of mip `level`; level 0 is the base image.
    pub fn mip_data(&self, level: usize) -> Option<&[u8]> {
        match level {
            0 => self.data.get(..self.base_len()),
            _ => {
                let mip = self.mip_maps.get(level - 1)?;
                self.data.get(mip.offset..mip.offset + mip.len)
            }
        }
    }

    /// Row `y` of the base level, including padding.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = y as usize * self.stride;
        self.data.get(start..start + self.stride)
    }
}
