//! TGA format constants and definitions

/// Size of the fixed TGA header.
pub(crate) const TGA_HEADER_SIZE: usize = 18;

// Header field offsets
pub(crate) const ID_LENGTH_OFFSET: usize = 0;
pub(crate) const COLOR_MAP_TYPE_OFFSET: usize = 1;
pub(crate) const IMAGE_TYPE_OFFSET: usize = 2;
pub(crate) const COLOR_MAP_ORIGIN_OFFSET: usize = 3;
pub(crate) const COLOR_MAP_LENGTH_OFFSET: usize = 5;
pub(crate) const COLOR_MAP_DEPTH_OFFSET: usize = 7;
pub(crate) const X_ORIGIN_OFFSET: usize = 8;
pub(crate) const Y_ORIGIN_OFFSET: usize = 10;
pub(crate) const WIDTH_OFFSET: usize = 12;
pub(crate) const HEIGHT_OFFSET: usize = 14;
pub(crate) const PIXEL_DEPTH_OFFSET: usize = 16;
pub(crate) const DESCRIPTOR_OFFSET: usize = 17;

/// Color map type value announcing a colormap.
pub(crate) const COLOR_MAP_PRESENT: u8 = 1;

/// Bits 4 and 5 of the image descriptor select the scan orientation.
pub(crate) const ORIENTATION_SHIFT: u8 = 4;
pub(crate) const ORIENTATION_MASK: u8 = 0b11;

/// High bit of a packet's control byte marks a run.
pub(crate) const RUN_PACKET_FLAG: u8 = 0x80;
/// Low seven bits of a control byte hold the pixel count minus one.
pub(crate) const PACKET_COUNT_MASK: u8 = 0x7F;
