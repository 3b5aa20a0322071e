/// Shared constants between modules.
pub mod constants;

/// Parse the TGA header, image ID and colormap.
pub mod parse_tga;

pub use parse_tga::*;
