#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

/// TGA header and colormap parsing.
pub mod tga;

/// Pixel data decoding.
pub mod decode;

pub use decode::{decode_tga, TgaImage};
pub use tga::{ImageType, Orientation, TgaHeader};

#[cfg(test)]
mod test_prelude;
