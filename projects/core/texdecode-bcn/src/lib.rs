#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod alpha_gradient;
pub mod bc1_decode;
pub mod bc2_decode;
pub mod bc3_decode;
pub mod bc4_decode;
pub mod bc5_decode;
pub mod bc6h_decode;
pub mod bc7_decode;
pub mod bitstream;
pub mod block_format;
pub mod thread_pool;
pub mod tile_rows;

mod partition_table;

pub use block_format::{BlockFormat, BLOCK_SIZE};
pub use thread_pool::Workers;
pub use tile_rows::TileGrid;

#[cfg(test)]
mod test_prelude;
