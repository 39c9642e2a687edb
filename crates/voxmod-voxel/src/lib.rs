//! Voxel model storage for voxmod: the palette, the dense cubic grid, and the
//! `.voxel` binary format.

pub mod codec;
pub mod grid;
pub mod palette;

pub use codec::{decode, encode, encode_into, encoded_len, FILE_EXTENSION, FORMAT_VERSION};
pub use grid::VoxelGrid;
pub use palette::Palette;
