//! `.voxel` binary model format.
//!
//! Layout (offsets in bytes, floats are IEEE-754 big-endian):
//!
//! | offset      | field                                    |
//! |-------------|------------------------------------------|
//! | 0           | version (`u8`, always 0)                 |
//! | 1           | palette size N (`u8`, 1..=254)           |
//! | 2           | grid size minus one (`u8`)               |
//! | 3           | scale minus one (`u8`)                   |
//! | 4           | root x, y, z (`3 × f32`)                 |
//! | 16          | palette (`N × 3 × f32`, r g b)           |
//! | 16 + 12N    | cells (`S³ × u8`, i outermost, k inner)  |
//!
//! The total length is always `16 + 12N + S³`.

use std::io::Write;

use glam::Vec3;
use voxmod_core::constants::MAX_PALETTE_COLORS;
use voxmod_core::{Error, Result, Rgb};

use crate::grid::VoxelGrid;
use crate::palette::Palette;

/// Only version written and accepted.
pub const FORMAT_VERSION: u8 = 0;
/// Version, counts and root location.
pub const HEADER_LEN: usize = 16;
/// Three big-endian floats per palette entry.
pub const BYTES_PER_COLOR: usize = 12;
/// Conventional file extension.
pub const FILE_EXTENSION: &str = "voxel";

/// Exact encoded length of a model with `colors` palette entries and edge
/// length `size`.
#[inline]
pub const fn encoded_len(colors: usize, size: usize) -> usize {
    HEADER_LEN + BYTES_PER_COLOR * colors + size * size * size
}

/// Serialize a grid into a fresh buffer.
pub fn encode(grid: &VoxelGrid) -> Vec<u8> {
    let palette = grid.palette();
    let mut data = Vec::with_capacity(encoded_len(palette.len(), grid.size()));

    data.push(FORMAT_VERSION);
    data.push(palette.len() as u8);
    data.push((grid.size() - 1) as u8);
    data.push((grid.scale() - 1) as u8);

    let root = grid.root();
    for v in [root.x, root.y, root.z] {
        data.extend_from_slice(&v.to_be_bytes());
    }

    for color in palette.colors() {
        for v in color.to_array() {
            data.extend_from_slice(&v.to_be_bytes());
        }
    }

    data.extend_from_slice(grid.cells());

    debug_assert_eq!(data.len(), encoded_len(palette.len(), grid.size()));
    data
}

/// Serialize a grid into a byte sink.
pub fn encode_into<W: Write>(grid: &VoxelGrid, writer: &mut W) -> Result<()> {
    writer.write_all(&encode(grid))?;
    writer.flush()?;
    Ok(())
}

/// Parse a grid from bytes.
///
/// Every structural problem is reported as `InvalidFormat`: a buffer too
/// short for the fixed header fields, an unknown version, a palette size
/// outside `1..=254`, a length that disagrees with `16 + 12N + S³`, or a
/// cell referring past the end of the palette.
pub fn decode(data: &[u8]) -> Result<VoxelGrid> {
    let [version, num_colors, size_m1, scale_m1] = match data.get(..4) {
        Some(&[a, b, c, d]) => [a, b, c, d],
        _ => {
            return Err(Error::InvalidFormat(format!(
                "{} bytes is too short for a header",
                data.len()
            )))
        }
    };

    if version != FORMAT_VERSION {
        return Err(Error::InvalidFormat(format!(
            "unsupported version {version}"
        )));
    }

    let colors = usize::from(num_colors);
    if colors == 0 || colors > MAX_PALETTE_COLORS {
        return Err(Error::InvalidFormat(format!(
            "palette size {colors} outside 1..={MAX_PALETTE_COLORS}"
        )));
    }

    let size = usize::from(size_m1) + 1;
    let expected = encoded_len(colors, size);
    if data.len() != expected {
        return Err(Error::InvalidFormat(format!(
            "length {} does not match {expected} for {colors} colors and size {size}",
            data.len()
        )));
    }

    let mut reader = FloatReader::new(&data[4..HEADER_LEN + BYTES_PER_COLOR * colors]);
    let root = Vec3::new(reader.read_f32(), reader.read_f32(), reader.read_f32());
    let palette = Palette::from_colors(
        (0..colors).map(|_| Rgb::new(reader.read_f32(), reader.read_f32(), reader.read_f32())),
    )?;

    let cells = data[HEADER_LEN + BYTES_PER_COLOR * colors..].to_vec();
    VoxelGrid::from_parts(size, u32::from(scale_m1) + 1, root, palette, cells)
}

/// Sequential big-endian f32 reader over a length-checked slice.
struct FloatReader<'a> {
    chunks: std::slice::ChunksExact<'a, u8>,
}

impl<'a> FloatReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            chunks: data.chunks_exact(4),
        }
    }

    fn read_f32(&mut self) -> f32 {
        debug_assert!(self.chunks.len() > 0, "read past the checked float block");
        self.chunks
            .next()
            .map_or(0.0, |b| f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

impl VoxelGrid {
    /// Serialize into the `.voxel` format.
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }

    /// Parse from the `.voxel` format.
    pub fn decode(data: &[u8]) -> Result<Self> {
        decode(data)
    }
}
