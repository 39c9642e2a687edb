//! Core types, math, and errors for the voxmod voxel modeller.
//!
//! This crate provides the foundational types shared by the other crates:
//! - Face axes and colors
//! - Cell coordinates
//! - Rays, boxes and the ray/box face test used for picking
//! - The error type

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::CellPos;
pub use error::{Error, Result};
pub use math::{Aabb, Ray, RayHit};
pub use types::{Axis, Rgb, Rgba};

/// Model-wide constants
pub mod constants {
    /// Smallest grid edge length in cells
    pub const MIN_GRID_SIZE: usize = 1;
    /// Largest grid edge length in cells (stored as `size - 1` in one byte)
    pub const MAX_GRID_SIZE: usize = 256;
    /// Smallest model scale
    pub const MIN_SCALE: u32 = 1;
    /// Largest model scale (stored as `scale - 1` in one byte)
    pub const MAX_SCALE: u32 = 256;
    /// Maximum number of palette colors (index 0 is reserved for empty cells)
    pub const MAX_PALETTE_COLORS: usize = 254;
    /// Cell value meaning "no voxel"
    pub const EMPTY_CELL: u8 = 0;
}
