//! Editable voxel models for the voxmod modeller.
//!
//! This crate ties the grid, palette and mesher together:
//! - Ray picking against filled cells
//! - `VoxelModel`, which applies edits and keeps its mesh in sync
//! - The renderer seam (`MeshRenderer`, `MeshBinding`)
//! - Model creation settings
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use voxmod_core::{Ray, Rgba};
//! use voxmod_model::{Edit, VoxelModel};
//!
//! let mut model = VoxelModel::new(4);
//! let ray = Ray::new(Vec3::new(10.0, 0.5, 0.5), Vec3::NEG_X);
//! let edit = model.modify(&ray, Rgba::new(1.0, 0.0, 0.0, 1.0)).unwrap();
//! assert!(matches!(edit, Edit::Added { .. }));
//! assert_eq!(model.mesh_view().quad_count(), 10);
//! ```

mod config;
mod model;
mod picker;
mod render;

pub use config::ModelConfig;
pub use model::{Edit, LineView, MeshView, SkipReason, VoxelModel};
pub use picker::{pick, Pick};
pub use render::{MeshBinding, MeshRenderer};

// Re-export commonly used types for convenience
pub use voxmod_core::{Axis, CellPos, Error, Ray, Result, Rgb, Rgba};
pub use voxmod_mesh::{MeshVertex, MesherConfig, VERTEX_LAYOUT};
pub use voxmod_voxel::{Palette, VoxelGrid};
