//! Surface meshing for the voxmod voxel modeller.
//!
//! This crate provides:
//! - The AO sampler used to shade mesh vertices
//! - The mesher turning a grid into vertex and index buffers
//! - Bounds and root widget line geometry
//! - Vertex formats and their attribute layout

pub mod ao;
pub mod gizmo;
pub mod mesher;
pub mod vertex;

pub use ao::{ambient_occlusion, AO_BIAS, AO_RADIUS};
pub use gizmo::{bounds_lines, root_axes};
pub use mesher::{build_mesh, count_exposed_faces, MeshData, Mesher, MesherConfig};
pub use vertex::{LineVertex, MeshVertex, VertexAttribute, LINE_LAYOUT, VERTEX_LAYOUT};
