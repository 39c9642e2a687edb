//! Grid to triangle mesh conversion.
//!
//! Every filled cell emits one quad per face whose neighbor is empty or
//! outside the grid. Vertex colors carry ambient occlusion, and quads are
//! triangulated along the diagonal joining the brighter pair of corners.

use glam::IVec3;
use voxmod_core::{Axis, CellPos, Rgb};
use voxmod_voxel::VoxelGrid;

use crate::ao::{ambient_occlusion, AO_RADIUS};
use crate::vertex::MeshVertex;

/// Mesher settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MesherConfig {
    /// AO sampling radius; 0 disables occlusion
    pub ao_radius: u32,
    /// Pick the triangulation diagonal from the corner AO values
    pub flip_quads: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            ao_radius: AO_RADIUS,
            flip_quads: true,
        }
    }
}

impl MesherConfig {
    pub fn with_ao_radius(mut self, radius: u32) -> Self {
        self.ao_radius = radius;
        self
    }

    pub fn with_flip_quads(mut self, flip: bool) -> Self {
        self.flip_quads = flip;
        self
    }
}

/// Vertex and index buffers for one model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of emitted quads.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Corner offsets of each face, counter-clockwise seen from outside.
const fn face_corners(axis: Axis) -> [[i32; 3]; 4] {
    match axis {
        Axis::NegX => [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
        Axis::PosX => [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]],
        Axis::NegY => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        Axis::PosY => [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
        Axis::NegZ => [[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 0, 0]],
        Axis::PosZ => [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
    }
}

/// Index pattern of a quad relative to its first vertex.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Returns true if the face of `pos` pointing along `axis` is visible.
#[inline]
fn is_exposed(grid: &VoxelGrid, pos: CellPos, axis: Axis) -> bool {
    !grid.is_solid(pos.neighbor(axis))
}

/// Number of exposed faces, i.e. the number of quads the mesher will emit.
pub fn count_exposed_faces(grid: &VoxelGrid) -> usize {
    grid.iter_filled()
        .map(|(pos, _)| {
            Axis::ALL
                .iter()
                .filter(|&&axis| is_exposed(grid, pos, axis))
                .count()
        })
        .sum()
}

/// Builds surface meshes from voxel grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mesher {
    config: MesherConfig,
}

impl Mesher {
    pub fn new(config: MesherConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// Rebuild the whole mesh of `grid`.
    ///
    /// Buffers are sized up front from a counting pass and never grow.
    pub fn build(&self, grid: &VoxelGrid) -> MeshData {
        let _span = tracing::trace_span!("mesh.build", size = grid.size()).entered();

        let quads = count_exposed_faces(grid);
        let mut vertices = Vec::with_capacity(quads * 4);
        let mut indices = Vec::with_capacity(quads * 6);
        let colors = grid.palette().colors();

        for (pos, value) in grid.iter_filled() {
            // Cell values never exceed the palette length.
            let color = colors[usize::from(value) - 1];
            for axis in Axis::ALL {
                if !is_exposed(grid, pos, axis) {
                    continue;
                }
                let base = vertices.len() as u32;
                self.emit_quad(grid, pos, axis, color, &mut vertices);
                indices.extend(QUAD_INDICES.iter().map(|i| base + i));
            }
        }

        debug_assert_eq!(vertices.len(), quads * 4);
        debug_assert_eq!(indices.len(), quads * 6);
        tracing::trace!(quads, "mesh built");

        MeshData { vertices, indices }
    }

    fn emit_quad(
        &self,
        grid: &VoxelGrid,
        pos: CellPos,
        axis: Axis,
        color: Rgb,
        out: &mut Vec<MeshVertex>,
    ) {
        let origin = pos.to_ivec3();
        let corners = face_corners(axis).map(|c| origin + IVec3::from_array(c));
        let ao = corners.map(|c| ambient_occlusion(grid, c, axis, self.config.ao_radius));

        // Flipped quads start at the second corner so the shared diagonal
        // runs between corners two and four.
        let start = usize::from(self.config.flip_quads && ao[0] + ao[2] < ao[1] + ao[3]);

        let normal = axis.normal().to_array();
        for n in 0..4 {
            let i = (start + n) % 4;
            out.push(MeshVertex {
                position: corners[i].as_vec3().to_array(),
                color: color.scaled(ao[i]).to_array(),
                normal,
            });
        }
    }
}

/// Build a mesh with the default settings.
pub fn build_mesh(grid: &VoxelGrid) -> MeshData {
    Mesher::default().build(grid)
}
