//! Editable voxel model.
//!
//! `VoxelModel` owns a grid and everything derived from it: the surface mesh,
//! the bounds wireframe and the root widget. Every mutation that changes
//! cells rebuilds the mesh before returning, so a renderer never sees cells
//! and mesh disagree. Derived geometry carries a version drawn from a
//! process-wide counter; a renderer re-uploads whenever the version it last
//! saw differs.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Vec3};
use tracing::{debug, warn};
use voxmod_core::{CellPos, Ray, Result, Rgb, Rgba};
use voxmod_mesh::{
    bounds_lines, root_axes, LineVertex, MeshData, MeshVertex, Mesher, MesherConfig,
};
use voxmod_voxel::{Palette, VoxelGrid};

use crate::config::ModelConfig;
use crate::picker::{pick, Pick};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// Why an edit left the model untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The ray hit no filled cell
    Miss,
    /// The color was new and the palette had no room for it
    PaletteFull,
    /// The cell next to the hit face lies outside the grid
    OutsideGrid,
}

/// Result of [`VoxelModel::modify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    /// A voxel of palette entry `index` was placed at `cell`
    Added { cell: CellPos, index: u8 },
    /// The voxel at `cell` was cleared
    Removed { cell: CellPos },
    /// Nothing changed in the grid
    Skipped(SkipReason),
}

impl Edit {
    /// Returns true if the grid changed.
    #[inline]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// Read-only view of the current surface mesh.
#[derive(Clone, Copy, Debug)]
pub struct MeshView<'a> {
    pub vertices: &'a [MeshVertex],
    pub indices: &'a [u32],
    /// Changes on every rebuild
    pub version: u64,
}

impl MeshView<'_> {
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Read-only view of a line list (bounds or root widget).
#[derive(Clone, Copy, Debug)]
pub struct LineView<'a> {
    /// Segment endpoints, two per line
    pub vertices: &'a [LineVertex],
    pub version: u64,
}

/// A voxel grid together with its derived render geometry.
#[derive(Debug)]
pub struct VoxelModel {
    grid: VoxelGrid,
    mesher: Mesher,
    mesh: MeshData,
    mesh_version: u64,
    bounds: Vec<LineVertex>,
    bounds_version: u64,
    axes: [LineVertex; 6],
    root_version: u64,
}

impl VoxelModel {
    /// Create a white-seeded model of the given size with default settings.
    pub fn new(size: usize) -> Self {
        Self::from_config(&ModelConfig::new(size))
    }

    /// Create a model from a config.
    pub fn from_config(config: &ModelConfig) -> Self {
        let mut grid = VoxelGrid::new(config.size, config.seed_color);
        grid.set_scale(config.scale);
        if let Some(root) = config.root {
            grid.set_root(root);
        }
        Self::with_grid(grid, Mesher::new(config.mesher))
    }

    /// Parse a model from `.voxel` bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Ok(Self::with_grid(VoxelGrid::decode(data)?, Mesher::default()))
    }

    fn with_grid(grid: VoxelGrid, mesher: Mesher) -> Self {
        let mut model = Self {
            grid,
            mesher,
            mesh: MeshData::default(),
            mesh_version: 0,
            bounds: Vec::new(),
            bounds_version: 0,
            axes: root_axes(),
            root_version: next_version(),
        };
        model.rebuild_bounds();
        model.rebuild_mesh();
        model
    }

    /// Serialize into `.voxel` bytes.
    pub fn encode(&self) -> Vec<u8> {
        self.grid.encode()
    }

    /// Serialize into a byte sink.
    pub fn encode_into<W: Write>(&self, writer: &mut W) -> Result<()> {
        voxmod_voxel::encode_into(&self.grid, writer)
    }

    /// Replace this model with one parsed from `data`.
    ///
    /// On failure the current model is kept untouched and the error is
    /// returned. Mesher settings carry over to the loaded model.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let grid = match VoxelGrid::decode(data) {
            Ok(grid) => grid,
            Err(err) => {
                warn!(%err, len = data.len(), "Rejected model data");
                return Err(err);
            }
        };
        *self = Self::with_grid(grid, self.mesher);
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        self.grid.palette()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn mesher(&self) -> &Mesher {
        &self.mesher
    }

    /// Switch mesher settings and rebuild the mesh.
    pub fn set_mesher_config(&mut self, config: MesherConfig) {
        if *self.mesher.config() == config {
            return;
        }
        self.mesher = Mesher::new(config);
        self.rebuild_mesh();
    }

    /// Change the grid size, keeping content centered.
    ///
    /// Returns the clamped size. Resizing to the current size does nothing.
    pub fn resize(&mut self, new_size: usize) -> usize {
        let old_size = self.grid.size();
        let size = self.grid.resize(new_size);
        if size == old_size {
            debug!(size, "Resize to current size skipped");
            return size;
        }
        self.rebuild_bounds();
        self.rebuild_mesh();
        size
    }

    /// Move the grid origin. Cells and mesh are unaffected.
    pub fn set_root(&mut self, root: Vec3) {
        self.grid.set_root(root);
        self.root_version = next_version();
    }

    /// Set the model scale, clamped to `1..=256`.
    pub fn set_scale(&mut self, scale: u32) {
        self.grid.set_scale(scale);
    }

    /// The filled cell nearest to the ray origin.
    pub fn pick(&self, ray: &Ray) -> Option<Pick> {
        pick(&self.grid, ray)
    }

    /// Add or remove a voxel where `ray` hits the model.
    ///
    /// A fully transparent `color` removes the hit voxel. Any other color is
    /// resolved in the palette first (appending it if new) and a voxel of that
    /// color is placed against the hit face. The palette may therefore grow
    /// even when no voxel ends up being placed.
    pub fn modify(&mut self, ray: &Ray, color: Rgba) -> Result<Edit> {
        let edit = if color.is_transparent() {
            self.remove_at(ray)?
        } else {
            self.add_at(ray, color.rgb())?
        };

        match edit {
            Edit::Skipped(reason) => debug!(?reason, "Edit skipped"),
            _ => self.rebuild_mesh(),
        }
        Ok(edit)
    }

    fn add_at(&mut self, ray: &Ray, color: Rgb) -> Result<Edit> {
        let Ok(index) = self.grid.palette_mut().find_or_append(color) else {
            return Ok(Edit::Skipped(SkipReason::PaletteFull));
        };
        let Some(hit) = self.pick(ray) else {
            return Ok(Edit::Skipped(SkipReason::Miss));
        };

        let cell = hit.cell.neighbor(hit.hit.axis);
        if self.grid.set(cell, index)? {
            Ok(Edit::Added { cell, index })
        } else {
            Ok(Edit::Skipped(SkipReason::OutsideGrid))
        }
    }

    fn remove_at(&mut self, ray: &Ray) -> Result<Edit> {
        let Some(hit) = self.pick(ray) else {
            return Ok(Edit::Skipped(SkipReason::Miss));
        };
        self.grid.set(hit.cell, 0)?;
        Ok(Edit::Removed { cell: hit.cell })
    }

    /// Append a palette color, failing with `PaletteFull` at capacity.
    pub fn append_color(&mut self, color: Rgb) -> Result<u8> {
        self.grid.palette_mut().append(color)
    }

    /// Remove an unused palette entry; see [`VoxelGrid::remove_color`].
    ///
    /// Cells are untouched, so the mesh is not rebuilt.
    pub fn remove_color(&mut self, index: u8) -> Result<Rgb> {
        self.grid.remove_color(index)
    }

    /// Current surface mesh.
    pub fn mesh_view(&self) -> MeshView<'_> {
        MeshView {
            vertices: &self.mesh.vertices,
            indices: &self.mesh.indices,
            version: self.mesh_version,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Wireframe of the grid volume in grid-local coordinates.
    pub fn bounds_view(&self) -> LineView<'_> {
        LineView {
            vertices: &self.bounds,
            version: self.bounds_version,
        }
    }

    /// Axis widget drawn at the root; the version changes with the root.
    pub fn root_view(&self) -> LineView<'_> {
        LineView {
            vertices: &self.axes,
            version: self.root_version,
        }
    }

    /// Grid-local to world transform applied to the mesh and bounds.
    pub fn model_transform(&self) -> Mat4 {
        Mat4::from_translation(self.grid.root())
    }

    fn rebuild_mesh(&mut self) {
        self.mesh = self.mesher.build(&self.grid);
        self.mesh_version = next_version();
        debug!(
            quads = self.mesh.quad_count(),
            version = self.mesh_version,
            "Mesh rebuilt"
        );
    }

    fn rebuild_bounds(&mut self) {
        self.bounds = bounds_lines(self.grid.size());
        self.bounds_version = next_version();
    }
}

impl Default for VoxelModel {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}
