//! Dense cubic voxel grid.
//!
//! Cells are stored as palette indices in a flat array with `i` (x) as the
//! outermost axis and `k` (z) as the innermost, matching the on-disk layout.

use glam::Vec3;
use hashbrown::HashMap;
use voxmod_core::constants::{
    EMPTY_CELL, MAX_GRID_SIZE, MAX_SCALE, MIN_GRID_SIZE, MIN_SCALE,
};
use voxmod_core::{Aabb, CellPos, Error, Result, Rgb};

use crate::palette::Palette;

/// Cubic grid of palette indices together with its palette, scale and root.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    size: usize,
    scale: u32,
    root: Vec3,
    cells: Vec<u8>,
    palette: Palette,
}

impl VoxelGrid {
    /// Create a grid with a single voxel of `seed` color near the center.
    ///
    /// `size` is clamped to `1..=256`. The root is placed so that the grid is
    /// centered on the world origin.
    pub fn new(size: usize, seed: Rgb) -> Self {
        let size = size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let mut grid = Self {
            size,
            scale: MIN_SCALE,
            root: Self::centered_root(size),
            cells: vec![EMPTY_CELL; size * size * size],
            palette: Palette::new(seed),
        };
        let mid = (size / 2) as i32;
        let index = grid.index(CellPos::new(mid, mid, mid));
        grid.cells[index] = 1;
        grid
    }

    /// Create a white-seeded grid of the given size.
    pub fn with_size(size: usize) -> Self {
        Self::new(size, Rgb::WHITE)
    }

    /// Assemble a grid from already decoded parts.
    ///
    /// Fails with `InvalidFormat` if the size is out of range, the cell count
    /// is not `size³`, or a cell refers past the end of the palette.
    pub fn from_parts(
        size: usize,
        scale: u32,
        root: Vec3,
        palette: Palette,
        cells: Vec<u8>,
    ) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(Error::InvalidFormat(format!("grid size {size} out of range")));
        }
        if cells.len() != size * size * size {
            return Err(Error::InvalidFormat(format!(
                "expected {} cells, got {}",
                size * size * size,
                cells.len()
            )));
        }
        if let Some(bad) = cells.iter().find(|&&v| usize::from(v) > palette.len()) {
            return Err(Error::InvalidFormat(format!(
                "cell value {bad} exceeds palette size {}",
                palette.len()
            )));
        }
        Ok(Self {
            size,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            root,
            cells,
            palette,
        })
    }

    /// Root that centers a grid of `size` on the origin.
    #[inline]
    pub fn centered_root(size: usize) -> Vec3 {
        Vec3::splat(-(size as f32) / 2.0)
    }

    /// Edge length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Model scale, opaque to the modeller.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// World-space offset of cell `(0, 0, 0)`'s minimum corner.
    #[inline]
    pub fn root(&self) -> Vec3 {
        self.root
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable palette access. Palettes only grow through this handle, so
    /// existing cell references stay valid.
    #[inline]
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Raw cell values in storage order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    fn index(&self, pos: CellPos) -> usize {
        let s = self.size;
        (pos.x as usize * s + pos.y as usize) * s + pos.z as usize
    }

    /// Returns true if the position lies inside the grid
    #[inline]
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.in_bounds(self.size)
    }

    /// Cell value at `pos`; positions outside the grid read as empty.
    #[inline]
    pub fn get(&self, pos: CellPos) -> u8 {
        if self.contains(pos) {
            self.cells[self.index(pos)]
        } else {
            EMPTY_CELL
        }
    }

    /// Returns true if the cell at `pos` holds a voxel
    #[inline]
    pub fn is_solid(&self, pos: CellPos) -> bool {
        self.get(pos) != EMPTY_CELL
    }

    /// Write a cell value.
    ///
    /// Returns `Ok(false)` without writing when `pos` lies outside the grid,
    /// and `InvalidIndex` when `value` does not refer to a palette entry.
    /// The caller is responsible for rebuilding any mesh derived from the grid.
    pub fn set(&mut self, pos: CellPos, value: u8) -> Result<bool> {
        if usize::from(value) > self.palette.len() {
            return Err(Error::InvalidIndex(usize::from(value)));
        }
        if !self.contains(pos) {
            return Ok(false);
        }
        let index = self.index(pos);
        self.cells[index] = value;
        Ok(true)
    }

    /// Change the edge length, keeping the content centered.
    ///
    /// Cell `p` moves to `p - ⌊(S - S′) / 2⌋` on every axis; cells that land
    /// outside the new grid are dropped. Returns the clamped new size.
    pub fn resize(&mut self, new_size: usize) -> usize {
        let new_size = new_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        if new_size == self.size {
            return new_size;
        }

        let shift = (self.size as i32 - new_size as i32).div_euclid(2);
        let mut cells = vec![EMPTY_CELL; new_size * new_size * new_size];
        for (pos, value) in self.iter_filled() {
            let moved = CellPos::new(pos.x - shift, pos.y - shift, pos.z - shift);
            if moved.in_bounds(new_size) {
                let (x, y, z) = (moved.x as usize, moved.y as usize, moved.z as usize);
                cells[(x * new_size + y) * new_size + z] = value;
            }
        }

        self.cells = cells;
        self.size = new_size;
        new_size
    }

    /// Set the model scale, clamped to `1..=256`.
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    pub fn set_root(&mut self, root: Vec3) {
        self.root = root;
    }

    /// Iterate non-empty cells in `(i, j, k)` ascending order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (CellPos, u8)> + '_ {
        let s = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != EMPTY_CELL)
            .map(move |(index, &v)| {
                let pos = CellPos::new(
                    (index / (s * s)) as i32,
                    ((index / s) % s) as i32,
                    (index % s) as i32,
                );
                (pos, v)
            })
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY_CELL).count()
    }

    /// Number of cells using each palette index.
    pub fn color_usage(&self) -> HashMap<u8, usize> {
        let mut usage = HashMap::new();
        for &v in self.cells.iter().filter(|&&v| v != EMPTY_CELL) {
            *usage.entry(v).or_insert(0) += 1;
        }
        usage
    }

    /// World-space box of a cell.
    #[inline]
    pub fn cell_bounds(&self, pos: CellPos) -> Aabb {
        Aabb::unit_cube(self.root + pos.to_vec3())
    }

    /// Remove palette entry `index`, returning its color.
    ///
    /// Later entries move down by one. Referenced indices never change, so
    /// removal is refused with `ColorInUse` while any cell refers to `index`
    /// or a later entry, and with `LastColor` when it would leave the palette
    /// empty.
    pub fn remove_color(&mut self, index: u8) -> Result<Rgb> {
        if index == EMPTY_CELL || usize::from(index) > self.palette.len() {
            return Err(Error::InvalidIndex(usize::from(index)));
        }
        if self.palette.len() == 1 {
            return Err(Error::LastColor);
        }
        if let Some(&used) = self.cells.iter().filter(|&&v| v >= index).min() {
            return Err(Error::ColorInUse(used));
        }
        Ok(self.palette.remove(index))
    }
}
