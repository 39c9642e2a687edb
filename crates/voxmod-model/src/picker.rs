//! Ray picking against filled cells.

use voxmod_core::{CellPos, Ray, RayHit};
use voxmod_voxel::VoxelGrid;

/// The filled cell nearest to a ray origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pick {
    pub cell: CellPos,
    pub hit: RayHit,
    /// Euclidean distance from the ray origin to the hit point
    pub distance: f32,
}

/// Find the filled cell whose entry point is closest to the ray origin.
///
/// Cells are tested in `(i, j, k)` ascending order and a later cell only
/// replaces the current best when strictly closer, so ties go to the first
/// cell in that order. Runs in `O(S³)`.
pub fn pick(grid: &VoxelGrid, ray: &Ray) -> Option<Pick> {
    let _span = tracing::trace_span!("model.pick", size = grid.size()).entered();

    let mut best: Option<Pick> = None;
    for (cell, _) in grid.iter_filled() {
        let Some(hit) = grid.cell_bounds(cell).hit_face(ray) else {
            continue;
        };
        let distance = hit.point.distance(ray.origin);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Pick {
                cell,
                hit,
                distance,
            });
        }
    }
    best
}
