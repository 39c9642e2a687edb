//! Per-vertex ambient occlusion.
//!
//! Occlusion at a vertex is sampled over nested boxes of growing radius on
//! the outward side of a face. Each level counts the filled cells in a
//! half-box of side `2r` and blends in the level below with a small bias so
//! the near field sharpens corners without zeroing the product.

use glam::IVec3;
use voxmod_core::{Axis, CellPos};
use voxmod_voxel::VoxelGrid;

/// Default sampling radius.
pub const AO_RADIUS: u32 = 3;
/// Bias added to the inner level before blending.
pub const AO_BIAS: f32 = 0.1;

/// Lightness factor for the vertex at `corner` of a face pointing along `face`.
///
/// Returns 1.0 with no occluders; never exceeds 1.0 and never drops below 0.
/// A radius of 0 disables occlusion.
pub fn ambient_occlusion(grid: &VoxelGrid, corner: IVec3, face: Axis, radius: u32) -> f32 {
    (1..=radius).fold(1.0, |inner, r| {
        let r = r as i32;
        let open = 1.0 - occupied_in_half_box(grid, corner, face, r) as f32 / half_box_volume(r);
        open * (inner + AO_BIAS) / (1.0 + AO_BIAS)
    })
}

/// `(2r)³ / 2`
#[inline]
fn half_box_volume(r: i32) -> f32 {
    let side = 2 * r;
    (side * side * side) as f32 / 2.0
}

fn occupied_in_half_box(grid: &VoxelGrid, corner: IVec3, face: Axis, r: i32) -> u32 {
    let mut lo = IVec3::splat(-r);
    let mut hi = IVec3::splat(r);
    let c = face.component();
    if face.is_positive() {
        lo[c] = 0;
    } else {
        hi[c] = 0;
    }

    let mut count = 0;
    for dx in lo.x..hi.x {
        for dy in lo.y..hi.y {
            for dz in lo.z..hi.z {
                let p = corner + IVec3::new(dx, dy, dz);
                if grid.is_solid(CellPos::from(p)) {
                    count += 1;
                }
            }
        }
    }
    count
}
