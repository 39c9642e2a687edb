//! Cell coordinates within a model grid.

use crate::types::Axis;
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Integer cell coordinate `(i, j, k)`.
///
/// Coordinates are signed so that neighbors of border cells can be expressed;
/// a grid treats any position outside `[0, size)` as empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    /// Create a new cell position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighboring cell across the given face
    #[inline]
    pub fn neighbor(self, axis: Axis) -> Self {
        Self::from(self.to_ivec3() + axis.offset())
    }

    /// Returns true if the position lies in a cubic grid of the given size
    #[inline]
    pub const fn in_bounds(self, size: usize) -> bool {
        let s = size as i64;
        (self.x as i64) >= 0
            && (self.x as i64) < s
            && (self.y as i64) >= 0
            && (self.y as i64) < s
            && (self.z as i64) >= 0
            && (self.z as i64) < s
    }

    /// Convert to glam IVec3
    #[inline]
    pub const fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Minimum corner of the cell in grid-local units
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.to_ivec3().as_vec3()
    }
}

impl From<IVec3> for CellPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_steps_one_cell() {
        let pos = CellPos::new(1, 1, 1);
        assert_eq!(pos.neighbor(Axis::NegX), CellPos::new(0, 1, 1));
        assert_eq!(pos.neighbor(Axis::PosY), CellPos::new(1, 2, 1));
        assert_eq!(pos.neighbor(Axis::PosZ), CellPos::new(1, 1, 2));
    }

    #[test]
    fn bounds_check() {
        assert!(CellPos::new(0, 0, 0).in_bounds(1));
        assert!(!CellPos::new(1, 0, 0).in_bounds(1));
        assert!(!CellPos::new(-1, 0, 0).in_bounds(4));
        assert!(CellPos::new(255, 255, 255).in_bounds(256));
        assert!(!CellPos::new(0, 256, 0).in_bounds(256));
    }
}
