//! Core modeller types.

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Orthogonal direction identifying a cube face by its outward normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Axis {
    /// All six faces, in mesher emission order.
    pub const ALL: [Self; 6] = [
        Self::NegX,
        Self::PosX,
        Self::NegY,
        Self::PosY,
        Self::NegZ,
        Self::PosZ,
    ];

    /// Build a face tag from a component index (0 = x, 1 = y, 2 = z) and a sign.
    #[inline]
    pub const fn from_component(component: usize, positive: bool) -> Self {
        match (component, positive) {
            (0, false) => Self::NegX,
            (0, true) => Self::PosX,
            (1, false) => Self::NegY,
            (1, true) => Self::PosY,
            (_, false) => Self::NegZ,
            (_, true) => Self::PosZ,
        }
    }

    /// Component index this face is perpendicular to (0 = x, 1 = y, 2 = z).
    #[inline]
    pub const fn component(self) -> usize {
        match self {
            Self::NegX | Self::PosX => 0,
            Self::NegY | Self::PosY => 1,
            Self::NegZ | Self::PosZ => 2,
        }
    }

    /// Returns true if the face points along the positive axis
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Integer step from a cell to its neighbor across this face.
    #[inline]
    pub const fn offset(self) -> IVec3 {
        match self {
            Self::NegX => IVec3::NEG_X,
            Self::PosX => IVec3::X,
            Self::NegY => IVec3::NEG_Y,
            Self::PosY => IVec3::Y,
            Self::NegZ => IVec3::NEG_Z,
            Self::PosZ => IVec3::Z,
        }
    }

    /// Unit normal of this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        self.offset().as_vec3()
    }
}

/// Linear RGB color with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Opaque white, the color of a fresh model's seed voxel
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by the same factor.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Attach an alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// RGBA color used as an edit brush.
///
/// An alpha of exactly zero selects removal; any other alpha adds voxels of
/// the RGB part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// The eraser brush.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns true if this brush removes voxels
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }

    #[inline]
    pub const fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}
