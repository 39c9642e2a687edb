//! Model creation settings.

use glam::Vec3;
use voxmod_core::Rgb;
use voxmod_mesh::MesherConfig;

/// Settings for a freshly created model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Grid edge length, clamped to `1..=256` on use.
    pub size: usize,
    /// Model scale, clamped to `1..=256` on use.
    pub scale: u32,
    /// Root position (None centers the grid on the origin).
    pub root: Option<Vec3>,
    /// Color of the seed voxel and first palette entry.
    pub seed_color: Rgb,
    /// Mesher settings.
    pub mesher: MesherConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            size: 16,
            scale: 1,
            root: None,
            seed_color: Rgb::WHITE,
            mesher: MesherConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Create a new config with the given grid size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set the model scale.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set an explicit root position.
    pub fn with_root(mut self, root: Vec3) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the seed color.
    pub fn with_seed_color(mut self, color: Rgb) -> Self {
        self.seed_color = color;
        self
    }

    /// Set the AO sampling radius (0 disables AO).
    pub fn with_ao_radius(mut self, radius: u32) -> Self {
        self.mesher.ao_radius = radius;
        self
    }

    /// Enable or disable AO-driven quad flipping.
    pub fn with_flip_quads(mut self, flip: bool) -> Self {
        self.mesher.flip_quads = flip;
        self
    }
}
