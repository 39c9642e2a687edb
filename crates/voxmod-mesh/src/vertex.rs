//! GPU-ready vertex formats.

use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// Surface vertex emitted by the mesher.
///
/// Positions are grid-local; the renderer applies the model transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    /// Palette color multiplied by the vertex AO factor
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = size_of::<Self>();
}

/// Unshaded line vertex used by the bounds and root widgets.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const STRIDE: usize = size_of::<Self>();

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// One float attribute inside an interleaved vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute name
    pub name: &'static str,
    /// Number of `f32` components
    pub components: u32,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

/// Interleaved layout of [`MeshVertex`].
pub const VERTEX_LAYOUT: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "a_position",
        components: 3,
        offset: offset_of!(MeshVertex, position) as u32,
    },
    VertexAttribute {
        name: "a_color",
        components: 3,
        offset: offset_of!(MeshVertex, color) as u32,
    },
    VertexAttribute {
        name: "a_normal",
        components: 3,
        offset: offset_of!(MeshVertex, normal) as u32,
    },
];

/// Interleaved layout of [`LineVertex`].
pub const LINE_LAYOUT: [VertexAttribute; 2] = [
    VertexAttribute {
        name: "a_position",
        components: 3,
        offset: offset_of!(LineVertex, position) as u32,
    },
    VertexAttribute {
        name: "a_color",
        components: 3,
        offset: offset_of!(LineVertex, color) as u32,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_is_nine_floats() {
        assert_eq!(MeshVertex::STRIDE, 36);
        assert_eq!(LineVertex::STRIDE, 24);
    }

    #[test]
    fn layout_is_contiguous() {
        let mut expected = 0;
        for attr in VERTEX_LAYOUT {
            assert_eq!(attr.offset, expected);
            expected += attr.components * 4;
        }
        assert_eq!(expected as usize, MeshVertex::STRIDE);
    }

    #[test]
    fn line_layout_is_contiguous() {
        let mut expected = 0;
        for attr in LINE_LAYOUT {
            assert_eq!(attr.offset, expected);
            expected += attr.components * 4;
        }
        assert_eq!(expected as usize, LineVertex::STRIDE);
        // Shares attribute names with the surface layout
        assert_eq!(LINE_LAYOUT[0].name, VERTEX_LAYOUT[0].name);
        assert_eq!(LINE_LAYOUT[1].name, VERTEX_LAYOUT[1].name);
    }

    #[test]
    fn vertices_cast_to_bytes() {
        let v = [MeshVertex {
            position: [1.0, 2.0, 3.0],
            color: [0.5; 3],
            normal: [0.0, 1.0, 0.0],
        }];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), MeshVertex::STRIDE);
        assert_eq!(&bytes[..4], &1.0f32.to_ne_bytes());
    }
}
