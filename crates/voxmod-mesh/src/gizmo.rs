//! Line geometry for the model bounds and root widgets.

use voxmod_core::Rgb;

use crate::vertex::LineVertex;

/// Length of each root axis line.
pub const ROOT_AXIS_LENGTH: f32 = 2.0;

/// Color of the bounds wireframe.
pub const BOUNDS_COLOR: Rgb = Rgb::WHITE;

/// Edges of a unit cube as pairs of corner indices, corner `n` being
/// `(n & 1, (n >> 1) & 1, (n >> 2) & 1)`.
const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Wireframe of the grid volume `[0, size]³` as 12 line segments.
pub fn bounds_lines(size: usize) -> Vec<LineVertex> {
    let s = size as f32;
    let corner = |n: usize| {
        [
            (n & 1) as f32 * s,
            ((n >> 1) & 1) as f32 * s,
            ((n >> 2) & 1) as f32 * s,
        ]
    };
    let color = BOUNDS_COLOR.to_array();

    CUBE_EDGES
        .iter()
        .flat_map(|&(a, b)| {
            [
                LineVertex::new(corner(a), color),
                LineVertex::new(corner(b), color),
            ]
        })
        .collect()
}

/// Three axis lines from the origin: X red, Y green, Z blue.
pub fn root_axes() -> [LineVertex; 6] {
    let l = ROOT_AXIS_LENGTH;
    let (r, g, b) = (Rgb::RED.to_array(), Rgb::GREEN.to_array(), Rgb::BLUE.to_array());
    [
        LineVertex::new([0.0; 3], r),
        LineVertex::new([l, 0.0, 0.0], r),
        LineVertex::new([0.0; 3], g),
        LineVertex::new([0.0, l, 0.0], g),
        LineVertex::new([0.0; 3], b),
        LineVertex::new([0.0, 0.0, l], b),
    ]
}
