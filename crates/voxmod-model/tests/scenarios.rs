//! End-to-end behavior of the public model surface.

use approx::assert_relative_eq;
use glam::{IVec3, Vec3};
use voxmod_core::{Axis, CellPos, Error, Ray, Rgb, Rgba};
use voxmod_mesh::{ambient_occlusion, count_exposed_faces, AO_RADIUS};
use voxmod_model::{Edit, SkipReason, VoxelModel};
use voxmod_voxel::{encoded_len, VoxelGrid};

const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

/// Ray travelling along -X through the center of cell row `(j, k)` of a
/// model with root `-S/2`.
fn ray_from_pos_x(model: &VoxelModel, j: i32, k: i32) -> Ray {
    let root = model.grid().root();
    let origin = root + Vec3::new(100.0, j as f32 + 0.5, k as f32 + 0.5);
    Ray::new(origin, Vec3::NEG_X)
}

fn assert_palette_referential(model: &VoxelModel) {
    let n = model.palette().len();
    assert!(model.grid().cells().iter().all(|&v| usize::from(v) <= n));
}

fn scripted_model() -> VoxelModel {
    let mut model = VoxelModel::new(6);
    model.set_scale(3);
    model.set_root(Vec3::new(0.5, -1.25, 7.0));
    for _ in 0..2 {
        let ray = ray_from_pos_x(&model, 3, 3);
        model.modify(&ray, RED).unwrap();
    }
    let up = Ray::new(model.grid().root() + Vec3::new(3.5, -50.0, 3.5), Vec3::Y);
    model.modify(&up, Rgba::new(0.0, 0.5, 1.0, 0.75)).unwrap();
    model.resize(5);
    model
}

#[test]
fn fresh_model_layout() {
    let model = VoxelModel::new(2);
    assert_eq!(model.palette().colors(), &[Rgb::new(1.0, 1.0, 1.0)]);
    assert_eq!(model.grid().root(), Vec3::splat(-1.0));

    let filled: Vec<_> = model.grid().iter_filled().collect();
    assert_eq!(filled, vec![(CellPos::new(1, 1, 1), 1)]);

    let bytes = model.encode();
    assert_eq!(bytes.len(), 36);
    assert_eq!(&bytes[..4], &[0, 1, 1, 0]);
    assert_eq!(bytes[35], 1);
    assert!(bytes[28..35].iter().all(|&b| b == 0));
}

#[test]
fn pick_miss_changes_nothing() {
    let mut model = VoxelModel::new(2);
    let ray = Ray::new(Vec3::splat(100.0), Vec3::X);
    assert!(model.pick(&ray).is_none());

    let bytes = model.encode();
    let version = model.mesh_view().version;
    for color in [Rgba::TRANSPARENT, Rgb::WHITE.with_alpha(1.0)] {
        let edit = model.modify(&ray, color).unwrap();
        assert_eq!(edit, Edit::Skipped(SkipReason::Miss));
    }
    assert_eq!(model.encode(), bytes);
    assert_eq!(model.mesh_view().version, version);
}

#[test]
fn add_past_border_only_grows_palette() {
    for origin in [Vec3::new(10.0, -0.5, -0.5), Vec3::new(10.0, 0.5, 0.5)] {
        let mut model = VoxelModel::new(2);
        let cells = model.grid().cells().to_vec();
        let version = model.mesh_view().version;

        let edit = model.modify(&Ray::new(origin, Vec3::NEG_X), RED).unwrap();

        assert!(!edit.is_change());
        assert_eq!(model.grid().cells(), &cells[..]);
        assert_eq!(model.palette().colors(), &[Rgb::WHITE, Rgb::RED]);
        assert_eq!(model.mesh_view().version, version);
    }

    let model = VoxelModel::new(2);
    let pick = model
        .pick(&Ray::new(Vec3::new(10.0, 0.5, 0.5), Vec3::NEG_X))
        .expect("hit");
    assert_eq!(pick.cell, CellPos::new(1, 1, 1));
    assert_eq!(pick.hit.axis, Axis::PosX);
}

#[test]
fn isolated_voxel_is_unoccluded() {
    let model = VoxelModel::new(2);
    let view = model.mesh_view();
    assert_eq!(view.quad_count(), 6);
    for v in view.vertices {
        assert_eq!(v.color, [1.0, 1.0, 1.0]);
        let corner = IVec3::from_array(v.position.map(|c| c as i32));
        let normal = Vec3::from_array(v.normal);
        let axis = Axis::ALL
            .into_iter()
            .find(|a| a.normal() == normal)
            .expect("axis normal");
        assert_eq!(ambient_occlusion(model.grid(), corner, axis, AO_RADIUS), 1.0);
    }
}

#[test]
fn round_trip_after_edits() {
    let mut model = VoxelModel::new(4);
    for _ in 0..3 {
        let ray = ray_from_pos_x(&model, 2, 2);
        model.modify(&ray, RED).unwrap();
    }
    // The seed sits at x = 2, so only one cell fits before the border.
    let row: Vec<u8> = (0..4).map(|x| model.grid().get(CellPos::new(x, 2, 2))).collect();
    assert_eq!(row, vec![0, 0, 1, 2]);

    let mut model = VoxelModel::new(8);
    for _ in 0..3 {
        let ray = ray_from_pos_x(&model, 4, 4);
        model.modify(&ray, RED).unwrap();
    }
    let row: Vec<u8> = (4..8).map(|x| model.grid().get(CellPos::new(x, 4, 4))).collect();
    assert_eq!(row, vec![1, 2, 2, 2]);

    let decoded = VoxelModel::decode(&model.encode()).unwrap();
    assert_eq!(decoded.size(), model.size());
    assert_eq!(decoded.palette(), model.palette());
    assert_eq!(decoded.grid().cells(), model.grid().cells());
    assert_eq!(decoded.grid().root(), model.grid().root());
    assert_eq!(decoded.grid().scale(), model.grid().scale());
    assert_eq!(decoded.mesh().vertices, model.mesh().vertices);
}

#[test]
fn rejected_load_keeps_model() {
    let source = VoxelModel::new(3).encode();
    let mut truncated = source.clone();
    truncated.pop();
    let mut resized = source.clone();
    resized[2] = 3;

    let mut model = scripted_model();
    let before = model.encode();
    let version = model.mesh_view().version;
    for bad in [&truncated, &resized] {
        assert!(matches!(VoxelModel::decode(bad), Err(Error::InvalidFormat(_))));
        assert!(matches!(model.load(bad), Err(Error::InvalidFormat(_))));
        assert_eq!(model.encode(), before);
        assert_eq!(model.mesh_view().version, version);
    }
}

#[test]
fn cells_reference_palette() {
    let model = scripted_model();
    assert_palette_referential(&model);
    assert_eq!(model.palette().len(), 3);
}

#[test]
fn round_trip_and_length() {
    let model = scripted_model();
    let bytes = model.encode();
    assert_eq!(bytes.len(), encoded_len(model.palette().len(), model.size()));

    let decoded = VoxelGrid::decode(&bytes).unwrap();
    assert_eq!(&decoded, model.grid());
    assert_eq!(decoded.encode(), bytes);

    let mut sink = Vec::new();
    model.encode_into(&mut sink).unwrap();
    assert_eq!(sink, bytes);
}

#[test]
fn mesh_covers_exactly_the_exposed_faces() {
    let model = scripted_model();
    let grid = model.grid();
    let view = model.mesh_view();

    let mut emitted = Vec::new();
    for quad in view.vertices.chunks_exact(4) {
        let normal = Vec3::from_array(quad[0].normal);
        let center = quad.iter().map(|v| Vec3::from_array(v.position)).sum::<Vec3>() / 4.0;
        let cell = CellPos::from((center - normal * 0.5).floor().as_ivec3());
        let axis = Axis::ALL
            .into_iter()
            .find(|a| a.normal() == normal)
            .expect("axis normal");
        emitted.push((cell, axis));
    }

    let mut expected = Vec::new();
    for (cell, _) in grid.iter_filled() {
        for axis in Axis::ALL {
            if !grid.is_solid(cell.neighbor(axis)) {
                expected.push((cell, axis));
            }
        }
    }
    assert_eq!(emitted, expected);
}

#[test]
fn buffer_sizes() {
    let model = scripted_model();
    let quads = count_exposed_faces(model.grid());
    let view = model.mesh_view();
    assert_eq!(view.vertices.len(), 4 * quads);
    assert_eq!(view.indices.len(), 6 * quads);
}

#[test]
fn ao_is_bounded() {
    // Grow a six-armed cross out of the seed so arms occlude each other.
    let mut model = VoxelModel::new(7);
    let center = model.grid().root() + Vec3::splat(3.5);
    for axis in Axis::ALL {
        for _ in 0..2 {
            let ray = Ray::new(center + axis.normal() * 100.0, -axis.normal());
            model.modify(&ray, Rgb::WHITE.with_alpha(1.0)).unwrap();
        }
    }
    assert_eq!(model.grid().filled_count(), 13);

    let view = model.mesh_view();
    assert!(view.vertices.iter().all(|v| v.color[0] > 0.0 && v.color[0] <= 1.0));
    assert!(view.vertices.iter().any(|v| v.color[0] < 1.0));
}

#[test]
fn add_then_remove_is_local_inverse() {
    let mut model = VoxelModel::new(5);
    let seed = CellPos::new(2, 2, 2);
    let original = model.grid().clone();

    let edit = model.modify(&ray_from_pos_x(&model, 2, 2), RED).unwrap();
    let Edit::Added { cell, .. } = edit else {
        panic!("expected an added voxel, got {edit:?}");
    };
    assert_eq!(cell, seed.neighbor(Axis::PosX));
    assert_eq!(model.grid().filled_count(), 2);

    let edit = model
        .modify(&ray_from_pos_x(&model, 2, 2), Rgba::TRANSPARENT)
        .unwrap();
    assert_eq!(edit, Edit::Removed { cell });
    assert_eq!(model.grid().cells(), original.cells());

    let edit = model
        .modify(&ray_from_pos_x(&model, 2, 2), Rgba::TRANSPARENT)
        .unwrap();
    assert_eq!(edit, Edit::Removed { cell: seed });
    assert_eq!(model.grid().filled_count(), 0);
}

#[test]
fn resize_to_same_size_keeps_cells() {
    let mut model = scripted_model();
    let cells = model.grid().cells().to_vec();
    let size = model.size();
    assert_eq!(model.resize(size), size);
    assert_eq!(model.grid().cells(), &cells[..]);
}

#[test]
fn resize_recenters_and_clips() {
    let mut model = VoxelModel::new(4);
    model.modify(&ray_from_pos_x(&model, 2, 2), RED).unwrap();

    model.resize(2);
    let filled: Vec<_> = model.grid().iter_filled().collect();
    assert_eq!(filled, vec![(CellPos::new(1, 1, 1), 1)]);

    model.resize(6);
    let filled: Vec<_> = model.grid().iter_filled().collect();
    assert_eq!(filled, vec![(CellPos::new(3, 3, 3), 1)]);

    assert_eq!(model.resize(1000), 256);
    assert_eq!(model.resize(0), 1);
}

#[test]
fn scale_is_clamped() {
    let mut model = VoxelModel::new(2);
    model.set_scale(0);
    assert_eq!(model.grid().scale(), 1);
    model.set_scale(1000);
    assert_eq!(model.grid().scale(), 256);
}

#[test]
fn palette_removal_policy() {
    let mut model = VoxelModel::new(4);
    let blue = model.append_color(Rgb::BLUE).unwrap();
    model.modify(&ray_from_pos_x(&model, 2, 2), RED).unwrap();

    // Red (index 3) is placed after the unused blue (index 2).
    let red = model.palette().find(Rgb::RED).unwrap();
    assert_eq!(red, 3);
    assert!(matches!(model.remove_color(blue), Err(Error::ColorInUse(3))));
    assert!(matches!(model.remove_color(red), Err(Error::ColorInUse(3))));
    assert!(matches!(model.remove_color(1), Err(Error::ColorInUse(1))));

    model
        .modify(&ray_from_pos_x(&model, 2, 2), Rgba::TRANSPARENT)
        .unwrap();
    let version = model.mesh_view().version;
    assert_eq!(model.remove_color(blue).unwrap(), Rgb::BLUE);
    assert_eq!(model.palette().colors(), &[Rgb::WHITE, Rgb::RED]);
    assert_eq!(model.mesh_view().version, version);
    assert_palette_referential(&model);
}

#[test]
fn removing_a_middle_color_keeps_the_rest() {
    let mut model = VoxelModel::new(4);
    let red = model.append_color(Rgb::RED).unwrap();
    model.append_color(Rgb::GREEN).unwrap();
    model.append_color(Rgb::BLUE).unwrap();

    model.remove_color(red).unwrap();
    assert_eq!(
        model.palette().colors(),
        &[Rgb::WHITE, Rgb::GREEN, Rgb::BLUE]
    );
    assert_palette_referential(&model);
}

#[test]
fn mesh_is_grid_local() {
    let mut model = VoxelModel::new(2);
    model.set_root(Vec3::new(40.0, 0.0, 0.0));
    let view = model.mesh_view();
    for v in view.vertices {
        assert!(v.position.iter().all(|&c| (1.0..=2.0).contains(&c)));
    }
    let world = model
        .model_transform()
        .transform_point3(Vec3::from_array(view.vertices[0].position));
    assert_relative_eq!(world.x, 41.0);
}
