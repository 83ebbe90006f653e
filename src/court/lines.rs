use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec2, Vec3};

use crate::{
    geometry::{
        curves::Path2D,
        primitives::{circle_outline, line_segment, polyline},
    },
    scene_graph::{Material, Mesh, Object3D, ObjectId, Scene},
};

/// Height of the painted lines, just above the floor's top face.
pub const LINE_HEIGHT: f32 = 0.11;

const LINE_COLOR: u32 = 0xffffff;
const CIRCLE_RADIUS: f32 = 1.8;
const CIRCLE_SEGMENTS: u32 = 64;
const THREE_POINT_RADIUS: f32 = 6.75;
const THREE_POINT_CENTER_X: f32 = 13.0;
const ARC_DIVISIONS: u32 = 100;
const BASELINE_X: f32 = 15.0;
const FREE_THROW_X: f32 = 10.2;
const KEY_HALF_WIDTH: f32 = 2.9;
const HALF_COURT_WIDTH: f32 = 7.5;

fn add_line(scene: &mut Scene, parent: ObjectId, name: &str, from: Vec3, to: Vec3) -> ObjectId {
    scene.spawn_mesh(
        name,
        line_segment(from, to),
        Material::line(LINE_COLOR),
        Some(parent),
        |object| object,
    )
}

/// Three-point arc around the origin, opening towards -X unless `flip`.
fn three_point_arc_points(flip: bool) -> Vec<Vec3> {
    let mut shape = Path2D::new();
    shape.absarc(
        Vec2::ZERO,
        THREE_POINT_RADIUS,
        -FRAC_PI_2,
        FRAC_PI_2,
        flip,
    );

    shape
        .get_points(ARC_DIVISIONS)
        .into_iter()
        .map(|point| Vec3::new(point.x, LINE_HEIGHT, point.y))
        .collect()
}

/// Adds every painted court marking under a "Court Lines" group.
pub fn create_court_lines(scene: &mut Scene) -> ObjectId {
    let lines = scene.add_object(Object3D::group("Court Lines"));

    add_line(
        scene,
        lines,
        "Center Line",
        Vec3::new(0.0, LINE_HEIGHT, -HALF_COURT_WIDTH),
        Vec3::new(0.0, LINE_HEIGHT, HALF_COURT_WIDTH),
    );

    // Circles are built in the XY plane and laid flat
    let lay_flat = Quat::from_rotation_x(-FRAC_PI_2);

    scene.spawn_mesh(
        "Center Circle",
        circle_outline(CIRCLE_RADIUS, CIRCLE_SEGMENTS),
        Material::line(LINE_COLOR),
        Some(lines),
        |object| {
            object
                .rotated(lay_flat)
                .at(Vec3::new(0.0, LINE_HEIGHT, 0.0))
        },
    );

    for (name, x, flip) in [
        ("Three Point Arc (Left)", -THREE_POINT_CENTER_X, false),
        ("Three Point Arc (Right)", THREE_POINT_CENTER_X, true),
    ] {
        scene.spawn_mesh(
            name,
            polyline(&three_point_arc_points(flip)),
            Material::line(LINE_COLOR),
            Some(lines),
            |object| object.at(Vec3::new(x, 0.0, 0.0)),
        );
    }

    for side in [-1.0_f32, 1.0] {
        let baseline = BASELINE_X * side;
        let free_throw = FREE_THROW_X * side;
        let label = if side < 0.0 { "Left" } else { "Right" };

        for z in [-KEY_HALF_WIDTH, KEY_HALF_WIDTH] {
            add_line(
                scene,
                lines,
                &format!("Key Side ({label})"),
                Vec3::new(baseline, LINE_HEIGHT, z),
                Vec3::new(free_throw, LINE_HEIGHT, z),
            );
        }

        add_line(
            scene,
            lines,
            &format!("Free Throw Line ({label})"),
            Vec3::new(free_throw, LINE_HEIGHT, -KEY_HALF_WIDTH),
            Vec3::new(free_throw, LINE_HEIGHT, KEY_HALF_WIDTH),
        );
    }

    // Both free throw circles share one outline
    let free_throw_circle = scene.add_mesh(Mesh::new(
        "Free Throw Circle",
        circle_outline(CIRCLE_RADIUS, CIRCLE_SEGMENTS),
        Material::line(LINE_COLOR),
    ));

    for (name, x) in [
        ("Free Throw Circle (Left)", -FREE_THROW_X),
        ("Free Throw Circle (Right)", FREE_THROW_X),
    ] {
        scene.add_child(
            lines,
            Object3D::with_mesh(name, free_throw_circle)
                .rotated(lay_flat)
                .at(Vec3::new(x, LINE_HEIGHT, 0.0)),
        );
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_points(scene: &Scene, id: ObjectId) -> Vec<Vec3> {
        let object = scene.get_object(id).unwrap();
        let mesh = scene.get_mesh(object.mesh_id.unwrap()).unwrap();
        let world = scene.world_matrix(id).unwrap();

        mesh.geometry
            .positions()
            .map(|p| world.transform_point3(p))
            .collect()
    }

    fn build() -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let lines = create_court_lines(&mut scene);
        scene.late_update();
        (scene, lines)
    }

    #[test]
    fn every_marking_sits_on_the_line_height() {
        let (scene, lines) = build();
        let children = &scene.get_object(lines).unwrap().child_ids;

        // centre line + circle, 2 arcs, 2 x 3 key lines, 2 free throw circles
        assert_eq!(children.len(), 12);

        for &child in children {
            for point in world_points(&scene, child) {
                assert!((point.y - LINE_HEIGHT).abs() < 1e-5, "{point}");
            }
        }
    }

    #[test]
    fn three_point_arcs_bulge_towards_centre_court() {
        let (scene, _) = build();

        let left = scene.get_object_by_name("Three Point Arc (Left)").unwrap();
        let right = scene.get_object_by_name("Three Point Arc (Right)").unwrap();

        let left_points = world_points(&scene, left);
        let right_points = world_points(&scene, right);

        assert_eq!(left_points.len(), 201);
        let left_max = left_points.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        let right_min = right_points.iter().map(|p| p.x).fold(f32::MAX, f32::min);

        assert!((left_max - (-13.0 + 6.75)).abs() < 1e-3);
        assert!((right_min - (13.0 - 6.75)).abs() < 1e-3);
        assert!(left_points.iter().all(|p| p.x >= -13.0 - 1e-3));
    }

    #[test]
    fn free_throw_circles_share_a_mesh() {
        let (scene, _) = build();

        let left = scene.get_object_by_name("Free Throw Circle (Left)").unwrap();
        let right = scene.get_object_by_name("Free Throw Circle (Right)").unwrap();

        assert_eq!(
            scene.get_object(left).unwrap().mesh_id,
            scene.get_object(right).unwrap().mesh_id
        );

        for point in world_points(&scene, right) {
            let from_center = point - Vec3::new(10.2, LINE_HEIGHT, 0.0);
            assert!((from_center.length() - 1.8).abs() < 1e-4);
        }
    }

    #[test]
    fn centre_line_spans_court_width() {
        let (scene, _) = build();
        let id = scene.get_object_by_name("Center Line").unwrap();

        assert_eq!(
            world_points(&scene, id),
            vec![
                Vec3::new(0.0, LINE_HEIGHT, -7.5),
                Vec3::new(0.0, LINE_HEIGHT, 7.5)
            ]
        );
    }
}
