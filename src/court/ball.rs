use std::f32::consts::TAU;

use glam::Vec3;

use crate::{
    geometry::primitives::{polyline, sphere_geometry},
    scene_graph::{Material, Object3D, ObjectId, Scene},
};

pub const BALL_RADIUS: f32 = 0.8;
pub const BALL_POSITION: Vec3 = Vec3::new(0.0, 3.5, 0.0);

const SEAM_RADIUS: f32 = 0.82;
const SEAM_WAVE: f32 = 0.3;
const SEAM_SEGMENTS: usize = 32;

/// Seam curves relative to the ball centre, each a closed loop of
/// `SEAM_SEGMENTS + 1` points.
pub fn seam_points() -> [Vec<Vec3>; 3] {
    let sample = |f: fn(f32) -> Vec3| -> Vec<Vec3> {
        (0..=SEAM_SEGMENTS)
            .map(|i| f(i as f32 / SEAM_SEGMENTS as f32 * TAU))
            .collect()
    };

    [
        sample(|t| {
            Vec3::new(
                SEAM_RADIUS * t.cos(),
                SEAM_WAVE * (t / 2.0).sin(),
                SEAM_RADIUS * t.sin(),
            )
        }),
        sample(|t| {
            Vec3::new(
                SEAM_WAVE * (t / 2.0).sin(),
                SEAM_RADIUS * t.cos(),
                SEAM_RADIUS * t.sin(),
            )
        }),
        sample(|t| {
            Vec3::new(
                SEAM_RADIUS * t.cos(),
                -SEAM_WAVE * (t / 2.0).sin(),
                SEAM_RADIUS * t.sin(),
            )
        }),
    ]
}

/// Orange ball floating above centre court, with its seams as siblings.
pub fn create_basketball(scene: &mut Scene) -> ObjectId {
    let group = scene.add_object(Object3D::group("Basketball"));

    let ball = scene.spawn_mesh(
        "Ball",
        sphere_geometry(BALL_RADIUS, 32, 32),
        Material::phong_shiny(0xff7700, 10.0),
        Some(group),
        |object| object.at(BALL_POSITION).casting_shadow(),
    );

    for (i, points) in seam_points().iter().enumerate() {
        scene.spawn_mesh(
            &format!("Ball Seam {i}"),
            polyline(points),
            Material::line(0x000000),
            Some(group),
            |object| object.at(BALL_POSITION),
        );
    }

    ball
}
