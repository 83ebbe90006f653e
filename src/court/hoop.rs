use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};

use crate::{
    geometry::primitives::{
        box_geometry, cylinder_geometry, line_segment, torus_geometry, DEFAULT_RADIAL_SEGMENTS,
    },
    scene_graph::{Material, Object3D, ObjectId, Scene},
};

pub const RIM_HEIGHT: f32 = 9.048;

const BASE_RADIUS: f32 = 0.4;
const BASE_HEIGHT: f32 = 0.2;
const POLE_RADIUS: f32 = 0.12;
const BACKBOARD_OFFSET: f32 = 0.6;
const ARM_OFFSET: f32 = 0.3;
const RIM_OFFSET: f32 = 1.1;
const NET_STRANDS: usize = 12;
const NET_TOP_RADIUS: f32 = 0.42;
const NET_BOTTOM_RADIUS: f32 = 0.2;
const NET_LENGTH: f32 = 0.8;

const FRAME_COLOR: u32 = 0x444444;

/// Builds the hoop standing at `x` on the court's long axis. Everything
/// overhangs towards centre court.
pub fn create_basketball_hoop(scene: &mut Scene, x: f32, name: &str) -> ObjectId {
    let hoop = scene.add_object(Object3D::group(name));
    let toward_center = if x < 0.0 { 1.0 } else { -1.0 };

    scene.spawn_mesh(
        &format!("{name} Base"),
        cylinder_geometry(BASE_RADIUS, BASE_RADIUS, BASE_HEIGHT, DEFAULT_RADIAL_SEGMENTS),
        Material::phong(0x333333),
        Some(hoop),
        |object| {
            object
                .at(Vec3::new(x, BASE_HEIGHT / 2.0, 0.0))
                .casting_shadow()
        },
    );

    scene.spawn_mesh(
        &format!("{name} Pole"),
        cylinder_geometry(POLE_RADIUS, POLE_RADIUS, RIM_HEIGHT, DEFAULT_RADIAL_SEGMENTS),
        Material::phong(FRAME_COLOR),
        Some(hoop),
        |object| {
            object
                .at(Vec3::new(x, RIM_HEIGHT / 2.0, 0.0))
                .casting_shadow()
        },
    );

    scene.spawn_mesh(
        &format!("{name} Backboard"),
        box_geometry(0.1, 2.5, 4.0),
        Material::phong_transparent(0xffffff, 0.9),
        Some(hoop),
        |object| {
            object
                .at(Vec3::new(x + BACKBOARD_OFFSET * toward_center, RIM_HEIGHT, 0.0))
                .casting_shadow()
                .receiving_shadow()
        },
    );

    scene.spawn_mesh(
        &format!("{name} Arm"),
        box_geometry(BACKBOARD_OFFSET, 0.15, 0.15),
        Material::phong(FRAME_COLOR),
        Some(hoop),
        |object| {
            object
                .at(Vec3::new(x + ARM_OFFSET * toward_center, RIM_HEIGHT, 0.0))
                .casting_shadow()
        },
    );

    let rim_position = Vec3::new(x + RIM_OFFSET * toward_center, RIM_HEIGHT, 0.0);

    scene.spawn_mesh(
        &format!("{name} Rim"),
        torus_geometry(0.45, 0.04, 8, 16),
        Material::phong(0xff6600),
        Some(hoop),
        |object| {
            object
                .rotated(Quat::from_rotation_x(FRAC_PI_2))
                .at(rim_position)
                .casting_shadow()
        },
    );

    for (i, (top, bottom)) in net_strands(rim_position).into_iter().enumerate() {
        scene.spawn_mesh(
            &format!("{name} Net Strand {i}"),
            line_segment(top, bottom),
            Material::line(0xffffff),
            Some(hoop),
            |object| object,
        );
    }

    hoop
}

/// Straight strands tapering from just inside the rim down and inwards.
fn net_strands(rim_position: Vec3) -> Vec<(Vec3, Vec3)> {
    (0..NET_STRANDS)
        .map(|i| {
            let angle = i as f32 / NET_STRANDS as f32 * TAU;
            let (sin, cos) = angle.sin_cos();

            let top = Vec3::new(
                rim_position.x + NET_TOP_RADIUS * cos,
                rim_position.y,
                rim_position.z + NET_TOP_RADIUS * sin,
            );
            let bottom = Vec3::new(
                rim_position.x + NET_BOTTOM_RADIUS * cos,
                rim_position.y - NET_LENGTH,
                rim_position.z + NET_BOTTOM_RADIUS * sin,
            );

            (top, bottom)
        })
        .collect()
}
