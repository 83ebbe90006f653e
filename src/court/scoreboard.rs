use std::f32::consts::PI;

use glam::{Quat, Vec3};

use crate::{
    geometry::{
        primitives::{box_geometry, cylinder_geometry, DEFAULT_RADIAL_SEGMENTS},
        segment_font::{text_geometry, TextOptions},
    },
    scene_graph::{Material, Mesh, Object3D, ObjectId, Scene},
};

const TEXT_DEPTH: f32 = 0.02;
const TEXT_SURFACE_GAP: f32 = 0.01;
const CABLE_RADIUS: f32 = 0.05;
const CABLE_LENGTH: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreboardSpec {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
}

impl Default for ScoreboardSpec {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 12.0, 0.0),
            width: 8.0,
            height: 3.0,
            thickness: 0.3,
        }
    }
}

/// One line of text shown on both faces of the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreboardText {
    pub text: &'static str,
    pub size: f32,
    pub color: u32,
    /// Horizontal centre as a fraction of the board width.
    pub x_factor: f32,
    pub y: f32,
}

impl ScoreboardText {
    const fn new(text: &'static str, size: f32, color: u32, x_factor: f32, y: f32) -> Self {
        Self {
            text,
            size,
            color,
            x_factor,
            y,
        }
    }
}

const GREEN: u32 = 0x00ff00;

pub const SCOREBOARD_TEXT: [ScoreboardText; 6] = [
    ScoreboardText::new("85", 0.8, GREEN, -0.3, 0.2),
    ScoreboardText::new("HOME", 0.3, GREEN, -0.3, -0.3),
    ScoreboardText::new("92", 0.8, GREEN, 0.3, 0.2),
    ScoreboardText::new("GUEST", 0.3, GREEN, 0.3, -0.3),
    ScoreboardText::new("00:00", 0.4, 0xff6600, 0.0, 0.3),
    ScoreboardText::new("4TH", 0.3, 0xffff00, 0.0, -0.3),
];

/// Suspended board with cables and a text panel on each face. Children are
/// positioned relative to the returned group.
pub fn create_scoreboard(scene: &mut Scene, spec: &ScoreboardSpec) -> ObjectId {
    let group = scene.add_object(Object3D::group("Scoreboard").at(spec.position));

    scene.spawn_mesh(
        "Scoreboard Frame",
        box_geometry(spec.width, spec.height, spec.thickness),
        Material::phong_shiny(0x111111, 10.0),
        Some(group),
        |object| object.casting_shadow().receiving_shadow(),
    );

    let cable = scene.add_mesh(Mesh::new(
        "Scoreboard Cable",
        cylinder_geometry(CABLE_RADIUS, CABLE_RADIUS, CABLE_LENGTH, DEFAULT_RADIAL_SEGMENTS),
        Material::phong(0x444444),
    ));

    for x in [-spec.width / 3.0, spec.width / 3.0] {
        scene.add_child(
            group,
            Object3D::with_mesh("Scoreboard Cable", cable)
                .at(Vec3::new(x, spec.height / 2.0 + CABLE_LENGTH / 2.0, 0.0))
                .casting_shadow(),
        );
    }

    for entry in &SCOREBOARD_TEXT {
        add_text(scene, group, spec, entry);
    }

    group
}

fn add_text(scene: &mut Scene, group: ObjectId, spec: &ScoreboardSpec, entry: &ScoreboardText) {
    let geometry = text_geometry(
        entry.text,
        &TextOptions {
            size: entry.size,
            depth: TEXT_DEPTH,
        },
    );

    let text_width = geometry.bounding_box().map_or(0.0, |bounds| bounds.width());
    let x = entry.x_factor * spec.width;
    let z = spec.thickness / 2.0 + TEXT_SURFACE_GAP;

    let mesh = scene.add_mesh(Mesh::new(
        format!("Scoreboard Text {}", entry.text),
        geometry,
        Material::phong(entry.color),
    ));

    scene.add_child(
        group,
        Object3D::with_mesh(format!("{} (Front)", entry.text), mesh)
            .at(Vec3::new(x - text_width / 2.0, entry.y, z)),
    );

    // Rotated half a turn, so the glyphs run the other way along X
    scene.add_child(
        group,
        Object3D::with_mesh(format!("{} (Back)", entry.text), mesh)
            .rotated(Quat::from_rotation_y(PI))
            .at(Vec3::new(x + text_width / 2.0, entry.y, -z)),
    );
}
