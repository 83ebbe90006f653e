//! Procedural construction of the basketball court scene.
//!
//! Every builder adds its meshes to the [`Scene`] and returns the id of the
//! group (or primary object) it created.

use crate::{
    geometry::primitives::box_geometry,
    scene_graph::{Color, Material, ObjectId, Scene},
};

pub mod ball;
pub mod bleachers;
pub mod hoop;
pub mod lighting;
pub mod lines;
pub mod scoreboard;

pub use bleachers::BleacherSpec;
pub use scoreboard::ScoreboardSpec;

pub const COURT_LENGTH: f32 = 30.0;
pub const COURT_WIDTH: f32 = 15.0;
const FLOOR_THICKNESS: f32 = 0.2;
const HOOP_X: f32 = 15.0;
const BLEACHER_Z: f32 = 9.5;

pub fn create_court_floor(scene: &mut Scene) -> ObjectId {
    scene.spawn_mesh(
        "Court Floor",
        box_geometry(COURT_LENGTH, FLOOR_THICKNESS, COURT_WIDTH),
        Material::phong_shiny(0xc68642, 50.0),
        None,
        |object| object.receiving_shadow(),
    )
}

/// Populates `scene` with the whole court, its furniture and lights.
pub fn build_court(scene: &mut Scene, shadow_map_size: u32) {
    scene.background = Color::BLACK;
    lighting::add_lights(scene, shadow_map_size);

    create_court_floor(scene);
    lines::create_court_lines(scene);

    hoop::create_basketball_hoop(scene, -HOOP_X, "Hoop (Left)");
    hoop::create_basketball_hoop(scene, HOOP_X, "Hoop (Right)");

    ball::create_basketball(scene);

    bleachers::create_bleachers(scene, &BleacherSpec::sideline(BLEACHER_Z));
    bleachers::create_bleachers(scene, &BleacherSpec::sideline(-BLEACHER_Z));

    scoreboard::create_scoreboard(scene, &ScoreboardSpec::default());

    log::info!(
        "Court built: {} objects, {} meshes",
        scene.objects.len(),
        scene.meshes.len()
    );
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn court() -> Scene {
        let mut scene = Scene::new();
        build_court(&mut scene, 2048);
        scene.late_update();
        scene
    }

    #[test]
    fn floor_top_sits_under_the_lines() {
        let scene = court();

        let floor_id = scene.get_object_by_name("Court Floor").unwrap();
        let floor = scene.get_object(floor_id).unwrap();
        assert!(floor.receive_shadow);
        assert!(!floor.cast_shadow);

        let mesh = scene.get_mesh(floor.mesh_id.unwrap()).unwrap();
        let bounds = mesh.geometry.bounding_box().unwrap();

        assert_eq!(bounds.size(), Vec3::new(30.0, 0.2, 15.0));
        assert!(bounds.max.y < lines::LINE_HEIGHT);
    }

    #[test]
    fn top_level_objects_are_roots() {
        let scene = court();

        let mut roots: Vec<&str> = scene
            .objects
            .iter()
            .filter(|(_, object)| object.parent_id.is_none())
            .map(|(_, object)| object.name.as_str())
            .collect();
        roots.sort_unstable();

        assert_eq!(
            roots,
            [
                "Basketball",
                "Bleachers",
                "Bleachers",
                "Court Floor",
                "Court Lines",
                "Hoop (Left)",
                "Hoop (Right)",
                "Scoreboard",
            ]
        );

        let ball = scene.get_object_by_name("Ball").unwrap();
        let group = scene.get_object(ball).unwrap().parent_id.unwrap();
        assert_eq!(scene.get_object(group).unwrap().name, "Basketball");
    }

    #[test]
    fn scene_has_lights_and_black_background() {
        let scene = court();

        assert_eq!(scene.background, Color::BLACK);
        assert!(scene.directional_light.is_some());
        assert_eq!(scene.ambient_light.intensity, 0.6);
    }
}
