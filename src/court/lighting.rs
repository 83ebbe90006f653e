use glam::Vec3;

use crate::scene_graph::{
    AmbientLight, Color, DirectionalLight, DirectionalShadow, Scene, ShadowCamera,
};

pub const SUN_POSITION: Vec3 = Vec3::new(10.0, 20.0, 15.0);

/// Shadow frustum large enough to cover the court and both stands.
const SHADOW_CAMERA: ShadowCamera = ShadowCamera {
    left: -25.0,
    right: 25.0,
    bottom: -25.0,
    top: 25.0,
    near: 0.5,
    far: 50.0,
};

pub fn add_lights(scene: &mut Scene, shadow_map_size: u32) {
    scene.ambient_light = AmbientLight {
        color: Color::WHITE,
        intensity: 0.6,
    };

    scene.directional_light = Some(DirectionalLight {
        color: Color::WHITE,
        intensity: 1.0,
        position: SUN_POSITION,
        target: Vec3::ZERO,
        shadow: Some(DirectionalShadow {
            map_size: shadow_map_size,
            camera: SHADOW_CAMERA,
        }),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bounds::AABB;

    fn clip_position(point: Vec3) -> Vec3 {
        let light = sun();
        light.shadow_view_projection().unwrap().project_point3(point)
    }

    fn sun() -> DirectionalLight {
        let mut scene = Scene::new();
        add_lights(&mut scene, 2048);
        scene.directional_light.unwrap()
    }

    fn inside_shadow_frustum(point: Vec3) -> bool {
        let clip = clip_position(point);
        clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0 && (0.0..=1.0).contains(&clip.z)
    }

    #[test]
    fn shadow_frustum_covers_the_shadow_casters() {
        // Floor, hoops up to the backboard top, and the lower stands
        let hoops = AABB::new(Vec3::new(-15.5, -0.1, -7.5), Vec3::new(15.5, 10.5, 7.5));
        let stands = AABB::new(Vec3::new(-15.0, -0.1, -17.5), Vec3::new(15.0, 5.0, 17.5));

        for corner in hoops.corners().into_iter().chain(stands.corners()) {
            assert!(inside_shadow_frustum(corner), "{corner}");
        }
    }

    #[test]
    fn far_top_corner_above_the_stands_is_outside_the_shadow_frustum() {
        let corner = Vec3::new(-15.0, 13.5, -17.5);

        assert!(clip_position(corner).y > 1.0);
        assert!(!inside_shadow_frustum(corner));
    }

    #[test]
    fn lights_use_configured_values() {
        let mut scene = Scene::new();
        add_lights(&mut scene, 1024);

        assert_eq!(scene.ambient_light.intensity, 0.6);

        let light = scene.directional_light.unwrap();
        assert_eq!(light.shadow.unwrap().map_size, 1024);
        assert_eq!(light.direction_to_light(), SUN_POSITION.normalize());
    }
}
