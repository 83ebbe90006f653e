use glam::{Mat4, Vec3};

use crate::scene_graph::material::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.0,
        }
    }
}

/// Orthographic shadow camera bounds, in light view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalShadow {
    pub map_size: u32,
    pub camera: ShadowCamera,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub shadow: Option<DirectionalShadow>,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface towards the light.
    pub fn direction_to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or(Vec3::Y)
    }

    pub fn shadow_view_projection(&self) -> Option<Mat4> {
        let shadow = self.shadow.as_ref()?;
        let camera = &shadow.camera;

        let up = if self.direction_to_light().abs_diff_eq(Vec3::Y, 1e-4) {
            Vec3::Z
        } else {
            Vec3::Y
        };

        let view = Mat4::look_at_rh(self.position, self.target, up);
        let projection = Mat4::orthographic_rh(
            camera.left,
            camera.right,
            camera.bottom,
            camera.top,
            camera.near,
            camera.far,
        );

        Some(projection * view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> DirectionalLight {
        DirectionalLight {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(10.0, 20.0, 15.0),
            target: Vec3::ZERO,
            shadow: Some(DirectionalShadow {
                map_size: 2048,
                camera: ShadowCamera {
                    left: -25.0,
                    right: 25.0,
                    bottom: -25.0,
                    top: 25.0,
                    near: 0.5,
                    far: 50.0,
                },
            }),
        }
    }

    #[test]
    fn target_projects_inside_shadow_volume() {
        let view_projection = light().shadow_view_projection().unwrap();
        let target = view_projection.project_point3(Vec3::ZERO);

        assert!(target.x.abs() < 1e-5 && target.y.abs() < 1e-5);
        assert!(target.z > 0.0 && target.z < 1.0);
    }

    #[test]
    fn court_corners_fit_in_shadow_volume() {
        let view_projection = light().shadow_view_projection().unwrap();

        for corner in [
            Vec3::new(-15.0, 0.0, -7.5),
            Vec3::new(15.0, 0.0, 7.5),
            Vec3::new(15.0, 10.0, -7.5),
        ] {
            let ndc = view_projection.project_point3(corner);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{corner} -> {ndc}");
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn no_shadow_means_no_shadow_matrix() {
        let light = DirectionalLight {
            shadow: None,
            ..light()
        };
        assert!(light.shadow_view_projection().is_none());
    }
}
