use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::{camera::Camera, rendering::bind_group_builder::BindGroupBuilder, scene_graph::Scene};

/// Per-frame values shared by every pass. Mirrors `Globals` in
/// `assets/shaders/shared/common.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobalUniformState {
    pub view_proj: Mat4,
    pub light_view_proj: Mat4,
    pub camera_position: Vec4,
    /// xyz: unit vector towards the light, w: intensity
    pub light_direction: Vec4,
    pub light_color: Vec4,
    /// rgb: ambient colour premultiplied by intensity
    pub ambient: Vec4,
    /// x: shadow map size, y: 1 when shadows are enabled
    pub shadow: Vec4,
    /// xy: resolution, z: seconds since start
    pub viewport: Vec4,
}

impl GlobalUniformState {
    pub fn new(camera: &Camera, scene: &Scene, resolution: PhysicalSize<u32>, now: f32) -> Self {
        let ambient = scene.ambient_light.color.to_linear() * scene.ambient_light.intensity;

        let (light_direction, light_color, light_view_proj, shadow) =
            match &scene.directional_light {
                Some(light) => {
                    let light_view_proj = light.shadow_view_projection();
                    let shadow = match (&light.shadow, light_view_proj) {
                        (Some(shadow), Some(_)) => Vec4::new(shadow.map_size as f32, 1.0, 0.0, 0.0),
                        _ => Vec4::ZERO,
                    };

                    (
                        light.direction_to_light().extend(light.intensity),
                        light.color.to_linear().extend(1.0),
                        light_view_proj.unwrap_or(Mat4::IDENTITY),
                        shadow,
                    )
                }
                None => (Vec4::Y, Vec4::ZERO, Mat4::IDENTITY, Vec4::ZERO),
            };

        Self {
            view_proj: camera.get_vp_matrix(),
            light_view_proj,
            camera_position: camera.eye.extend(1.0),
            light_direction,
            light_color,
            ambient: ambient.extend(1.0),
            shadow,
            viewport: Vec4::new(
                resolution.width as f32,
                resolution.height as f32,
                now,
                0.0,
            ),
        }
    }
}

pub struct GlobalUniform {
    buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl GlobalUniform {
    pub fn new(device: &wgpu::Device, initial_state: GlobalUniformState) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Global uniform buffer"),
            contents: bytemuck::cast_slice(&[initial_state]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (bind_group_layout, bind_group) =
            BindGroupBuilder::new("Global uniform", wgpu::ShaderStages::VERTEX_FRAGMENT)
                .uniform(0, buffer.as_entire_binding())
                .build(device);

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, state: GlobalUniformState) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[state]));
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::court::lighting::{add_lights, SUN_POSITION};

    #[test]
    fn layout_matches_wgsl_struct() {
        // 2 x mat4x4<f32> + 6 x vec4<f32>
        assert_eq!(std::mem::size_of::<GlobalUniformState>(), 224);
    }

    #[test]
    fn lit_scene_fills_light_fields() {
        let mut scene = Scene::new();
        add_lights(&mut scene, 2048);
        let camera = Camera::court_view(1.0);

        let state = GlobalUniformState::new(&camera, &scene, PhysicalSize::new(800, 600), 2.5);

        assert_eq!(state.light_direction.truncate(), SUN_POSITION.normalize());
        assert_eq!(state.light_direction.w, 1.0);
        assert_eq!(state.shadow, Vec4::new(2048.0, 1.0, 0.0, 0.0));
        assert!((state.ambient.truncate() - Vec3::splat(0.6)).length() < 1e-6);
        assert_eq!(state.viewport, Vec4::new(800.0, 600.0, 2.5, 0.0));
        assert_eq!(state.camera_position, Vec4::new(0.0, 15.0, 30.0, 1.0));
    }

    #[test]
    fn unlit_scene_disables_shadows() {
        let scene = Scene::new();
        let camera = Camera::court_view(1.0);

        let state = GlobalUniformState::new(&camera, &scene, PhysicalSize::new(1, 1), 0.0);

        assert_eq!(state.shadow, Vec4::ZERO);
        assert_eq!(state.light_color, Vec4::ZERO);
        assert_eq!(state.ambient.truncate(), Vec3::ZERO);
    }
}
