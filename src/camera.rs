use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;

/// Right-handed perspective camera looking from `eye` towards `target`.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Elevated view from behind the sideline, looking at centre court.
    pub fn court_view(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 15.0, 30.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn aspect_from_size(size: PhysicalSize<u32>) -> f32 {
        if size.height == 0 {
            1.0
        } else {
            size.width as f32 / size.height as f32
        }
    }

    pub fn set_aspect_from_size(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.aspect = Self::aspect_from_size(size);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn get_vp_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Up vector orthogonal to the view direction.
    pub fn camera_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}
