use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use winit::event::MouseButton;

use crate::camera::Camera;

const EPS: f32 = 1e-6;

/// Radius / polar angle / azimuth around a target, Y up.
/// `phi` is measured from +Y, `theta` around Y starting at +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }

        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keeps phi away from the poles, where the view matrix degenerates.
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Pan,
}

/// Mouse-driven orbit around a focal point: left drag rotates, right drag pans,
/// the wheel dollies. Input is accumulated and applied on [`OrbitControls::update`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub target: Vec3,

    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    spherical_delta: Vec2,
    scale: f32,
    pan_offset: Vec3,

    drag: DragState,
    last_cursor: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(camera: &Camera) -> Self {
        Self {
            enabled: true,
            target: camera.target,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: DragState::None,
            last_cursor: None,
        }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::None
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.y -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.x -= angle;
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    /// Pans by a screen-space delta in pixels, scaled so that the point under
    /// the cursor at the target's depth follows the mouse.
    pub fn pan(&mut self, delta: Vec2, camera: &Camera, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }

        let distance = (camera.eye - self.target).length();
        let target_distance = distance * (camera.fov_y_degrees.to_radians() * 0.5).tan();

        let left = -camera.right() * (2.0 * delta.x * target_distance / viewport_height);
        let up = camera.camera_up() * (2.0 * delta.y * target_distance / viewport_height);

        self.pan_offset += (left + up) * self.pan_speed;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if !pressed {
            self.drag = DragState::None;
            return;
        }

        if !self.enabled {
            return;
        }

        self.drag = match button {
            MouseButton::Left => DragState::Rotate,
            MouseButton::Right | MouseButton::Middle => DragState::Pan,
            _ => self.drag,
        };
    }

    /// Records the cursor position without treating the motion as a drag.
    pub fn track_cursor(&mut self, position: Vec2) {
        self.last_cursor = Some(position);
    }

    pub fn handle_cursor_moved(&mut self, position: Vec2, camera: &Camera, viewport: Vec2) {
        let last = self.last_cursor.replace(position);

        let Some(last) = last else {
            return;
        };

        if !self.enabled || viewport.y <= 0.0 {
            return;
        }

        let delta = position - last;

        match self.drag {
            DragState::Rotate => {
                let scaled = delta * self.rotate_speed / viewport.y;
                self.rotate_left(TAU * scaled.x);
                self.rotate_up(TAU * scaled.y);
            }
            DragState::Pan => self.pan(delta, camera, viewport.y),
            DragState::None => {}
        }
    }

    /// `delta_y` follows the DOM convention: negative when scrolling up.
    pub fn handle_scroll(&mut self, delta_y: f32) {
        if !self.enabled {
            return;
        }

        if delta_y < 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if delta_y > 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    /// Applies pending input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let mut spherical = Spherical::from_offset(camera.eye - self.target);

        spherical.theta += self.spherical_delta.y;
        spherical.phi += self.spherical_delta.x;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset;

        let eye = self.target + spherical.to_offset();
        let changed = eye.distance_squared(camera.eye) > EPS || camera.target != self.target;

        camera.eye = eye;
        camera.target = self.target;

        self.spherical_delta = Vec2::ZERO;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn setup() -> (Camera, OrbitControls) {
        let camera = Camera::court_view(16.0 / 9.0);
        let controls = OrbitControls::new(&camera);
        (camera, controls)
    }

    fn drag(controls: &mut OrbitControls, camera: &Camera, button: MouseButton, delta: Vec2) {
        let start = Vec2::new(400.0, 300.0);
        controls.handle_cursor_moved(start, camera, VIEWPORT);
        controls.handle_mouse_button(button, true);
        controls.handle_cursor_moved(start + delta, camera, VIEWPORT);
        controls.handle_mouse_button(button, false);
    }

    #[test]
    fn spherical_round_trips_court_view() {
        let offset = Vec3::new(0.0, 15.0, 30.0);
        let spherical = Spherical::from_offset(offset);

        assert!((spherical.radius - offset.length()).abs() < 1e-5);
        assert_eq!(spherical.theta, 0.0);
        assert!((spherical.to_offset() - offset).length() < 1e-4);
    }

    #[test]
    fn update_without_input_keeps_camera() {
        let (mut camera, mut controls) = setup();
        let before = camera.eye;

        controls.update(&mut camera);

        assert!((camera.eye - before).length() < 1e-4);
    }

    #[test]
    fn horizontal_drag_orbits_at_constant_distance() {
        let (mut camera, mut controls) = setup();
        let distance = camera.eye.length();

        drag(&mut controls, &camera, MouseButton::Left, Vec2::new(180.0, 0.0));
        assert!(controls.update(&mut camera));

        assert!((camera.eye.length() - distance).abs() < 1e-3);
        assert!((camera.eye.y - 15.0).abs() < 1e-3);
        // Dragging right swings the camera towards -X
        assert!(camera.eye.x < 0.0);
    }

    #[test]
    fn polar_angle_is_clamped_above_the_floor() {
        let (mut camera, mut controls) = setup();
        controls.max_polar_angle = PI / 2.0;

        // Drag far upwards: the camera would otherwise go under the court
        drag(&mut controls, &camera, MouseButton::Left, Vec2::new(0.0, -2000.0));
        controls.update(&mut camera);

        assert!(camera.eye.y >= -1e-3);
    }

    #[test]
    fn polar_angle_never_reaches_the_pole() {
        let (mut camera, mut controls) = setup();

        drag(&mut controls, &camera, MouseButton::Left, Vec2::new(0.0, 5000.0));
        controls.update(&mut camera);

        assert!(camera.eye.y > 0.0);
        assert!(camera.get_vp_matrix().is_finite());
    }

    #[test]
    fn scroll_up_moves_closer_and_respects_min_distance() {
        let (mut camera, mut controls) = setup();
        let distance = camera.eye.length();

        controls.handle_scroll(-1.0);
        controls.update(&mut camera);
        assert!((camera.eye.length() - distance * 0.95).abs() < 1e-3);

        controls.min_distance = 30.0;
        for _ in 0..50 {
            controls.handle_scroll(-1.0);
        }
        controls.update(&mut camera);
        assert!((camera.eye.length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn right_drag_pans_target_and_eye_together() {
        let (mut camera, mut controls) = setup();
        let offset_before = camera.eye - camera.target;

        drag(&mut controls, &camera, MouseButton::Right, Vec2::new(100.0, 0.0));
        controls.update(&mut camera);

        assert!(camera.target.x < 0.0);
        assert!(((camera.eye - camera.target) - offset_before).length() < 1e-3);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut camera, mut controls) = setup();
        let before = camera.eye;
        controls.enabled = false;

        drag(&mut controls, &camera, MouseButton::Left, Vec2::new(300.0, 100.0));
        controls.handle_scroll(-1.0);

        assert!(!controls.update(&mut camera));
        assert!((camera.eye - before).length() < 1e-4);
    }

    #[test]
    fn release_always_ends_drag() {
        let (_camera, mut controls) = setup();

        controls.handle_mouse_button(MouseButton::Left, true);
        controls.enabled = false;
        controls.handle_mouse_button(MouseButton::Left, false);

        assert!(!controls.is_dragging());
    }

    #[test]
    fn tracked_cursor_moves_do_not_rotate() {
        let (mut camera, mut controls) = setup();
        let before = camera.eye;

        controls.handle_cursor_moved(Vec2::new(100.0, 100.0), &camera, VIEWPORT);
        controls.handle_mouse_button(MouseButton::Left, true);
        controls.track_cursor(Vec2::new(500.0, 100.0));
        controls.handle_cursor_moved(Vec2::new(500.0, 100.0), &camera, VIEWPORT);

        assert!(!controls.update(&mut camera));
        assert!((camera.eye - before).length() < 1e-4);
    }
}
