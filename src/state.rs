use std::time::Instant;

use glam::Vec2;
use winit::{dpi::PhysicalSize, event::MouseButton};

use crate::{
    camera::Camera,
    config::ViewerConfig,
    controls::{OrbitControls, ViewerAction},
    court,
    scene_graph::Scene,
};

pub struct ViewerState {
    pub camera: Camera,
    pub controls: OrbitControls,
    pub orbit_enabled: bool,
    pub scene: Scene,
    pub viewport: PhysicalSize<u32>,
    pub start_time: Instant,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        let viewport = PhysicalSize::new(config.width, config.height);
        let camera = Camera::court_view(Camera::aspect_from_size(viewport));
        let controls = OrbitControls::new(&camera);

        let mut scene = Scene::new();
        court::build_court(&mut scene, config.render.shadow_map_size);

        Self {
            camera,
            controls,
            orbit_enabled: true,
            scene,
            viewport,
            start_time: Instant::now(),
        }
    }

    pub fn toggle_orbit(&mut self) {
        self.orbit_enabled = !self.orbit_enabled;
        log::info!(
            "Orbit controls: {}",
            if self.orbit_enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn apply(&mut self, action: ViewerAction) {
        match action {
            ViewerAction::ToggleOrbit => self.toggle_orbit(),
        }
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.viewport = size;
        self.camera.set_aspect_from_size(size);
    }

    fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport.width as f32, self.viewport.height as f32)
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.controls.handle_mouse_button(button, pressed);
    }

    /// While `captured` the overlay owns the mouse: the position is only tracked,
    /// so a drag resumes from where the cursor really is.
    pub fn cursor_moved(&mut self, position: Vec2, captured: bool) {
        if captured {
            self.controls.track_cursor(position);
            return;
        }

        let viewport = self.viewport_size();
        self.controls
            .handle_cursor_moved(position, &self.camera, viewport);
    }

    pub fn scroll(&mut self, delta_y: f32) {
        self.controls.handle_scroll(delta_y);
    }

    /// Per-frame update. The orbit state is synced before the controls run, so a
    /// toggle takes effect on the next frame.
    pub fn update(&mut self) {
        self.controls.enabled = self.orbit_enabled;
        self.controls.update(&mut self.camera);
    }
}
