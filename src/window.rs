use std::{sync::Arc, time::Instant};

use anyhow::Context;
use glam::Vec2;
use imgui::{FontConfig, FontSource};
use imgui_winit_support::WinitPlatform;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, Event, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::ViewerConfig, controls::action_for_key, engine, rendering::renderer::Renderer,
    state::ViewerState,
};

struct ImguiState {
    context: imgui::Context,
    platform: WinitPlatform,
}

struct App {
    config: ViewerConfig,
    state: ViewerState,
    renderer: Option<Renderer>,
    imgui: Option<ImguiState>,
    last_frame: Instant,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let state = ViewerState::new(&config);

        Self {
            config,
            state,
            renderer: None,
            imgui: None,
            last_frame: Instant::now(),
        }
    }

    fn setup_imgui(window: &Window) -> ImguiState {
        let mut context = imgui::Context::create();
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(
            context.io_mut(),
            window,
            imgui_winit_support::HiDpiMode::Default,
        );

        let font_size = 14.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        // Disable INI support because it's broken in the published version of imgui
        context.set_ini_filename(None);

        ImguiState { context, platform }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let mut imgui = Self::setup_imgui(&window);
        let mut renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.config.render,
            &mut imgui.context,
        ))
        .context("Failed to create renderer")?;

        renderer.load_meshes(&mut self.state.scene);
        self.state.resize(window.inner_size());

        self.imgui = Some(imgui);
        self.renderer = Some(renderer);

        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let (Some(renderer), Some(imgui)) = (self.renderer.as_mut(), self.imgui.as_mut()) else {
            return Ok(());
        };

        let now = Instant::now();
        imgui
            .context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        renderer.window.request_redraw();

        imgui
            .platform
            .prepare_frame(imgui.context.io_mut(), &renderer.window)
            .context("Failed to prepare Imgui frame")?;

        let ui = imgui.context.new_frame();
        engine::update(&mut self.state, ui).context("Error during engine::update")?;
        imgui.platform.prepare_render(ui, &renderer.window);

        match renderer.render(&self.state, &mut imgui.context) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Err(other) => {
                log::error!("Unexpected error: {:?}", other);
            }
        }

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("{err:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(renderer), Some(imgui)) = (self.renderer.as_mut(), self.imgui.as_mut()) else {
            return;
        };

        imgui.platform.handle_event::<()>(
            imgui.context.io_mut(),
            &renderer.window,
            &Event::WindowEvent {
                window_id,
                event: event.clone(),
            },
        );

        let mouse_captured = imgui.context.io().want_capture_mouse;

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                renderer.resize(new_size);
                self.state.resize(new_size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Some(action) = action_for_key(&event.logical_key) {
                        self.state.apply(action);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                // Releases always reach the controls so a drag can't get stuck
                if !mouse_captured || !pressed {
                    self.state.mouse_button(button, pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor_moved(
                    Vec2::new(position.x as f32, position.y as f32),
                    mouse_captured,
                );
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !mouse_captured {
                    let delta_y = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y,
                        MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                    };
                    self.state.scroll(delta_y);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(event_loop) {
                    log::error!("{err:#}");
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }
}

pub async fn run(config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
