use std::sync::Arc;

use anyhow::Context;
use id_arena::Arena;
use wgpu::{CommandEncoderDescriptor, ShaderStages};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    rendering::{
        bind_group_builder::BindGroupBuilder,
        config::RenderConfig,
        draw_list::DrawList,
        draw_storage_buffer::DrawStorageBuffer,
        global_uniform::GlobalUniformState,
        overlay_renderer::OverlayRenderer,
        passes::{
            forward_pass::{ForwardPass, ForwardTextureViews},
            render_pass_context::{PassCreationContext, RenderPassContext},
            shadow_pass::ShadowPass,
        },
        render_common::RenderCommon,
        render_mesh::RenderMesh,
        shader_loader::{PipelineCacheBuilder, ShaderLoader},
        texture::{DepthTexture, MultisampleTarget, ShadowMap},
    },
    scene_graph::Scene,
    state::ViewerState,
};

const INITIAL_DRAW_CAPACITY: u64 = 64;

pub struct Renderer {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,

    common: Arc<RenderCommon>,
    depth_texture: DepthTexture,
    msaa_target: Option<MultisampleTarget>,

    shadow_map: ShadowMap,
    shadow_bind_group: wgpu::BindGroup,
    draw_buffer: DrawStorageBuffer,
    render_meshes: Arena<RenderMesh>,

    shader_loader: ShaderLoader,

    shadow_pass: ShadowPass,
    forward_pass: ForwardPass,
    overlay_renderer: OverlayRenderer,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        config: &RenderConfig,
        imgui_context: &mut imgui::Context,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable graphics adapter")?;

        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request device")?;

        let common = Arc::new(RenderCommon::new(&device, &adapter, &surface, size, config)?);

        let depth_texture = DepthTexture::new(&device, size, config.sample_count, "Depth Texture");
        let msaa_target = (config.sample_count > 1).then(|| {
            MultisampleTarget::new(&device, size, common.surface_format, config.sample_count)
        });

        let shadow_map = ShadowMap::new(&device, config.shadow_map_size);
        let (shadow_bind_group_layout, shadow_bind_group) =
            BindGroupBuilder::new("Shadow map", ShaderStages::FRAGMENT)
                .depth_texture(0, shadow_map.view())
                .comparison_sampler(1, shadow_map.sampler())
                .build(&device);

        let draw_buffer = DrawStorageBuffer::new(&device, INITIAL_DRAW_CAPACITY);

        let mut cache_builder = PipelineCacheBuilder::new();
        let mut pass_context = PassCreationContext {
            device: &device,
            common: common.clone(),
            cache_builder: &mut cache_builder,
            draw_bind_group_layout: draw_buffer.bind_group_layout(),
            shadow_bind_group_layout: &shadow_bind_group_layout,
        };

        let shadow_pass =
            ShadowPass::create(&mut pass_context).context("Failed to create shadow pass")?;
        let forward_pass =
            ForwardPass::create(&mut pass_context).context("Failed to create forward pass")?;

        let shader_loader = ShaderLoader::new(device.clone(), cache_builder, config)
            .context("Failed to create shader loader")?;

        let overlay_renderer =
            OverlayRenderer::new(&device, &queue, common.surface_format, imgui_context);

        Ok(Self {
            window,
            size,
            surface,
            device,
            queue,
            common,
            depth_texture,
            msaa_target,
            shadow_map,
            shadow_bind_group,
            draw_buffer,
            render_meshes: Arena::new(),
            shader_loader,
            shadow_pass,
            forward_pass,
            overlay_renderer,
        })
    }

    /// Uploads every scene mesh that has no GPU buffers yet.
    pub fn load_meshes(&mut self, scene: &mut Scene) {
        let mut uploaded = 0;

        for (_id, mesh) in scene.meshes.iter_mut() {
            if mesh.render_mesh.is_some() {
                continue;
            }

            let render_mesh = RenderMesh::from_mesh(&self.device, mesh);
            mesh.render_mesh = Some(self.render_meshes.alloc(render_mesh));
            uploaded += 1;
        }

        log::info!("Uploaded {uploaded} meshes");
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let Ok(mut config) = self.common.output_surface_config.write() else {
            log::error!("Surface configuration lock poisoned");
            return;
        };

        self.size = new_size;
        config.width = new_size.width;
        config.height = new_size.height;
        self.surface.configure(&self.device, &config);

        self.depth_texture.resize(&self.device, new_size);
        if let Some(msaa_target) = &mut self.msaa_target {
            msaa_target.resize(&self.device, new_size);
        }
    }

    pub fn render(
        &mut self,
        state: &ViewerState,
        imgui_context: &mut imgui::Context,
    ) -> Result<(), wgpu::SurfaceError> {
        if let Err(err) = self.shader_loader.load_pending_shaders() {
            log::error!("Failed to load pending shaders: {err:#}");
        }

        let scene = &state.scene;

        self.common.global_uniform.update(
            &self.queue,
            GlobalUniformState::new(
                &state.camera,
                scene,
                self.size,
                state.start_time.elapsed().as_secs_f32(),
            ),
        );

        let draw_list = DrawList::gather(scene, state.camera.eye);
        self.draw_buffer
            .write(&self.device, &self.queue, &draw_list.draws);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let shadows_enabled = scene
            .directional_light
            .as_ref()
            .is_some_and(|light| light.shadow.is_some());

        {
            let mut context = RenderPassContext {
                encoder: &mut encoder,
                pipeline_cache: &self.shader_loader.cache,
                common: &self.common,
                draw_bind_group: self.draw_buffer.bind_group(),
                shadow_bind_group: &self.shadow_bind_group,
                scene,
                render_meshes: &self.render_meshes,
                draw_list: &draw_list,
            };

            if shadows_enabled {
                self.shadow_pass.render(&self.shadow_map, &mut context);
            }

            let texture_views = match &self.msaa_target {
                Some(msaa_target) => ForwardTextureViews {
                    color: msaa_target.view(),
                    resolve_target: Some(&view),
                    depth: self.depth_texture.view(),
                },
                None => ForwardTextureViews {
                    color: &view,
                    resolve_target: None,
                    depth: self.depth_texture.view(),
                },
            };

            self.forward_pass
                .render(&texture_views, scene.background.to_wgpu(), &mut context);
        }

        if let Err(err) = self.overlay_renderer.render(
            &view,
            imgui_context,
            &self.device,
            &self.queue,
            &mut encoder,
        ) {
            log::error!("{err:#}");
        }

        self.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}
