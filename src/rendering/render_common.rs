use std::sync::RwLock;

use anyhow::Context;
use bytemuck::Zeroable;
use wgpu::SurfaceConfiguration;
use winit::dpi::PhysicalSize;

use crate::rendering::{
    config::RenderConfig,
    global_uniform::{GlobalUniform, GlobalUniformState},
};

/// State shared between the renderer and the pipeline factories.
pub struct RenderCommon {
    pub output_surface_config: RwLock<SurfaceConfiguration>,
    pub surface_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub global_uniform: GlobalUniform,
}

impl RenderCommon {
    pub fn new(
        device: &wgpu::Device,
        adapter: &wgpu::Adapter,
        surface: &wgpu::Surface,
        size: PhysicalSize<u32>,
        config: &RenderConfig,
    ) -> anyhow::Result<Self> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let present_mode = if config.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let output_surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(device, &output_surface_config);

        let global_uniform = GlobalUniform::new(device, GlobalUniformState::zeroed());

        log::info!(
            "Surface configured: {:?}, {:?}, {}x MSAA",
            surface_format,
            present_mode,
            config.sample_count
        );

        Ok(Self {
            output_surface_config: RwLock::new(output_surface_config),
            surface_format,
            sample_count: config.sample_count,
            global_uniform,
        })
    }

    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            ..Default::default()
        }
    }
}
