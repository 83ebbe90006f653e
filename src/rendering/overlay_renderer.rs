use anyhow::Context;
use wgpu::{CommandEncoder, TextureView};

/// Draws the imgui overlay straight onto the surface, after the scene has been resolved.
pub struct OverlayRenderer {
    renderer: imgui_wgpu::Renderer,
}

impl OverlayRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_format: wgpu::TextureFormat,
        imgui_context: &mut imgui::Context,
    ) -> Self {
        let config = imgui_wgpu::RendererConfig {
            texture_format,
            ..Default::default()
        };

        Self {
            renderer: imgui_wgpu::Renderer::new(imgui_context, device, queue, config),
        }
    }

    pub fn render(
        &mut self,
        target: &TextureView,
        imgui_context: &mut imgui::Context,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut CommandEncoder,
    ) -> anyhow::Result<()> {
        let draw_data = imgui_context.render();

        // imgui-rs crashes on frames without draw lists
        // https://github.com/imgui-rs/imgui-rs/issues/325
        if draw_data.draw_lists_count() == 0 {
            return Ok(());
        }

        let mut overlay_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.renderer
            .render(draw_data, queue, device, &mut overlay_pass)
            .context("Failed to render overlay")
    }
}
