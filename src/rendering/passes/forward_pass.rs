use std::sync::Arc;

use wgpu::{Device, PipelineCompilationOptions, ShaderSource, StencilState};

use crate::{
    geometry::Topology,
    rendering::{
        passes::render_pass_context::{PassCreationContext, RenderPassContext},
        render_common::RenderCommon,
        render_mesh::{primitive_state, RENDER_MESH_VBL},
        shader_loader::{PipelineId, ShaderDefinition},
        texture::DepthTexture,
    },
};

const FORWARD_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Forward Shader",
    path: "forward.wgsl",
};

const LINE_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Line Shader",
    path: "lines.wgsl",
};

#[derive(Debug, Clone, Copy)]
enum PipelineKind {
    Opaque,
    Transparent,
    Lines,
}

impl PipelineKind {
    fn label(self) -> &'static str {
        match self {
            PipelineKind::Opaque => "Opaque pipeline",
            PipelineKind::Transparent => "Transparent pipeline",
            PipelineKind::Lines => "Line pipeline",
        }
    }

    fn topology(self) -> Topology {
        match self {
            PipelineKind::Opaque | PipelineKind::Transparent => Topology::Triangles,
            PipelineKind::Lines => Topology::Lines,
        }
    }

    fn blend(self) -> wgpu::BlendState {
        match self {
            PipelineKind::Transparent => wgpu::BlendState::ALPHA_BLENDING,
            PipelineKind::Opaque | PipelineKind::Lines => wgpu::BlendState::REPLACE,
        }
    }
}

pub struct ForwardTextureViews<'a> {
    /// Multisampled target, or the surface itself without MSAA
    pub color: &'a wgpu::TextureView,
    pub resolve_target: Option<&'a wgpu::TextureView>,
    pub depth: &'a wgpu::TextureView,
}

/// Lit meshes, lines and blended meshes, in that order, into one render pass.
pub struct ForwardPass {
    opaque_pipeline: PipelineId,
    line_pipeline: PipelineId,
    transparent_pipeline: PipelineId,
}

impl ForwardPass {
    pub fn create(context: &mut PassCreationContext) -> anyhow::Result<Self> {
        let lit_layout = Arc::new(context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Forward pipeline layout"),
                bind_group_layouts: &[
                    &context.common.global_uniform.bind_group_layout,
                    context.draw_bind_group_layout,
                    context.shadow_bind_group_layout,
                ],
                push_constant_ranges: &[],
            },
        ));

        let line_layout = Arc::new(context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Line pipeline layout"),
                bind_group_layouts: &[
                    &context.common.global_uniform.bind_group_layout,
                    context.draw_bind_group_layout,
                ],
                push_constant_ranges: &[],
            },
        ));

        let mut add = |shader_def: ShaderDefinition, layout: &Arc<wgpu::PipelineLayout>, kind| {
            let layout = layout.clone();
            let common = context.common.clone();

            context.cache_builder.add_shader(
                shader_def,
                Box::new(
                    move |device: &Device,
                          shader_def: &ShaderDefinition,
                          source: &str|
                          -> anyhow::Result<wgpu::RenderPipeline> {
                        Ok(create_pipeline(device, shader_def, source, &layout, &common, kind))
                    },
                ),
            )
        };

        let opaque_pipeline = add(FORWARD_SHADER, &lit_layout, PipelineKind::Opaque);
        let transparent_pipeline = add(FORWARD_SHADER, &lit_layout, PipelineKind::Transparent);
        let line_pipeline = add(LINE_SHADER, &line_layout, PipelineKind::Lines);

        Ok(Self {
            opaque_pipeline,
            line_pipeline,
            transparent_pipeline,
        })
    }

    pub fn render(
        &self,
        texture_views: &ForwardTextureViews,
        clear_color: wgpu::Color,
        context: &mut RenderPassContext,
    ) {
        let mut render_pass = context
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Forward pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: texture_views.color,
                    resolve_target: texture_views.resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: texture_views.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        render_pass.set_bind_group(0, &context.common.global_uniform.bind_group, &[]);
        render_pass.set_bind_group(1, context.draw_bind_group, &[]);

        let draw_list = context.draw_list;

        if let Some(pipeline) = context.pipeline_cache.get(self.opaque_pipeline) {
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(2, context.shadow_bind_group, &[]);
            context.draw_items(&mut render_pass, &draw_list.opaque);
        }

        if let Some(pipeline) = context.pipeline_cache.get(self.line_pipeline) {
            render_pass.set_pipeline(pipeline);
            context.draw_items(&mut render_pass, &draw_list.lines);
        }

        if let Some(pipeline) = context.pipeline_cache.get(self.transparent_pipeline) {
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(2, context.shadow_bind_group, &[]);
            context.draw_items(&mut render_pass, &draw_list.transparent);
        }
    }
}

fn create_pipeline(
    device: &Device,
    shader_def: &ShaderDefinition,
    source: &str,
    layout: &wgpu::PipelineLayout,
    common: &RenderCommon,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader_def.name),
        source: ShaderSource::Wgsl(source.into()),
    });

    let depth_write_enabled = !matches!(kind, PipelineKind::Transparent);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(kind.label()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[RENDER_MESH_VBL],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: common.surface_format,
                blend: Some(kind.blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: primitive_state(kind.topology()),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTexture::DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: common.multisample_state(),
        multiview: None,
        cache: None,
    })
}
