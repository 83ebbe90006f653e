use wgpu::{Device, PipelineCompilationOptions, ShaderSource, StencilState};

use crate::{
    geometry::Topology,
    rendering::{
        passes::render_pass_context::{PassCreationContext, RenderPassContext},
        render_mesh::{primitive_state, RENDER_MESH_VBL},
        shader_loader::{PipelineId, ShaderDefinition},
        texture::{DepthTexture, ShadowMap},
    },
};

const SHADOW_SHADER: ShaderDefinition = ShaderDefinition {
    name: "Shadow Shader",
    path: "shadow.wgsl",
};

/// Renders shadow casters into the light's depth map.
pub struct ShadowPass {
    pipeline_id: PipelineId,
}

impl ShadowPass {
    pub fn create(context: &mut PassCreationContext) -> anyhow::Result<Self> {
        let layout = context
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow pipeline layout"),
                bind_group_layouts: &[
                    &context.common.global_uniform.bind_group_layout,
                    context.draw_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let pipeline_id = context.cache_builder.add_shader(
            SHADOW_SHADER,
            Box::new(
                move |device: &Device,
                      shader_def: &ShaderDefinition,
                      source: &str|
                      -> anyhow::Result<wgpu::RenderPipeline> {
                    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                        label: Some(shader_def.name),
                        source: ShaderSource::Wgsl(source.into()),
                    });

                    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                        label: Some("Shadow pipeline"),
                        layout: Some(&layout),
                        vertex: wgpu::VertexState {
                            module: &shader,
                            entry_point: Some("vs_main"),
                            buffers: &[RENDER_MESH_VBL],
                            compilation_options: PipelineCompilationOptions::default(),
                        },
                        fragment: None,
                        primitive: primitive_state(Topology::Triangles),
                        depth_stencil: Some(wgpu::DepthStencilState {
                            format: DepthTexture::DEPTH_FORMAT,
                            depth_write_enabled: true,
                            depth_compare: wgpu::CompareFunction::LessEqual,
                            stencil: StencilState::default(),
                            bias: wgpu::DepthBiasState {
                                constant: 2,
                                slope_scale: 2.0,
                                clamp: 0.0,
                            },
                        }),
                        multisample: wgpu::MultisampleState::default(),
                        multiview: None,
                        cache: None,
                    });

                    Ok(pipeline)
                },
            ),
        );

        Ok(Self { pipeline_id })
    }

    pub fn render(&self, shadow_map: &ShadowMap, context: &mut RenderPassContext) {
        let mut render_pass = context
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: shadow_map.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        let Some(pipeline) = context.pipeline_cache.get(self.pipeline_id) else {
            return;
        };

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &context.common.global_uniform.bind_group, &[]);
        render_pass.set_bind_group(1, context.draw_bind_group, &[]);

        context.draw_items(&mut render_pass, &context.draw_list.shadow_casters);
    }
}
