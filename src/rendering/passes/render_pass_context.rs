use std::sync::Arc;

use id_arena::Arena;

use crate::{
    rendering::{
        draw_list::{DrawItem, DrawList},
        render_common::RenderCommon,
        render_mesh::RenderMesh,
        shader_loader::{PipelineCache, PipelineCacheBuilder},
    },
    scene_graph::Scene,
};

/// Shared inputs for building pass pipelines.
pub struct PassCreationContext<'a> {
    pub device: &'a wgpu::Device,
    pub common: Arc<RenderCommon>,
    pub cache_builder: &'a mut PipelineCacheBuilder,
    pub draw_bind_group_layout: &'a wgpu::BindGroupLayout,
    pub shadow_bind_group_layout: &'a wgpu::BindGroupLayout,
}

/// Per-frame inputs shared by every pass.
pub struct RenderPassContext<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub pipeline_cache: &'a PipelineCache,
    pub common: &'a RenderCommon,
    pub draw_bind_group: &'a wgpu::BindGroup,
    pub shadow_bind_group: &'a wgpu::BindGroup,
    pub scene: &'a Scene,
    pub render_meshes: &'a Arena<RenderMesh>,
    pub draw_list: &'a DrawList,
}

impl RenderPassContext<'_> {
    /// Issues one indexed draw per item. `instance_index` selects the item's
    /// [`crate::rendering::draw_list::DrawData`].
    pub fn draw_items(&self, render_pass: &mut wgpu::RenderPass<'_>, items: &[DrawItem]) {
        for item in items {
            let Some(render_mesh) = self
                .scene
                .get_mesh(item.mesh_id)
                .and_then(|mesh| mesh.render_mesh)
                .and_then(|id| self.render_meshes.get(id))
            else {
                continue;
            };

            render_mesh.bind(render_pass);
            render_pass.draw_indexed(
                0..render_mesh.num_indices,
                0,
                item.draw_index..item.draw_index + 1,
            );
        }
    }
}
