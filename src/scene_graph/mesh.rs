use id_arena::Id;

use crate::{
    geometry::Geometry, rendering::render_mesh::RenderMeshId, scene_graph::material::Material,
};

pub type MeshId = Id<Mesh>;

pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    /// Set once the renderer has uploaded the geometry.
    pub render_mesh: Option<RenderMeshId>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            render_mesh: None,
        }
    }
}
