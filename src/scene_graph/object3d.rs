use glam::{Quat, Vec3};
use id_arena::Id;

use crate::scene_graph::mesh::MeshId;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

/// A node in the scene graph. Without a mesh it acts as a group.
pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub mesh_id: Option<MeshId>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
}

impl Object3D {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh_id: MeshId) -> Self {
        Self {
            name: name.into(),
            mesh_id: Some(mesh_id),
            ..Default::default()
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.set_translation(translation);
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.transform.set_rotation(rotation);
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::from_translation(Vec3::ZERO),
            mesh_id: None,
            parent_id: None,
            child_ids: Vec::new(),
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
        }
    }
}
