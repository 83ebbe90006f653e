use glam::Mat4;
use id_arena::Arena;

use crate::geometry::Geometry;
use crate::scene_graph::light::{AmbientLight, DirectionalLight};
use crate::scene_graph::material::{Color, Material};
use crate::scene_graph::mesh::{Mesh, MeshId};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub meshes: Arena<Mesh>,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub directional_light: Option<DirectionalLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            meshes: Arena::new(),
            background: Color::BLACK,
            ambient_light: AmbientLight::default(),
            directional_light: None,
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Adds `object` and attaches it under `parent`.
    pub fn add_child(&mut self, parent: ObjectId, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent));
        object_id
    }

    #[cfg(test)]
    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    #[cfg(test)]
    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    #[cfg(test)]
    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.alloc(mesh)
    }

    pub fn get_mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id)
    }

    /// Shorthand for the common case of one mesh used by one object.
    pub fn spawn_mesh(
        &mut self,
        name: &str,
        geometry: Geometry,
        material: Material,
        parent: Option<ObjectId>,
        configure: impl FnOnce(Object3D) -> Object3D,
    ) -> ObjectId {
        let mesh_id = self.add_mesh(Mesh::new(name, geometry, material));
        let object = configure(Object3D::with_mesh(name, mesh_id));

        match parent {
            Some(parent) => self.add_child(parent, object),
            None => self.add_object(object),
        }
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(old_parent_id) = self.objects.get(child_id).and_then(|c| c.parent_id) {
            if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                old_parent.child_ids.retain(|&id| id != child_id);
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;
        }

        if let Some(new_parent) = new_parent_id.and_then(|id| self.objects.get_mut(id)) {
            new_parent.child_ids.push(child_id);
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    /// World matrix as of the last [`Scene::late_update`].
    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        self.get_object_transform(object_id)
            .map(|transform| *transform.get_world_matrix())
    }

    /// An object is drawn only if it and all of its ancestors are visible.
    pub fn is_visible_in_hierarchy(&self, object_id: ObjectId) -> bool {
        let mut current = Some(object_id);

        while let Some(id) = current {
            match self.objects.get(id) {
                Some(object) if object.visible => current = object.parent_id,
                _ => return false,
            }
        }

        true
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{Quat, Vec3};

    use super::*;

    #[test]
    fn children_inherit_parent_translation() {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::group("Group").at(Vec3::new(0.0, 12.0, 0.0)));
        let child = scene.add_child(group, Object3D::group("Child").at(Vec3::new(1.0, 0.0, 0.0)));

        scene.late_update();

        let world = scene.world_matrix(child).unwrap();
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 12.0, 0.0));
    }

    #[test]
    fn moving_parent_updates_descendants() {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::group("Group"));
        let child = scene.add_child(group, Object3D::group("Child").at(Vec3::X));
        let grandchild = scene.add_child(child, Object3D::group("Grandchild").at(Vec3::X));
        scene.late_update();

        scene
            .get_object_mut(group)
            .unwrap()
            .transform
            .set_translation(Vec3::new(0.0, 0.0, 5.0));
        scene.invalidate_object_hierarchy(group);
        scene.late_update();

        let position = scene
            .get_object_transform(grandchild)
            .unwrap()
            .world_position();
        assert_eq!(position, Vec3::new(2.0, 0.0, 5.0));
    }

    #[test]
    fn rotation_applies_before_translation() {
        let mut scene = Scene::new();
        let group = scene.add_object(
            Object3D::group("Group")
                .rotated(Quat::from_rotation_x(-FRAC_PI_2))
                .at(Vec3::new(0.0, 0.11, 0.0)),
        );
        scene.late_update();

        let world = scene.world_matrix(group).unwrap();
        let point = world.transform_point3(Vec3::new(0.0, 1.8, 0.0));
        assert!((point - Vec3::new(0.0, 0.11, -1.8)).length() < 1e-5);
    }

    #[test]
    fn reparenting_moves_child_between_lists() {
        let mut scene = Scene::new();
        let a = scene.add_object(Object3D::group("A"));
        let b = scene.add_object(Object3D::group("B").at(Vec3::Y));
        let child = scene.add_child(a, Object3D::group("Child"));

        scene.set_object_parent(child, Some(b));
        scene.late_update();

        assert!(scene.get_object(a).unwrap().child_ids.is_empty());
        assert_eq!(scene.get_object(b).unwrap().child_ids, vec![child]);
        assert_eq!(scene.get_object(child).unwrap().parent_id, Some(b));
        assert_eq!(
            scene.get_object_transform(child).unwrap().world_position(),
            Vec3::Y
        );
    }

    #[test]
    fn hidden_group_hides_children() {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::group("Group"));
        let child = scene.add_child(group, Object3D::group("Child"));
        assert!(scene.is_visible_in_hierarchy(child));

        scene.get_object_mut(group).unwrap().visible = false;
        assert!(!scene.is_visible_in_hierarchy(child));
    }

    #[test]
    fn lookup_by_name() {
        let mut scene = Scene::new();
        let id = scene.add_object(Object3D::group("Scoreboard"));

        assert_eq!(scene.get_object_by_name("Scoreboard"), Some(id));
        assert_eq!(scene.get_object_by_name("Missing"), None);
    }
}
