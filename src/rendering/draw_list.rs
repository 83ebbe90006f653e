use std::cmp::Ordering;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::{
    geometry::Topology,
    scene_graph::{Material, MeshId, Scene},
};

/// Per-draw data indexed by `instance_index` in the shaders. Mirrors `DrawData`
/// in `assets/shaders/shared/common.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawData {
    pub model: Mat4,
    pub normal_matrix: Mat4,
    /// Linear RGB plus opacity
    pub color: Vec4,
    /// x: shininess, y: 1 when the object receives shadows
    pub params: Vec4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawItem {
    pub mesh_id: MeshId,
    /// Index into [`DrawList::draws`]
    pub draw_index: u32,
}

/// Everything visible this frame, bucketed by the pipeline that draws it.
#[derive(Debug, Default)]
pub struct DrawList {
    pub draws: Vec<DrawData>,
    pub opaque: Vec<DrawItem>,
    /// Sorted back to front
    pub transparent: Vec<DrawItem>,
    pub lines: Vec<DrawItem>,
    pub shadow_casters: Vec<DrawItem>,
}

impl DrawList {
    /// Collects every visible mesh object. World matrices must be up to date.
    pub fn gather(scene: &Scene, eye: Vec3) -> Self {
        let mut list = DrawList::default();
        let mut transparent: Vec<(f32, DrawItem)> = Vec::new();

        for (object_id, object) in scene.objects.iter() {
            let Some(mesh_id) = object.mesh_id else {
                continue;
            };

            let Some(mesh) = scene.get_mesh(mesh_id) else {
                log::warn!("Object {} references a missing mesh", object.name);
                continue;
            };

            if mesh.geometry.is_empty() || !scene.is_visible_in_hierarchy(object_id) {
                continue;
            }

            let transform = &object.transform;
            let model = *transform.get_world_matrix();

            let (color, shininess) = match mesh.material {
                Material::Phong {
                    color,
                    shininess,
                    opacity,
                } => (color.to_linear_rgba(opacity), shininess),
                Material::LineBasic { color } => (color.to_linear_rgba(1.0), 0.0),
            };

            let receive_shadow = if object.receive_shadow { 1.0 } else { 0.0 };

            let item = DrawItem {
                mesh_id,
                draw_index: list.draws.len() as u32,
            };

            list.draws.push(DrawData {
                model,
                normal_matrix: *transform.get_inverse_transpose_world_matrix(),
                color,
                params: Vec4::new(shininess, receive_shadow, 0.0, 0.0),
            });

            match (mesh.geometry.topology, mesh.material.is_transparent()) {
                (Topology::Lines, _) => list.lines.push(item),
                (Topology::Triangles, true) => {
                    let distance = transform.world_position().distance_squared(eye);
                    transparent.push((distance, item));
                }
                (Topology::Triangles, false) => list.opaque.push(item),
            }

            if object.cast_shadow && mesh.geometry.topology == Topology::Triangles {
                list.shadow_casters.push(item);
            }
        }

        transparent.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        list.transparent = transparent.into_iter().map(|(_, item)| item).collect();

        list
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        court::build_court,
        geometry::primitives::{box_geometry, line_segment},
        scene_graph::Object3D,
    };

    #[test]
    fn draw_data_layout_matches_wgsl_struct() {
        assert_eq!(std::mem::size_of::<DrawData>(), 160);
    }

    #[test]
    fn court_is_bucketed_by_pipeline() {
        let mut scene = Scene::new();
        build_court(&mut scene, 2048);
        scene.late_update();

        let list = DrawList::gather(&scene, Vec3::new(0.0, 15.0, 30.0));

        assert_eq!(
            list.len(),
            list.opaque.len() + list.transparent.len() + list.lines.len()
        );
        // The two backboards
        assert_eq!(list.transparent.len(), 2);
        // 12 markings, 2 x 12 net strands, 3 seams
        assert_eq!(list.lines.len(), 39);
        assert!(list
            .shadow_casters
            .iter()
            .all(|item| list.opaque.contains(item) || list.transparent.contains(item)));
    }

    #[test]
    fn transparent_items_are_sorted_back_to_front() {
        let mut scene = Scene::new();

        for (name, x) in [("near", 1.0), ("far", 20.0), ("middle", 10.0)] {
            scene.spawn_mesh(
                name,
                box_geometry(1.0, 1.0, 1.0),
                Material::phong_transparent(0xffffff, 0.5),
                None,
                |object| object.at(Vec3::new(x, 0.0, 0.0)),
            );
        }
        scene.late_update();

        let list = DrawList::gather(&scene, Vec3::ZERO);
        let order: Vec<f32> = list
            .transparent
            .iter()
            .map(|item| list.draws[item.draw_index as usize].model.w_axis.x)
            .collect();

        assert_eq!(order, vec![20.0, 10.0, 1.0]);
    }

    #[test]
    fn hidden_groups_hide_their_children() {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::group("group"));
        scene.spawn_mesh(
            "line",
            line_segment(Vec3::ZERO, Vec3::X),
            Material::line(0xffffff),
            Some(group),
            |object| object,
        );
        scene.late_update();

        assert_eq!(DrawList::gather(&scene, Vec3::ZERO).lines.len(), 1);

        scene.get_object_mut(group).unwrap().visible = false;
        assert!(DrawList::gather(&scene, Vec3::ZERO).is_empty());
    }

    #[test]
    fn draw_data_carries_material_and_shadow_flags() {
        let mut scene = Scene::new();
        scene.spawn_mesh(
            "floor",
            box_geometry(1.0, 1.0, 1.0),
            Material::phong_shiny(0xffffff, 50.0),
            None,
            |object| object.receiving_shadow(),
        );
        scene.late_update();

        let list = DrawList::gather(&scene, Vec3::ZERO);
        let draw = list.draws[0];

        assert_eq!(draw.params, Vec4::new(50.0, 1.0, 0.0, 0.0));
        assert_eq!(draw.color.w, 1.0);
        assert!(list.shadow_casters.is_empty());
    }
}
