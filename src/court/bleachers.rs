use glam::Vec3;

use crate::{
    geometry::primitives::box_geometry,
    scene_graph::{Material, Mesh, Object3D, ObjectId, Scene},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BleacherSpec {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub rows: u32,
    pub color: u32,
}

impl BleacherSpec {
    /// Stand along one sideline. `z` picks the side.
    pub const fn sideline(z: f32) -> Self {
        Self {
            x: 0.0,
            z,
            width: 30.0,
            height: 5.0,
            depth: 8.0,
            rows: 10,
            color: 0x663300,
        }
    }

    fn step_height(&self) -> f32 {
        self.height / self.rows as f32
    }

    fn step_depth(&self) -> f32 {
        self.depth / self.rows as f32
    }

    /// Centre of step `row`. Rows climb away from the court.
    pub fn step_position(&self, row: u32) -> Vec3 {
        let away = if self.z > 0.0 { 1.0 } else { -1.0 };
        let offset = row as f32 + 0.5;

        Vec3::new(
            self.x,
            offset * self.step_height(),
            self.z + away * offset * self.step_depth(),
        )
    }

    /// Steps overlap their neighbours by half a step.
    pub fn step_size(&self) -> Vec3 {
        Vec3::new(self.width, self.step_height(), self.step_depth() * 1.5)
    }
}

/// Stepped stand of identical boxes, all sharing one mesh.
pub fn create_bleachers(scene: &mut Scene, spec: &BleacherSpec) -> ObjectId {
    debug_assert!(spec.rows >= 1, "Bleachers need at least one row");

    let group = scene.add_object(Object3D::group("Bleachers"));
    let size = spec.step_size();

    let step_mesh = scene.add_mesh(Mesh::new(
        "Bleacher Step",
        box_geometry(size.x, size.y, size.z),
        Material::phong(spec.color),
    ));

    for row in 0..spec.rows {
        scene.add_child(
            group,
            Object3D::with_mesh(format!("Bleacher Row {row}"), step_mesh)
                .at(spec.step_position(row))
                .casting_shadow()
                .receiving_shadow(),
        );
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_graph::material::DEFAULT_SHININESS;

    #[test]
    fn steps_climb_away_from_the_court() {
        let north = BleacherSpec::sideline(9.5);
        let south = BleacherSpec::sideline(-9.5);

        assert!((north.step_position(0) - Vec3::new(0.0, 0.25, 9.9)).length() < 1e-5);
        assert!((north.step_position(9) - Vec3::new(0.0, 4.75, 17.1)).length() < 1e-5);

        assert!((south.step_position(0) - Vec3::new(0.0, 0.25, -9.9)).length() < 1e-5);
        assert!(south.step_position(9).z < south.step_position(8).z);
    }

    #[test]
    fn step_size_overlaps_depth() {
        let spec = BleacherSpec::sideline(9.5);
        let size = spec.step_size();

        assert_eq!(size.x, 30.0);
        assert!((size.y - 0.5).abs() < 1e-6);
        assert!((size.z - 1.2).abs() < 1e-6);
    }

    #[test]
    fn group_owns_every_row() {
        let mut scene = Scene::new();
        let group = create_bleachers(&mut scene, &BleacherSpec::sideline(-9.5));
        scene.late_update();

        let children = &scene.get_object(group).unwrap().child_ids;
        assert_eq!(children.len(), 10);
        assert_eq!(scene.meshes.len(), 1);

        for &child in children {
            let object = scene.get_object(child).unwrap();
            assert_eq!(object.parent_id, Some(group));
            assert!(object.cast_shadow && object.receive_shadow);
        }

        let (_, mesh) = scene.meshes.iter().next().unwrap();
        assert_eq!(
            mesh.material,
            Material::Phong {
                color: crate::scene_graph::Color::from_hex(0x663300),
                shininess: DEFAULT_SHININESS,
                opacity: 1.0,
            }
        );
    }
}
