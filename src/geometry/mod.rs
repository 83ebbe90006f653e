//! CPU-side geometry: vertex data, topology and the builders that produce it.
//!
//! Everything here is plain data so the court layout can be built and inspected
//! without a GPU. The renderer uploads a [`Geometry`] as-is.

pub mod curves;
pub mod primitives;
pub mod segment_font;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use crate::math::bounds::AABB;

/// This should match `VertexInput` in the WGSL shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Every three indices form a counter-clockwise triangle.
    Triangles,
    /// Every two indices form a segment. Strips are expanded on construction.
    Lines,
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: Topology) -> Self {
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        Self {
            vertices,
            indices,
            topology,
        }
    }

    pub fn empty(topology: Topology) -> Self {
        Self::new(Vec::new(), Vec::new(), topology)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles or segments, depending on topology.
    #[cfg(test)]
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|vertex| vertex.position)
    }

    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(self.positions())
    }

    /// Bakes `matrix` into the vertices. Normals use the inverse transpose.
    pub fn transform(&mut self, matrix: &Mat4) {
        let normal_matrix = Mat3::from_mat4(*matrix).inverse().transpose();

        for vertex in &mut self.vertices {
            vertex.position = matrix.transform_point3(vertex.position);
            vertex.normal = (normal_matrix * vertex.normal).normalize_or_zero();
        }
    }

    /// Appends `other`, re-basing its indices.
    pub fn merge(&mut self, other: &Geometry) {
        assert_eq!(
            self.topology, other.topology,
            "Cannot merge geometries with different topologies"
        );

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|index| index + base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(a: Vec3, b: Vec3) -> Geometry {
        Geometry::new(
            vec![Vertex::new(a, Vec3::Y), Vertex::new(b, Vec3::Y)],
            vec![0, 1],
            Topology::Lines,
        )
    }

    #[test]
    fn merge_rebases_indices() {
        let mut geometry = segment(Vec3::ZERO, Vec3::X);
        geometry.merge(&segment(Vec3::Y, Vec3::Z));

        assert_eq!(geometry.indices, vec![0, 1, 2, 3]);
        assert_eq!(geometry.primitive_count(), 2);
    }

    #[test]
    #[should_panic(expected = "different topologies")]
    fn merge_rejects_mixed_topologies() {
        let mut lines = segment(Vec3::ZERO, Vec3::X);
        lines.merge(&Geometry::empty(Topology::Triangles));
    }

    #[test]
    fn transform_moves_positions_and_keeps_normals_unit() {
        let mut geometry = segment(Vec3::ZERO, Vec3::X);
        geometry.transform(&Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 1.0, 1.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 3.0, 0.0),
        ));

        assert_eq!(geometry.vertices[1].position, Vec3::new(2.0, 3.0, 0.0));
        assert!((geometry.vertices[0].normal.length() - 1.0).abs() < 1e-6);
    }
}
