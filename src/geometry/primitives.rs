//! Parametric solids and outlines. Layouts follow the usual retained-mode
//! conventions: everything is centred on the origin, cylinders stand along +Y and
//! flat shapes (circles, tori) lie in the XY plane.

use std::f32::consts::TAU;

use glam::Vec3;
use itertools::Itertools;

use crate::geometry::{Geometry, Topology, Vertex};

pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;

/// Axis-aligned box with flat-shaded faces (4 vertices per face).
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vec3::new(width, height, depth) * 0.5;

    // (normal, u, v) with u x v == normal so that the quads wind counter-clockwise
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = vertices.len() as u32;

        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * su + v * sv) * half;
            vertices.push(Vertex::new(position, normal));
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Geometry::new(vertices, indices, Topology::Triangles)
}

/// Closed cylinder (or truncated cone) with a single height segment.
pub fn cylinder_geometry(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Geometry {
    debug_assert!(radial_segments >= 3);

    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: row 0 is the top ring, row 1 the bottom ring
    for (radius, y) in [(radius_top, half_height), (radius_bottom, -half_height)] {
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();

            vertices.push(Vertex::new(
                Vec3::new(radius * sin, y, radius * cos),
                Vec3::new(sin, slope, cos).normalize(),
            ));
        }
    }

    let row = radial_segments + 1;
    for x in 0..radial_segments {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;

        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    for top in [true, false] {
        let (radius, y, normal) = if top {
            (radius_top, half_height, Vec3::Y)
        } else {
            (radius_bottom, -half_height, Vec3::NEG_Y)
        };

        if radius <= 0.0 {
            continue;
        }

        let center = vertices.len() as u32;
        vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal));

        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
            ));
        }

        for x in 0..radial_segments {
            let i = center + 1 + x;
            if top {
                indices.extend_from_slice(&[center, i, i + 1]);
            } else {
                indices.extend_from_slice(&[center, i + 1, i]);
            }
        }
    }

    Geometry::new(vertices, indices, Topology::Triangles)
}

/// UV sphere. Poles sit on the Y axis.
pub fn sphere_geometry(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    debug_assert!(width_segments >= 3 && height_segments >= 2);

    let mut vertices = Vec::new();
    let mut grid = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let mut row = Vec::with_capacity(width_segments as usize + 1);

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;

            let position = Vec3::new(
                -radius * (u * TAU).cos() * (v * std::f32::consts::PI).sin(),
                radius * (v * std::f32::consts::PI).cos(),
                radius * (u * TAU).sin() * (v * std::f32::consts::PI).sin(),
            );

            row.push(vertices.len() as u32);
            vertices.push(Vertex::new(position, position.normalize_or_zero()));
        }

        grid.push(row);
    }

    let mut indices = Vec::new();

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            // The first and last rows collapse into the poles
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry::new(vertices, indices, Topology::Triangles)
}

/// Torus around the Z axis, i.e. the ring lies in the XY plane.
pub fn torus_geometry(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> Geometry {
    debug_assert!(radial_segments >= 3 && tubular_segments >= 3);

    let mut vertices = Vec::new();

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;

            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);

            vertices.push(Vertex::new(position, (position - center).normalize()));
        }
    }

    let stride = tubular_segments + 1;
    let mut indices = Vec::new();

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::new(vertices, indices, Topology::Triangles)
}

/// The boundary edges of a filled circle in the XY plane: a closed ring of
/// `segments` line segments.
pub fn circle_outline(radius: f32, segments: u32) -> Geometry {
    debug_assert!(segments >= 3);

    let vertices = (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            Vertex::new(
                Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0),
                Vec3::Z,
            )
        })
        .collect();

    let indices = (0..segments)
        .flat_map(|i| [i, (i + 1) % segments])
        .collect();

    Geometry::new(vertices, indices, Topology::Lines)
}

/// A line strip through `points`, stored as a segment list.
pub fn polyline(points: &[Vec3]) -> Geometry {
    let vertices = points
        .iter()
        .map(|&point| Vertex::new(point, Vec3::Y))
        .collect();

    let indices = (0..points.len() as u32)
        .tuple_windows()
        .flat_map(|(a, b)| [a, b])
        .collect();

    Geometry::new(vertices, indices, Topology::Lines)
}

pub fn line_segment(from: Vec3, to: Vec3) -> Geometry {
    polyline(&[from, to])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every triangle's geometric normal should point away from the origin for
    /// convex, origin-centred solids.
    fn assert_outward_winding(geometry: &Geometry) {
        for triangle in geometry.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| geometry.vertices[triangle[i] as usize].position);
            let normal = (b - a).cross(c - a);

            if normal.length_squared() < 1e-12 {
                continue;
            }

            let centroid = (a + b + c) / 3.0;
            assert!(
                normal.dot(centroid) > 0.0,
                "Triangle {:?} faces inwards",
                triangle
            );
        }
    }

    #[test]
    fn box_has_six_quads_with_requested_extents() {
        let geometry = box_geometry(30.0, 0.2, 15.0);

        assert_eq!(geometry.vertices.len(), 24);
        assert_eq!(geometry.indices.len(), 36);

        let bounds = geometry.bounding_box().unwrap();
        assert_eq!(bounds.min, Vec3::new(-15.0, -0.1, -7.5));
        assert_eq!(bounds.max, Vec3::new(15.0, 0.1, 7.5));
        assert_outward_winding(&geometry);
    }

    #[test]
    fn box_face_normals_match_face_positions() {
        let geometry = box_geometry(2.0, 2.0, 2.0);

        for vertex in &geometry.vertices {
            assert_eq!(vertex.position.dot(vertex.normal), 1.0);
        }
    }

    #[test]
    fn cylinder_spans_height_and_winds_outwards() {
        let geometry = cylinder_geometry(0.12, 0.12, 9.048, DEFAULT_RADIAL_SEGMENTS);

        let bounds = geometry.bounding_box().unwrap();
        assert!((bounds.max.y - 4.524).abs() < 1e-5);
        assert!((bounds.min.y + 4.524).abs() < 1e-5);
        assert!((bounds.max.x - 0.12).abs() < 1e-5);

        // side + two caps
        assert_eq!(geometry.primitive_count(), 32 * 2 + 32 * 2);
        assert_outward_winding(&geometry);
    }

    #[test]
    fn cone_skips_degenerate_cap() {
        let geometry = cylinder_geometry(0.0, 1.0, 2.0, 8);
        assert_eq!(geometry.primitive_count(), 8 * 2 + 8);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let geometry = sphere_geometry(0.8, 32, 32);

        assert_eq!(geometry.vertices.len(), 33 * 33);
        assert_eq!(geometry.primitive_count(), 32 * (2 * 32 - 2));
        for position in geometry.positions() {
            assert!((position.length() - 0.8).abs() < 1e-5);
        }
        assert_outward_winding(&geometry);
    }

    #[test]
    fn torus_lies_in_xy_plane() {
        let geometry = torus_geometry(0.45, 0.04, 8, 16);
        let bounds = geometry.bounding_box().unwrap();

        assert!((bounds.max.x - 0.49).abs() < 1e-5);
        assert!((bounds.max.z - 0.04).abs() < 1e-3);
        assert_eq!(geometry.primitive_count(), 8 * 16 * 2);

        for vertex in &geometry.vertices {
            assert!((vertex.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn circle_outline_is_closed_ring() {
        let geometry = circle_outline(1.8, 64);

        assert_eq!(geometry.topology, Topology::Lines);
        assert_eq!(geometry.vertices.len(), 64);
        assert_eq!(geometry.primitive_count(), 64);
        assert_eq!(geometry.indices.last(), Some(&0));

        for position in geometry.positions() {
            assert!((position.length() - 1.8).abs() < 1e-5);
            assert_eq!(position.z, 0.0);
        }
    }

    #[test]
    fn polyline_expands_strip_into_segments() {
        let geometry = polyline(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]);

        assert_eq!(geometry.indices, vec![0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn single_point_polyline_draws_nothing() {
        assert!(polyline(&[Vec3::ONE]).is_empty());
    }
}
