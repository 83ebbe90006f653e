//! 2D paths made of straight and circular pieces, sampled into point lists.

use std::f32::consts::TAU;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCurve {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl ArcCurve {
    /// Signed sweep from start to end. A clockwise arc sweeps the long way
    /// round unless start and end coincide.
    pub fn sweep(&self) -> f32 {
        let mut delta = self.end_angle - self.start_angle;
        let same_points = delta.abs() < f32::EPSILON;

        delta = delta.rem_euclid(TAU);
        if delta < f32::EPSILON {
            delta = if same_points { 0.0 } else { TAU };
        }

        if self.clockwise && !same_points {
            if delta == TAU {
                -TAU
            } else {
                delta - TAU
            }
        } else {
            delta
        }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        let angle = self.start_angle + t * self.sweep();
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line { from: Vec2, to: Vec2 },
    Arc(ArcCurve),
}

impl PathSegment {
    fn point_at(&self, t: f32) -> Vec2 {
        match self {
            PathSegment::Line { from, to } => from.lerp(*to, t),
            PathSegment::Arc(arc) => arc.point_at(t),
        }
    }

    /// How many pieces a segment is cut into for a given `divisions` request.
    /// Arcs get twice the resolution, lines need only their endpoints.
    fn resolution(&self, divisions: u32) -> u32 {
        match self {
            PathSegment::Line { .. } => 1,
            PathSegment::Arc(_) => divisions * 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Path2D {
    segments: Vec<PathSegment>,
    current_point: Vec2,
}

impl Path2D {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn line_to(&mut self, point: Vec2) -> &mut Self {
        self.segments.push(PathSegment::Line {
            from: self.current_point,
            to: point,
        });
        self.current_point = point;
        self
    }

    /// Arc around an absolute centre. Joins the previous segment with a straight
    /// line when the arc doesn't start where the path currently is.
    pub fn absarc(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> &mut Self {
        let arc = ArcCurve {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        };

        if !self.segments.is_empty() {
            let first_point = arc.point_at(0.0);
            if first_point != self.current_point {
                self.line_to(first_point);
            }
        }

        self.segments.push(PathSegment::Arc(arc));
        self.current_point = arc.point_at(1.0);
        self
    }

    /// Samples the whole path. Consecutive duplicate points are dropped.
    pub fn get_points(&self, divisions: u32) -> Vec<Vec2> {
        let mut points: Vec<Vec2> = Vec::new();

        for segment in &self.segments {
            let resolution = segment.resolution(divisions).max(1);

            for d in 0..=resolution {
                let point = segment.point_at(d as f32 / resolution as f32);
                if points.last() == Some(&point) {
                    continue;
                }
                points.push(point);
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    fn three_point_arc(clockwise: bool) -> Path2D {
        let mut path = Path2D::new();
        path.absarc(Vec2::ZERO, 6.75, -FRAC_PI_2, FRAC_PI_2, clockwise);
        path
    }

    #[test]
    fn counter_clockwise_arc_bulges_towards_positive_x() {
        let points = three_point_arc(false).get_points(100);

        assert_eq!(points.len(), 201);
        assert!((points[0] - Vec2::new(0.0, -6.75)).length() < 1e-4);
        assert!((points[100] - Vec2::new(6.75, 0.0)).length() < 1e-4);
        assert!((points[200] - Vec2::new(0.0, 6.75)).length() < 1e-4);
    }

    #[test]
    fn clockwise_arc_bulges_towards_negative_x() {
        let points = three_point_arc(true).get_points(100);

        assert_eq!(points.len(), 201);
        assert!((points[100] - Vec2::new(-6.75, 0.0)).length() < 1e-4);
        assert!(points.iter().all(|p| p.x <= 1e-4));
    }

    #[test]
    fn sweep_normalises_angles() {
        let arc = ArcCurve {
            center: Vec2::ZERO,
            radius: 1.0,
            start_angle: 0.0,
            end_angle: 3.0 * PI,
            clockwise: false,
        };
        assert!((arc.sweep() - PI).abs() < 1e-5);

        let full = ArcCurve {
            end_angle: TAU,
            ..arc
        };
        assert!((full.sweep() - TAU).abs() < 1e-5);

        let degenerate = ArcCurve {
            end_angle: 0.0,
            clockwise: true,
            ..arc
        };
        assert_eq!(degenerate.sweep(), 0.0);
    }

    #[test]
    fn second_arc_is_joined_with_a_line() {
        let mut path = Path2D::new();
        path.absarc(Vec2::ZERO, 1.0, 0.0, PI, false)
            .absarc(Vec2::new(5.0, 0.0), 1.0, 0.0, PI, false);

        assert!(matches!(path.segments()[1], PathSegment::Line { .. }));
        assert_eq!(path.segments().len(), 3);
    }
}
