//! Ribbon mesh construction.
//!
//! One builder, parameterized by [`RibbonConfig`], covers both ribbon
//! styles: straight per-pair quads and Bezier-sampled smooth windows.
//! The builder is a pure single pass over the trajectory points; every call
//! allocates fresh buffers and retains nothing.

use thiserror::Error;

use crate::geometry::{perpendicular_offset, quadratic_bezier, NormalOrientation};
use crate::gradient::color_for_velocity;
use crate::scene::{Color, TriangleListPrimitive};
use crate::trajectory::{Point3, TrajectoryPoint};

/// Number of Bezier sub-segments sampled per smooth window.
const BEZIER_SUBDIVISIONS: usize = 10;

/// Centerline sampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterlineSampling {
    /// Connect consecutive trajectory points with straight quads.
    PathPoints,
    /// Sample a quadratic Bezier through each consecutive point triple.
    QuadraticBezier,
}

/// Ribbon construction parameters.
///
/// The two presets cover the shipped ribbon styles. Custom configurations
/// go through [`RibbonConfig::validate`], which converter construction
/// enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonConfig {
    /// Half-width of the ribbon in meters.
    pub half_width: f64,
    /// Z lift applied to every emitted vertex, against z-fighting with the
    /// ground surface.
    pub z_offset: f64,
    /// Velocity mapped to full green by the gradient.
    pub vel_max: f64,
    /// Side of travel the positive offset rotates toward.
    pub orientation: NormalOrientation,
    /// Centerline sampling strategy.
    pub sampling: CenterlineSampling,
}

/// Rejected ribbon configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("vel_max must be positive and finite, got {0}")]
    InvalidVelMax(f64),
    #[error("half_width must be positive and finite, got {0}")]
    InvalidHalfWidth(f64),
}

impl RibbonConfig {
    /// Straight-segment ribbon: one quad per consecutive point pair.
    pub const fn straight() -> Self {
        Self {
            half_width: 1.25,
            z_offset: 0.1,
            vel_max: 8.33,
            orientation: NormalOrientation::Left,
            sampling: CenterlineSampling::PathPoints,
        }
    }

    /// Smooth ribbon: Bezier-sampled quads through each point triple.
    pub const fn smooth() -> Self {
        Self {
            half_width: 2.0,
            z_offset: 0.15,
            vel_max: 3.0,
            orientation: NormalOrientation::Right,
            sampling: CenterlineSampling::QuadraticBezier,
        }
    }

    /// Check the numeric preconditions of the gradient and the offset math.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.vel_max.is_finite() && self.vel_max > 0.0) {
            return Err(ConfigError::InvalidVelMax(self.vel_max));
        }
        if !(self.half_width.is_finite() && self.half_width > 0.0) {
            return Err(ConfigError::InvalidHalfWidth(self.half_width));
        }
        Ok(())
    }
}

/// Accumulated ribbon buffers: vertices, per-vertex colors, triangle indices.
///
/// Buffers are append-only and index-aligned: `colors[i]` belongs to
/// `vertices[i]`, indices come in triples, and every index is smaller than
/// the vertex count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    pub vertices: Vec<Point3>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * 4),
            colors: Vec::with_capacity(quads * 4),
            indices: Vec::with_capacity(quads * 6),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append one quad: four vertices, their colors, two triangles.
    ///
    /// The index base derives from the running vertex count rather than a
    /// fixed per-segment stride, so skipped segments cannot break the
    /// index/vertex correspondence.
    fn push_quad(&mut self, vertices: [Point3; 4], colors: [Color; 4]) {
        self.vertices.extend_from_slice(&vertices);
        self.colors.extend_from_slice(&colors);
        let base = (self.vertices.len() - 4) as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 2, base + 3]);
    }

    /// Hand the buffers off as the host-facing triangle-list primitive.
    pub fn into_primitive(self) -> TriangleListPrimitive {
        TriangleListPrimitive::new(self.vertices, self.colors, self.indices)
    }
}

/// Build a ribbon mesh from trajectory points.
///
/// Pure and total: short inputs and degenerate directions produce fewer
/// quads (possibly an empty mesh), never an error.
pub fn build_ribbon(config: &RibbonConfig, points: &[TrajectoryPoint]) -> RibbonMesh {
    match config.sampling {
        CenterlineSampling::PathPoints => build_straight(config, points),
        CenterlineSampling::QuadraticBezier => build_smooth(config, points),
    }
}

fn build_straight(config: &RibbonConfig, points: &[TrajectoryPoint]) -> RibbonMesh {
    if points.len() < 2 {
        return RibbonMesh::new();
    }
    let mut mesh = RibbonMesh::with_capacity(points.len() - 1);
    for pair in points.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let a = start.pose.position.xy();
        let b = end.pose.position.xy();
        let Some(offset) = perpendicular_offset(a, b, config.half_width, config.orientation)
        else {
            // Coincident points: no direction, no quad.
            continue;
        };
        let za = start.pose.position.z + config.z_offset;
        let zb = end.pose.position.z + config.z_offset;
        let c_start = color_for_velocity(config.vel_max, start.longitudinal_velocity_mps);
        let c_end = color_for_velocity(config.vel_max, end.longitudinal_velocity_mps);
        mesh.push_quad(
            [
                Point3::new(a.x + offset.x, a.y + offset.y, za),
                Point3::new(a.x - offset.x, a.y - offset.y, za),
                Point3::new(b.x + offset.x, b.y + offset.y, zb),
                Point3::new(b.x - offset.x, b.y - offset.y, zb),
            ],
            [c_start, c_start, c_end, c_end],
        );
    }
    mesh
}

fn build_smooth(config: &RibbonConfig, points: &[TrajectoryPoint]) -> RibbonMesh {
    let windows = points.len().saturating_sub(2);
    if windows == 0 {
        return RibbonMesh::new();
    }
    let mut mesh = RibbonMesh::with_capacity(windows * BEZIER_SUBDIVISIONS);
    for i in 0..windows {
        // Control and end fall back to the nearest available point, which
        // degrades the curve to a straight segment near the tail.
        let start = &points[i];
        let control = points.get(i + 1).unwrap_or(start);
        let end = points.get(i + 2).unwrap_or(control);

        let p0 = start.pose.position.xy();
        let p1 = control.pose.position.xy();
        let p2 = end.pose.position.xy();
        // The whole window lifts from its start point's z.
        let z = start.pose.position.z + config.z_offset;

        // Color granularity is per trajectory point, not per curve sample.
        let c_start = color_for_velocity(config.vel_max, start.longitudinal_velocity_mps);
        let c_end = color_for_velocity(config.vel_max, control.longitudinal_velocity_mps);

        for k in 0..BEZIER_SUBDIVISIONS {
            let t1 = k as f64 / BEZIER_SUBDIVISIONS as f64;
            let t2 = (k + 1) as f64 / BEZIER_SUBDIVISIONS as f64;
            let q1 = quadratic_bezier(p0, p1, p2, t1);
            let q2 = quadratic_bezier(p0, p1, p2, t2);
            let Some(offset) =
                perpendicular_offset(q1, q2, config.half_width, config.orientation)
            else {
                continue;
            };
            mesh.push_quad(
                [
                    Point3::new(q1.x + offset.x, q1.y + offset.y, z),
                    Point3::new(q1.x - offset.x, q1.y - offset.y, z),
                    Point3::new(q2.x + offset.x, q2.y + offset.y, z),
                    Point3::new(q2.x - offset.x, q2.y - offset.y, z),
                ],
                [c_start, c_start, c_end, c_end],
            );
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::RED;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn path(points: &[(f64, f64, f64, f64)]) -> Vec<TrajectoryPoint> {
        points
            .iter()
            .map(|&(x, y, z, v)| TrajectoryPoint::new(Point3::new(x, y, z), v))
            .collect()
    }

    #[test]
    fn test_straight_two_point_quad() {
        let pts = path(&[(0.0, 0.0, 0.0, 0.0), (10.0, 0.0, 0.0, 0.0)]);
        let mesh = build_ribbon(&RibbonConfig::straight(), &pts);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.colors.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 2, 3]);
        assert_eq!(mesh.vertices[0], Point3::new(0.0, 1.25, 0.1));
        assert_eq!(mesh.vertices[1], Point3::new(0.0, -1.25, 0.1));
        assert_eq!(mesh.vertices[2], Point3::new(10.0, 1.25, 0.1));
        assert_eq!(mesh.vertices[3], Point3::new(10.0, -1.25, 0.1));
        assert!(mesh.colors.iter().all(|c| *c == RED));
    }

    #[test]
    fn test_straight_segment_counts() {
        let pts = path(&[
            (0.0, 0.0, 0.0, 1.0),
            (1.0, 0.0, 0.0, 2.0),
            (2.0, 0.0, 0.0, 3.0),
            (3.0, 0.0, 0.0, 4.0),
            (4.0, 0.0, 0.0, 5.0),
        ]);
        let mesh = build_ribbon(&RibbonConfig::straight(), &pts);
        // N points, N-1 segments
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.colors.len(), 16);
        assert_eq!(mesh.indices.len(), 24);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_straight_short_inputs_produce_empty_mesh() {
        let empty: Vec<TrajectoryPoint> = Vec::new();
        assert!(build_ribbon(&RibbonConfig::straight(), &empty).is_empty());

        let one = path(&[(0.0, 0.0, 0.0, 1.0)]);
        let mesh = build_ribbon(&RibbonConfig::straight(), &one);
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_smooth_two_points_produce_empty_mesh() {
        let pts = path(&[(0.0, 0.0, 0.0, 1.0), (10.0, 0.0, 0.0, 1.0)]);
        let mesh = build_ribbon(&RibbonConfig::smooth(), &pts);
        assert!(mesh.is_empty());
        assert!(mesh.colors.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_smooth_sampling_counts() {
        // Strictly advancing x keeps every sub-direction non-degenerate.
        let three = path(&[(0.0, 0.0, 0.0, 1.0), (5.0, 5.0, 0.0, 1.0), (10.0, 0.0, 0.0, 1.0)]);
        let mesh = build_ribbon(&RibbonConfig::smooth(), &three);
        assert_eq!(mesh.vertex_count(), 40);
        assert_eq!(mesh.colors.len(), 40);
        assert_eq!(mesh.indices.len(), 60);

        let four = path(&[
            (0.0, 0.0, 0.0, 1.0),
            (5.0, 5.0, 0.0, 1.0),
            (10.0, 0.0, 0.0, 1.0),
            (15.0, -5.0, 0.0, 1.0),
        ]);
        let mesh = build_ribbon(&RibbonConfig::smooth(), &four);
        assert_eq!(mesh.vertex_count(), 80);
        assert_eq!(mesh.indices.len(), 120);
    }

    #[test]
    fn test_smooth_window_lifts_from_window_start_z() {
        let pts = path(&[
            (0.0, 0.0, 1.0, 1.0),
            (5.0, 5.0, 2.0, 1.0),
            (10.0, 0.0, 3.0, 1.0),
            (15.0, -5.0, 4.0, 1.0),
        ]);
        let mesh = build_ribbon(&RibbonConfig::smooth(), &pts);
        // First window lifts from z=1.0, second from z=2.0.
        assert_relative_eq!(mesh.vertices[0].z, 1.15, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[39].z, 1.15, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[40].z, 2.15, epsilon = 1e-12);
    }

    #[test]
    fn test_straight_z_follows_each_endpoint() {
        let pts = path(&[(0.0, 0.0, 1.0, 1.0), (10.0, 0.0, 2.0, 1.0)]);
        let mesh = build_ribbon(&RibbonConfig::straight(), &pts);
        assert_relative_eq!(mesh.vertices[0].z, 1.1, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[1].z, 1.1, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[2].z, 2.1, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[3].z, 2.1, epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_pair_skipped_without_nan() {
        let pts = path(&[
            (0.0, 0.0, 0.0, 1.0),
            (0.0, 0.0, 0.0, 1.0),
            (5.0, 0.0, 0.0, 1.0),
        ]);
        let mesh = build_ribbon(&RibbonConfig::straight(), &pts);
        // Only the second pair has a direction.
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 2, 3]);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite()));
    }

    #[test]
    fn test_smooth_colors_follow_window_points() {
        // First point stopped (red band), the rest at full speed (green).
        let pts = path(&[(0.0, 0.0, 0.0, 0.0), (5.0, 1.0, 0.0, 4.0), (10.0, 0.0, 0.0, 4.0)]);
        let mesh = build_ribbon(&RibbonConfig::smooth(), &pts);
        assert_eq!(mesh.colors.len(), 40);
        for quad in mesh.colors.chunks(4) {
            assert_eq!(quad[0], quad[1]);
            assert_eq!(quad[2], quad[3]);
            assert_eq!(quad[0], RED);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(RibbonConfig::straight().validate().is_ok());
        assert!(RibbonConfig::smooth().validate().is_ok());

        let mut cfg = RibbonConfig::smooth();
        cfg.vel_max = 0.0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidVelMax(0.0)));

        let mut cfg = RibbonConfig::straight();
        cfg.half_width = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidHalfWidth(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_buffers_stay_index_aligned(
            raw in proptest::collection::vec(
                (-100.0f64..100.0, -100.0f64..100.0, -5.0f64..5.0, -10.0f64..10.0),
                0..24,
            ),
            smooth in any::<bool>(),
        ) {
            let points: Vec<TrajectoryPoint> = raw
                .iter()
                .map(|&(x, y, z, v)| TrajectoryPoint::new(Point3::new(x, y, z), v))
                .collect();
            let config = if smooth {
                RibbonConfig::smooth()
            } else {
                RibbonConfig::straight()
            };
            let mesh = build_ribbon(&config, &points);

            prop_assert_eq!(mesh.vertices.len(), mesh.colors.len());
            prop_assert_eq!(mesh.indices.len() % 3, 0);
            for &idx in &mesh.indices {
                prop_assert!((idx as usize) < mesh.vertices.len());
            }
        }
    }
}
