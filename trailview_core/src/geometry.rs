//! In-plane ribbon geometry: perpendicular offsets and curve sampling.
//!
//! The centerline lives in the trajectory's XY plane; Z is carried through
//! by the builder unchanged. The offsets thicken a centerline into a ribbon
//! and are not surface normals.

use nalgebra::Vector2;

/// Rotation sign applied when turning a direction into its perpendicular.
///
/// The two ribbon styles offset to opposite sides of the path; the flag
/// keeps both conventions available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalOrientation {
    /// `(dx, dy) -> (-dy, dx)`: offset to the left of travel.
    Left,
    /// `(dx, dy) -> (dy, -dx)`: offset to the right of travel.
    Right,
}

/// Perpendicular offset of length `half_width` for the direction `to - from`.
///
/// Returns `None` when the two points coincide or the direction is not
/// finite; callers skip the segment instead of propagating NaN.
pub fn perpendicular_offset(
    from: Vector2<f64>,
    to: Vector2<f64>,
    half_width: f64,
    orientation: NormalOrientation,
) -> Option<Vector2<f64>> {
    let dir = to - from;
    let len = dir.norm();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let unit = dir / len;
    let perp = match orientation {
        NormalOrientation::Left => Vector2::new(-unit.y, unit.x),
        NormalOrientation::Right => Vector2::new(unit.y, -unit.x),
    };
    Some(perp * half_width)
}

/// Evaluate the quadratic Bezier defined by start `p0`, control `p1` and
/// end `p2` at parameter `t`.
pub fn quadratic_bezier(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    t: f64,
) -> Vector2<f64> {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}
