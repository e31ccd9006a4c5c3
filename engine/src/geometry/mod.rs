//! Geometry Module
//!
//! Small 2D helpers shared by the builder and the interaction tools.
//! Ship space is y-up, so counter-clockwise winding has positive signed area.
//!
//! # Submodules
//!
//! - [`segment`] - Segment intersection and distance tests
//! - [`octant`] - Discretized 8-neighbor directions on the point matrix

pub mod octant;
pub mod segment;

use glam::Vec2;

pub use octant::Octant;
pub use segment::{point_to_segment_distance, proper_intersection_test};

/// Hermite smoothstep between `edge0` and `edge1`.
///
/// Returns 0 at or below `edge0`, 1 at or above `edge1`.
#[inline]
pub fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear ramp between `edge0` and `edge1`, clamped to `[0, 1]`.
#[inline]
pub fn linear_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0)
}

/// Twice the signed area of triangle `(a, b, c)`; positive when CCW.
#[inline]
pub fn cross_2d(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Area of triangle `(a, b, c)` regardless of winding.
#[inline]
pub fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    cross_2d(a, b, c).abs() * 0.5
}

/// Whether `p` lies inside (or on the border of) triangle `(a, b, c)`.
///
/// Works for either winding.
pub fn is_point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross_2d(a, b, p);
    let d2 = cross_2d(b, c, p);
    let d3 = cross_2d(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Signed area of a closed polygon (shoelace formula).
pub fn signed_polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        twice_area += a.perp_dot(b);
    }
    twice_area * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_step_edges() {
        assert_eq!(smooth_step(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smooth_step(0.0, 1.0, 2.0), 1.0);
        assert!((smooth_step(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!(smooth_step(0.0, 1.0, 0.25) < 0.25);
    }

    #[test]
    fn linear_step_is_clamped_ramp() {
        assert_eq!(linear_step(2.0, 4.0, 1.0), 0.0);
        assert!((linear_step(2.0, 4.0, 3.0) - 0.5).abs() < 1e-6);
        assert_eq!(linear_step(2.0, 4.0, 5.0), 1.0);
    }

    #[test]
    fn point_in_triangle_either_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(0.0, 4.0);
        assert!(is_point_in_triangle(Vec2::new(1.0, 1.0), a, b, c));
        assert!(is_point_in_triangle(Vec2::new(1.0, 1.0), a, c, b));
        assert!(!is_point_in_triangle(Vec2::new(3.0, 3.0), a, b, c));
    }

    #[test]
    fn ccw_square_has_positive_area() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        assert!((signed_polygon_area(&square) - 4.0).abs() < 1e-6);
        let reversed: Vec<Vec2> = square.iter().rev().copied().collect();
        assert!((signed_polygon_area(&reversed) + 4.0).abs() < 1e-6);
    }
}
