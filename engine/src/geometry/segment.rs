//! Segment tests
//!
//! Used by the cutting tools (saw, laser) and the scrub/rot brushes.

use glam::Vec2;

/// Whether segments `p1-p2` and `q1-q2` cross at a single interior point.
///
/// Touching at an endpoint or overlapping collinearly is not a proper
/// intersection.
pub fn proper_intersection_test(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = (p2 - p1).perp_dot(q1 - p1);
    let d2 = (p2 - p1).perp_dot(q2 - p1);
    let d3 = (q2 - q1).perp_dot(p1 - q1);
    let d4 = (q2 - q1).perp_dot(p2 - q1);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// Distance from `p` to the closest point of segment `a-b`.
pub fn point_to_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Axis-aligned bounds of segment `a-b` grown by `margin`, as `(min, max)`.
pub fn segment_bounds(a: Vec2, b: Vec2, margin: f32) -> (Vec2, Vec2) {
    (a.min(b) - Vec2::splat(margin), a.max(b) + Vec2::splat(margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_intersect() {
        assert!(proper_intersection_test(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        ));
    }

    #[test]
    fn touching_at_endpoint_is_not_proper() {
        assert!(!proper_intersection_test(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!proper_intersection_test(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(2.0, 1.0),
        ));
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(2.0, 0.0);
        assert!((point_to_segment_distance(Vec2::new(1.0, 3.0), a, b) - 3.0).abs() < 1e-6);
        assert!((point_to_segment_distance(Vec2::new(5.0, 4.0), a, b) - 5.0).abs() < 1e-6);
    }
}
