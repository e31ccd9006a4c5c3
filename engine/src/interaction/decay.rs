//! Decay Brushes
//!
//! Scrub heals particles along a stroke (decay towards 1), rot ages them
//! (decay towards 0). Both scale with `(radius - distance) / radius` from the
//! stroke segment.

use glam::Vec2;

use crate::geometry::point_to_segment_distance;
use crate::geometry::segment::segment_bounds;
use crate::ship::{PointIndex, Ship};
use crate::world::{OceanSurface, SimulationParameters};

const SCRUB_STRENGTH: f32 = 0.5;
const ROT_STRENGTH: f32 = 0.1;

/// Rot rate multiplier for submerged or waterlogged particles.
const WET_ROT_MULTIPLIER: f32 = 2.0;
/// Water above which a particle counts as waterlogged.
const WATERLOGGED_THRESHOLD: f32 = 0.5;

impl Ship {
    /// Structural particles within `radius` of the segment, with their
    /// `(radius - distance) / radius` strength.
    fn points_along_stroke(&self, start: Vec2, end: Vec2, radius: f32) -> Vec<(PointIndex, f32)> {
        let (min, max) = segment_bounds(start, end, radius);
        self.points
            .ship_points()
            .filter_map(|p| {
                let position = self.points.position(p);
                if position.cmplt(min).any() || position.cmpgt(max).any() {
                    return None;
                }
                let distance = point_to_segment_distance(position, start, end);
                (distance < radius).then(|| (p, (radius - distance) / radius))
            })
            .collect()
    }

    /// Heal particles along the stroke. Returns whether any was touched.
    pub fn scrub_through(&mut self, start: Vec2, end: Vec2, params: &SimulationParameters) -> bool {
        let touched = self.points_along_stroke(start, end, params.scrub_rot_radius);
        for &(p, strength) in &touched {
            let decay = self.points.decay(p);
            self.points.set_decay(p, decay + (1.0 - decay) * SCRUB_STRENGTH * strength);
        }
        !touched.is_empty()
    }

    /// Age particles along the stroke, faster when wet. Returns whether any was
    /// touched.
    pub fn rot_through(
        &mut self,
        start: Vec2,
        end: Vec2,
        ocean: &dyn OceanSurface,
        params: &SimulationParameters,
    ) -> bool {
        let touched = self.points_along_stroke(start, end, params.scrub_rot_radius);
        for &(p, strength) in &touched {
            let wet = ocean.is_underwater(self.points.position(p)) || self.points.water(p) > WATERLOGGED_THRESHOLD;
            let rate = if wet { ROT_STRENGTH * WET_ROT_MULTIPLIER } else { ROT_STRENGTH };
            let decay = self.points.decay(p);
            self.points.set_decay(p, decay - decay * rate * strength);
        }
        !touched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::test_support::{params, solid_ship};
    use crate::world::FlatOcean;

    #[test]
    fn rot_then_scrub() {
        let mut ship = solid_ship(3, 1);
        let params = params();
        let dry = FlatOcean::new(-100.0);
        let p = ship.nearest_point_at(Vec2::new(-0.5, 0.0), 0.1).unwrap();
        let (start, end) = (Vec2::new(-0.5, -1.0), Vec2::new(-0.5, 1.0));

        assert!(ship.rot_through(start, end, &dry, &params));
        let rotted = ship.points().decay(p);
        assert!(rotted < 1.0);
        // The point on the stroke rots the most
        let side = ship.nearest_point_at(Vec2::new(0.5, 0.0), 0.1).unwrap();
        assert!(ship.points().decay(side) > rotted);

        assert!(ship.scrub_through(start, end, &params));
        assert!(ship.points().decay(p) > rotted);
        assert!(ship.points().decay(p) <= 1.0);
    }

    #[test]
    fn submerged_points_rot_faster() {
        let params = params();
        let (start, end) = (Vec2::new(-0.5, -1.0), Vec2::new(-0.5, 1.0));

        let mut dry_ship = solid_ship(1, 1);
        dry_ship.rot_through(start, end, &FlatOcean::new(-100.0), &params);
        let mut wet_ship = solid_ship(1, 1);
        wet_ship.rot_through(start, end, &FlatOcean::new(100.0), &params);

        let p = PointIndex::new(0);
        assert!(wet_ship.points().decay(p) < dry_ship.points().decay(p));
    }

    #[test]
    fn stroke_far_away_touches_nothing() {
        let mut ship = solid_ship(2, 2);
        assert!(!ship.scrub_through(Vec2::new(100.0, 0.0), Vec2::new(101.0, 0.0), &params()));
    }
}
