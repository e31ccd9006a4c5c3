//! Thanos Snap
//!
//! A disintegration wave spreading sideways from `center_x`. Every call gives
//! each particle between the two wave fronts one chance to detach; callers
//! advance the fronts and call again every frame.

use glam::Vec2;

use crate::random::GameRandom;
use crate::ship::{PointIndex, Ship};
use crate::world::SimulationParameters;

/// Range of the outward speed given to snapped particles (m/s).
const SNAP_SPEED: (f32, f32) = (2.0, 8.0);

impl Ship {
    /// Detach particles between `left_front_x` and `right_front_x`.
    ///
    /// Snapped particles drift away from `center_x` and are fully decayed.
    /// Returns whether anything was detached.
    pub fn apply_thanos_snap(
        &mut self,
        center_x: f32,
        left_front_x: f32,
        right_front_x: f32,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> bool {
        let (left, right) = if left_front_x <= right_front_x {
            (left_front_x, right_front_x)
        } else {
            (right_front_x, left_front_x)
        };

        let band: Vec<PointIndex> = self
            .points
            .ship_points()
            .filter(|&p| !self.points.is_detached(p))
            .filter(|&p| (left..=right).contains(&self.points.position(p).x))
            .collect();

        let mut detached = 0;
        for p in band {
            if !rng.uniform_bool(params.thanos_snap_probability) {
                continue;
            }
            let side = if self.points.position(p).x < center_x { -1.0 } else { 1.0 };
            let speed = rng.uniform_range(SNAP_SPEED.0, SNAP_SPEED.1);
            let lift = rng.uniform_range(0.0, SNAP_SPEED.0);
            if self.detach_point(p, Vec2::new(side * speed, lift), now, params, rng) {
                self.points.set_decay(p, 0.0);
                detached += 1;
            }
        }

        if detached > 0 {
            log::debug!("thanos snap: {} particle(s) detached", detached);
            self.refresh_connected_components();
        }
        detached > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::test_support::{params, solid_ship};

    #[test]
    fn snap_only_touches_the_band() {
        let mut ship = solid_ship(8, 2);
        let params = SimulationParameters {
            thanos_snap_probability: 1.0,
            ..params()
        };
        let mut rng = GameRandom::from_seed(4);

        assert!(ship.apply_thanos_snap(-2.0, -4.0, -2.0, 0.0, &params, &mut rng));

        for p in ship.points().ship_points() {
            let in_band = (-4.0..=-2.0).contains(&ship.points().position(p).x);
            assert_eq!(ship.points().is_detached(p), in_band);
            if in_band {
                assert_eq!(ship.points().decay(p), 0.0);
            }
        }
    }

    #[test]
    fn repeated_snaps_eventually_take_everything() {
        let mut ship = solid_ship(3, 3);
        let params = params();
        let mut rng = GameRandom::from_seed(8);
        for _ in 0..500 {
            ship.apply_thanos_snap(0.0, -10.0, 10.0, 0.0, &params, &mut rng);
        }
        assert!(ship.points().ship_points().all(|p| ship.points().is_detached(p)));
    }

    #[test]
    fn snapped_points_move_away_from_center() {
        let mut ship = solid_ship(2, 1);
        let params = SimulationParameters {
            thanos_snap_probability: 1.0,
            ..params()
        };
        let mut rng = GameRandom::from_seed(1);
        ship.apply_thanos_snap(-0.5, -10.0, 10.0, 0.0, &params, &mut rng);

        let left = ship.nearest_point_at(Vec2::new(-1.0, 0.0), 0.1).unwrap();
        let right = ship.nearest_point_at(Vec2::new(0.0, 0.0), 0.1).unwrap();
        assert!(ship.points().velocity(left).x < 0.0);
        assert!(ship.points().velocity(right).x > 0.0);
    }
}
