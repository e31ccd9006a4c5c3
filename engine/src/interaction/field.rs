//! Thermal Field Tools
//!
//! Heat blaster and fire extinguisher: radius scans with smoothstep falloff.
//! Temperatures never drop below the temperature floor.

use glam::Vec2;

use crate::geometry::smooth_step;
use crate::ship::Ship;
use crate::world::SimulationParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatBlasterAction {
    Heat,
    Cool,
}

impl Ship {
    /// Add or remove heat around `position`. Returns whether any point was in range.
    pub fn apply_heat_blaster_at(
        &mut self,
        position: Vec2,
        action: HeatBlasterAction,
        radius_multiplier: f32,
        params: &SimulationParameters,
    ) -> bool {
        let radius = params.heat_blaster_radius * radius_multiplier;
        let heat = params.heat_blaster_heat_flow * params.simulation_step_duration;
        let signed_heat = match action {
            HeatBlasterAction::Heat => heat,
            HeatBlasterAction::Cool => -heat,
        };

        let targets = self.points_within(position, radius);
        for &(p, distance) in &targets {
            self.add_heat(p, signed_heat * (1.0 - smooth_step(0.0, radius, distance)));
        }
        !targets.is_empty()
    }

    /// Put out fires and draw heat from points around `position`.
    ///
    /// Returns whether any point was in range.
    pub fn extinguish_fire_at(&mut self, position: Vec2, radius_multiplier: f32, params: &SimulationParameters) -> bool {
        let radius = params.extinguish_radius * radius_multiplier;
        let heat_removal = params.extinguish_heat_removal * params.simulation_step_duration;

        let targets = self.points_within(position, radius);
        for &(p, distance) in &targets {
            let falloff = 1.0 - smooth_step(0.0, radius, distance);
            if self.points.is_burning(p) {
                self.points.set_burning(p, false);
            }
            self.add_heat(p, -heat_removal * falloff);
        }
        if !targets.is_empty() {
            log::trace!("extinguished around {:?}: {} point(s)", position, targets.len());
        }
        !targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::test_support::{params, solid_ship};
    use crate::ship::PointIndex;
    use crate::world::TEMPERATURE_FLOOR;

    #[test]
    fn heat_falls_off_with_distance() {
        let mut ship = solid_ship(5, 1);
        let params = params();
        let near = ship.nearest_point_at(Vec2::new(-2.5, 0.0), 0.1).unwrap();
        let far = ship.nearest_point_at(Vec2::new(1.5, 0.0), 0.1).unwrap();
        let before = ship.points().temperature(near);

        assert!(ship.apply_heat_blaster_at(Vec2::new(-2.5, 0.0), HeatBlasterAction::Heat, 1.0, &params));
        let near_delta = ship.points().temperature(near) - before;
        let far_delta = ship.points().temperature(far) - before;
        assert!(near_delta > far_delta && far_delta > 0.0);
    }

    #[test]
    fn cooling_respects_temperature_floor() {
        let mut ship = solid_ship(1, 1);
        let params = params();
        let p = PointIndex::new(0);
        let position = ship.points().position(p);
        for _ in 0..10_000 {
            ship.apply_heat_blaster_at(position, HeatBlasterAction::Cool, 1.0, &params);
        }
        assert!(ship.points().temperature(p) >= TEMPERATURE_FLOOR);
    }

    #[test]
    fn extinguisher_stops_burning() {
        let mut ship = solid_ship(2, 2);
        let params = params();
        let p = PointIndex::new(0);
        ship.points.set_burning(p, true);
        let position = ship.points().position(p);
        assert!(ship.extinguish_fire_at(position, 1.0, &params));
        assert!(!ship.points().is_burning(p));
        assert!(!ship.extinguish_fire_at(Vec2::new(100.0, 0.0), 1.0, &params));
    }
}
