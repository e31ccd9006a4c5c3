//! Pressure and Water Tools
//!
//! Pressure injection into a single particle and flooding or draining of the
//! particles under the hose. Water and internal pressure always change together:
//! a water delta `Δw` carries a pressure delta `Δw · P_atm · (T / T_ref)`.

use glam::Vec2;

use crate::geometry::is_point_in_triangle;
use crate::random::GameRandom;
use crate::ship::{PointIndex, Ship};
use crate::world::{SimulationParameters, AIR_PRESSURE_AT_SEA_LEVEL, REFERENCE_TEMPERATURE};

/// Fraction of a particle's water drained by one unit of negative flow.
const DRAIN_FRACTION: f32 = 0.25;

/// Pressure change matching a water change at temperature `temperature`.
pub fn water_pressure_delta(water_delta: f32, temperature: f32) -> f32 {
    water_delta * AIR_PRESSURE_AT_SEA_LEVEL * (temperature / REFERENCE_TEMPERATURE)
}

impl Ship {
    fn is_pressurizable(&self, p: PointIndex) -> bool {
        !self.points.is_hull(p) && !self.points.is_detached(p)
    }

    /// Nearest non-hull vertex of a live triangle containing `position`.
    fn pressure_target_in_triangles(&self, position: Vec2) -> Option<PointIndex> {
        self.triangles
            .indices()
            .filter(|&t| !self.triangles.is_deleted(t))
            .find(|&t| {
                let [a, b, c] = self.triangles.points(t).map(|p| self.points.position(p));
                is_point_in_triangle(position, a, b, c)
            })
            .and_then(|t| {
                self.triangles
                    .points(t)
                    .into_iter()
                    .filter(|&p| self.is_pressurizable(p))
                    .min_by(|&a, &b| {
                        let da = self.points.position(a).distance_squared(position);
                        let db = self.points.position(b).distance_squared(position);
                        da.total_cmp(&db)
                    })
            })
    }

    /// Inject pressure into the nearest non-hull particle.
    ///
    /// Falls back to the triangle under `position` when no particle is close
    /// enough. Returns the particle that received the pressure.
    pub fn inject_pressure_at(
        &mut self,
        position: Vec2,
        pressure_multiplier: f32,
        params: &SimulationParameters,
    ) -> Option<PointIndex> {
        let nearest = self
            .points_within(position, params.inject_pressure_search_radius)
            .into_iter()
            .filter(|&(p, _)| self.is_pressurizable(p))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p);

        let target = nearest.or_else(|| self.pressure_target_in_triangles(position))?;
        self.points
            .add_internal_pressure(target, params.inject_pressure_quantity * pressure_multiplier);
        log::trace!("injected pressure into {:?}", target);
        Some(target)
    }

    /// Add water (positive multiplier) to, or drain water (negative multiplier)
    /// from, the non-hull particles under the hose.
    ///
    /// Draining releases air bubbles. Returns whether any particle changed.
    pub fn flood_at(
        &mut self,
        position: Vec2,
        water_quantity_multiplier: f32,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> bool {
        if water_quantity_multiplier == 0.0 {
            return false;
        }

        let targets: Vec<PointIndex> = self
            .points_within(position, params.flood_radius)
            .into_iter()
            .map(|(p, _)| p)
            .filter(|&p| self.is_pressurizable(p))
            .collect();

        let mut changed = 0;
        for p in targets {
            let water = self.points.water(p);
            let water_delta = if water_quantity_multiplier > 0.0 {
                params.flood_quantity * water_quantity_multiplier
            } else {
                let requested = (water * DRAIN_FRACTION).max(params.flood_quantity * -water_quantity_multiplier);
                -requested.min(water)
            };
            if water_delta == 0.0 {
                continue;
            }

            let pressure_delta = water_pressure_delta(water_delta, self.points.temperature(p));
            self.points.add_water_and_pressure(p, water_delta, pressure_delta);
            if water_delta < 0.0 {
                let bubble_position = self.points.position(p);
                self.spawn_air_bubble(bubble_position, now, rng);
            }
            changed += 1;
        }

        if changed > 0 {
            log::trace!("flood at {:?}: {} particle(s) changed", position, changed);
        }
        changed > 0
    }
}
