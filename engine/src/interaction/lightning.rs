//! Lightning
//!
//! Target selection prefers the highest exposed particles; a strike detaches
//! particles probabilistically close to the target and heats a wider disc.

use glam::Vec2;

use super::detach_probability;
use crate::geometry::smooth_step;
use crate::random::GameRandom;
use crate::ship::Ship;
use crate::world::{OceanSurface, SimulationParameters};

/// Number of highest particles kept as strike candidates.
pub const LIGHTNING_CANDIDATE_COUNT: usize = 4;

/// Candidates at most this far below the highest one compete for the strike.
pub const LIGHTNING_HEIGHT_TOLERANCE: f32 = 2.0;

/// Sparkles thrown by a strike that detached something.
const LIGHTNING_SPARKLES: usize = 8;

/// Velocity given to a particle torn out by a strike (m/s).
const LIGHTNING_DETACH_SPEED: f32 = 6.0;

impl Ship {
    /// Pick a strike position among the highest above-water particles.
    ///
    /// Orphaned and detached particles are never candidates.
    pub fn find_suitable_lightning_target(&self, ocean: &dyn OceanSurface, rng: &mut GameRandom) -> Option<Vec2> {
        // Sorted by descending height
        let mut candidates: Vec<Vec2> = Vec::with_capacity(LIGHTNING_CANDIDATE_COUNT + 1);
        for p in self.points.ship_points() {
            if self.points.is_orphaned(p) || self.points.is_detached(p) {
                continue;
            }
            let position = self.points.position(p);
            if ocean.is_underwater(position) {
                continue;
            }
            let slot = candidates.partition_point(|c| c.y >= position.y);
            if slot < LIGHTNING_CANDIDATE_COUNT {
                candidates.insert(slot, position);
                candidates.truncate(LIGHTNING_CANDIDATE_COUNT);
            }
        }

        let top = candidates.first()?.y;
        let competing = candidates
            .iter()
            .take_while(|c| top - c.y < LIGHTNING_HEIGHT_TOLERANCE)
            .count();
        Some(candidates[rng.choose_index(competing)])
    }

    /// Strike at `target`. Returns whether any particle was affected.
    pub fn apply_lightning(
        &mut self,
        target: Vec2,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> bool {
        let destroy_radius = params.lightning_destroy_radius;
        let search_radius = params.lightning_search_radius.max(destroy_radius);

        let mut detached = 0;
        let mut heated = 0;
        for (p, distance) in self.points_within(target, search_radius) {
            if self.points.is_detached(p) {
                continue;
            }
            if distance < destroy_radius && rng.uniform_bool(detach_probability(destroy_radius, distance)) {
                let direction = (self.points.position(p) - target).normalize_or_zero();
                if self.detach_point(p, direction * LIGHTNING_DETACH_SPEED, now, params, rng) {
                    detached += 1;
                }
            }
            let falloff = 1.0 - smooth_step(0.0, search_radius, distance);
            self.add_heat(p, params.lightning_heat * falloff);
            heated += 1;
        }

        if detached > 0 {
            self.spawn_sparkles(target, Vec2::ZERO, LIGHTNING_SPARKLES, now, rng);
            self.refresh_connected_components();
        }
        if heated > 0 {
            log::debug!("lightning at {:?}: {} detached, {} heated", target, detached, heated);
        }
        heated > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::test_support::{params, solid_ship};
    use crate::world::FlatOcean;

    #[test]
    fn target_is_among_the_highest_points() {
        let ship = solid_ship(3, 6);
        let ocean = FlatOcean::new(-10.0);
        for seed in 0..10 {
            let mut rng = GameRandom::from_seed(seed);
            let target = ship.find_suitable_lightning_target(&ocean, &mut rng).unwrap();
            assert!(target.y >= 5.0 - LIGHTNING_HEIGHT_TOLERANCE);
        }
    }

    #[test]
    fn submerged_ship_has_no_target() {
        let ship = solid_ship(3, 3);
        let ocean = FlatOcean::new(100.0);
        let mut rng = GameRandom::from_seed(0);
        assert!(ship.find_suitable_lightning_target(&ocean, &mut rng).is_none());
    }

    #[test]
    fn orphans_are_never_targeted() {
        // A lone pixel has no springs
        let ship = solid_ship(1, 1);
        let ocean = FlatOcean::new(-10.0);
        let mut rng = GameRandom::from_seed(0);
        assert!(ship.find_suitable_lightning_target(&ocean, &mut rng).is_none());
    }

    #[test]
    fn strike_heats_and_may_detach() {
        let mut ship = solid_ship(4, 4);
        let params = params();
        let mut rng = GameRandom::from_seed(9);
        let target = Vec2::new(-0.5, 1.5);
        let before: Vec<f32> = ship.points().ship_points().map(|p| ship.points().temperature(p)).collect();

        assert!(ship.apply_lightning(target, 0.0, &params, &mut rng));

        let nearest = ship.nearest_point_at(Vec2::new(0.0, 2.0), 0.1).unwrap();
        assert!(ship.points().temperature(nearest) > before[nearest.index()]);
        assert!(!ship.apply_lightning(Vec2::new(500.0, 500.0), 0.0, &params, &mut rng));
    }
}
