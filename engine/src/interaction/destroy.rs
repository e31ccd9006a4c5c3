//! Destructive Tools
//!
//! Radius-based point destruction and segment-based spring cutting.

use glam::Vec2;

use super::detach_probability;
use crate::geometry::segment::segment_bounds;
use crate::geometry::{point_to_segment_distance, proper_intersection_test, smooth_step};
use crate::random::GameRandom;
use crate::ship::topology::TriangleDestroyPolicy;
use crate::ship::{PointIndex, Ship, SpringIndex};
use crate::world::SimulationParameters;

/// Velocity given to a point torn out by the destroy tool (m/s).
const DESTROY_DETACH_SPEED: f32 = 2.0;

/// Springs cut by one saw stroke, split by material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SawOutcome {
    pub metal_springs: usize,
    pub non_metal_springs: usize,
}

impl SawOutcome {
    pub fn total(&self) -> usize {
        self.metal_springs + self.non_metal_springs
    }
}

impl Ship {
    fn is_destroyable(&self, p: PointIndex) -> bool {
        !self.points.is_ephemeral(p) && !self.points.is_detached(p)
    }

    /// Live springs properly crossed by the segment `start..end`.
    fn springs_crossed_by(&self, start: Vec2, end: Vec2) -> Vec<SpringIndex> {
        self.springs
            .indices()
            .filter(|&s| !self.springs.is_deleted(s))
            .filter(|&s| {
                let [a, b] = self.springs.endpoints(s);
                proper_intersection_test(start, end, self.points.position(a), self.points.position(b))
            })
            .collect()
    }

    /// Detach points around `position` with inverse-square probability.
    ///
    /// When the probabilistic pass detaches nothing, the nearest eligible point
    /// in range is detached anyway. Returns whether anything was detached.
    pub fn destroy_at(
        &mut self,
        position: Vec2,
        radius_multiplier: f32,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> bool {
        let radius = params.destroy_radius * radius_multiplier;
        let candidates: Vec<(PointIndex, f32)> = self
            .points_within(position, radius)
            .into_iter()
            .filter(|&(p, _)| self.is_destroyable(p))
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let mut detached = 0;
        for &(p, distance) in &candidates {
            if rng.uniform_bool(detach_probability(radius, distance)) {
                let direction = (self.points.position(p) - position).normalize_or_zero();
                if self.detach_point(p, direction * DESTROY_DETACH_SPEED, now, params, rng) {
                    detached += 1;
                }
            }
        }

        if detached == 0 {
            if let Some(&(p, _)) = candidates.iter().min_by(|a, b| a.1.total_cmp(&b.1)) {
                let direction = (self.points.position(p) - position).normalize_or_zero();
                if self.detach_point(p, direction * DESTROY_DETACH_SPEED, now, params, rng) {
                    detached += 1;
                }
            }
        }

        log::debug!("destroy at {:?}: {} point(s) detached", position, detached);
        self.refresh_connected_components();
        detached > 0
    }

    /// Cut every spring properly crossed by the stroke `start..end`.
    ///
    /// Each cut spring takes all of its triangles down with it. Metal cuts
    /// throw sparkles.
    pub fn saw_through(
        &mut self,
        start: Vec2,
        end: Vec2,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> SawOutcome {
        let mut outcome = SawOutcome::default();
        for s in self.springs_crossed_by(start, end) {
            let is_metal = self.materials.structural(self.springs.material(s)).is_metal;
            let [a, b] = self.springs.endpoints(s);
            let midpoint = (self.points.position(a) + self.points.position(b)) * 0.5;
            if !self.destroy_spring(s, TriangleDestroyPolicy::AllSuperTriangles) {
                continue;
            }
            if is_metal {
                outcome.metal_springs += 1;
                self.spawn_sparkles(midpoint, Vec2::ZERO, params.sparkles_per_cut, now, rng);
            } else {
                outcome.non_metal_springs += 1;
            }
        }

        if outcome.total() > 0 {
            log::debug!(
                "saw: {} metal, {} non-metal spring(s) cut",
                outcome.metal_springs,
                outcome.non_metal_springs
            );
            self.refresh_connected_components();
        }
        outcome
    }

    /// Cut springs crossed by the beam and heat points near it.
    ///
    /// A spring bounding two triangles survives with both; only a lone last
    /// triangle goes with its spring. Returns whether anything was cut or heated.
    pub fn apply_laser_cannon_through(
        &mut self,
        start: Vec2,
        end: Vec2,
        strength: f32,
        params: &SimulationParameters,
    ) -> bool {
        let mut cut = 0;
        for s in self.springs_crossed_by(start, end) {
            if self.destroy_spring(s, TriangleDestroyPolicy::OnlyLastSuperTriangle) {
                cut += 1;
            }
        }

        let radius = params.laser_radius;
        let (min, max) = segment_bounds(start, end, radius);
        let heat = params.laser_heat_flow * strength * params.simulation_step_duration;
        let mut heated = 0;
        for p in self.points.ship_points() {
            let position = self.points.position(p);
            if position.cmplt(min).any() || position.cmpgt(max).any() {
                continue;
            }
            let distance = point_to_segment_distance(position, start, end);
            if distance < radius {
                self.add_heat(p, heat * (1.0 - smooth_step(0.0, radius, distance)));
                heated += 1;
            }
        }

        if cut > 0 {
            self.refresh_connected_components();
        }
        if cut + heated > 0 {
            log::debug!("laser: {} spring(s) cut, {} point(s) heated", cut, heated);
        }
        cut + heated > 0
    }
}
