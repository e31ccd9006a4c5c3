//! Queued Interactions
//!
//! Pull, blast, draw and swirl are recorded when the tool fires and applied
//! exactly once, in enqueue order, by [`Ship::apply_queued_interactions`]
//! during the mechanical step. The queue is empty afterwards.

use glam::Vec2;

use super::QueuedInteraction;
use crate::geometry::smooth_step;
use crate::ship::{PointIndex, Ship};
use crate::world::SimulationParameters;

impl Ship {
    /// Queue a Hookean pull of `point` towards `target`.
    pub fn pull(&mut self, point: PointIndex, target: Vec2, strength: f32) {
        self.queued_interactions
            .push(QueuedInteraction::Pull { point, target, strength });
    }

    /// Queue a radial blast.
    pub fn apply_blast_at(
        &mut self,
        center: Vec2,
        radius_multiplier: f32,
        force_multiplier: f32,
        params: &SimulationParameters,
    ) {
        self.queued_interactions.push(QueuedInteraction::Blast {
            center,
            radius: params.blast_radius * radius_multiplier,
            force: params.blast_force * force_multiplier,
        });
    }

    /// Queue an attraction towards `center`.
    pub fn draw_to(&mut self, center: Vec2, strength: f32) {
        self.queued_interactions
            .push(QueuedInteraction::Draw { center, strength });
    }

    /// Queue a swirl around `center`; positive strength turns counter-clockwise.
    pub fn swirl_at(&mut self, center: Vec2, strength: f32) {
        self.queued_interactions
            .push(QueuedInteraction::Swirl { center, strength });
    }

    /// Apply and clear every queued interaction. Returns how many were applied.
    pub fn apply_queued_interactions(&mut self, params: &SimulationParameters) -> usize {
        let queue = std::mem::take(&mut self.queued_interactions);
        for interaction in &queue {
            match *interaction {
                QueuedInteraction::Pull { point, target, strength } => self.apply_pull(point, target, strength, params),
                QueuedInteraction::Blast { center, radius, force } => self.apply_blast(center, radius, force),
                QueuedInteraction::Draw { center, strength } => self.apply_draw(center, strength, params),
                QueuedInteraction::Swirl { center, strength } => self.apply_swirl(center, strength, params),
            }
        }
        queue.len()
    }

    /// Pull stiffness for a point of mass `mass`.
    ///
    /// Over `n` mechanical iterations of length `dt`, a force `k * x` moves the
    /// point by `k * x * dt² * n(n+1) / 2m`, so this stiffness reaches exactly
    /// `strength * x` and never overshoots for `strength <= 1`.
    pub fn pull_stiffness(mass: f32, strength: f32, params: &SimulationParameters) -> f32 {
        let n = params.num_mechanical_dynamics_iterations.max(1) as f32;
        let dt = params.mechanical_dt();
        strength * 2.0 * mass / (dt * dt * n * (n + 1.0))
    }

    fn apply_pull(&mut self, p: PointIndex, target: Vec2, strength: f32, params: &SimulationParameters) {
        if !self.points.contains(p) || self.points.is_ephemeral(p) {
            return;
        }
        let extension = target - self.points.position(p);
        let k = Self::pull_stiffness(self.points.mass(p), strength.clamp(0.0, 1.0), params);
        self.points.add_static_force(p, extension * k);
        self.points.set_velocity(p, Vec2::ZERO);
    }

    fn apply_blast(&mut self, center: Vec2, radius: f32, force: f32) {
        for (p, distance) in self.points_within(center, radius) {
            let direction = (self.points.position(p) - center).normalize_or_zero();
            let falloff = 1.0 - smooth_step(0.0, radius, distance);
            self.points.add_static_force(p, direction * force * falloff);
        }
    }

    fn apply_draw(&mut self, center: Vec2, strength: f32, params: &SimulationParameters) {
        let radius = params.draw_swirl_radius;
        for (p, distance) in self.points_within(center, radius) {
            let direction = (center - self.points.position(p)).normalize_or_zero();
            let falloff = 1.0 - smooth_step(0.0, radius, distance);
            let force = direction * self.points.mass(p) * params.draw_acceleration * strength * falloff;
            self.points.add_static_force(p, force);
        }
    }

    fn apply_swirl(&mut self, center: Vec2, strength: f32, params: &SimulationParameters) {
        let radius = params.draw_swirl_radius;
        for (p, distance) in self.points_within(center, radius) {
            let tangent = (self.points.position(p) - center).normalize_or_zero().perp();
            let falloff = 1.0 - smooth_step(0.0, radius, distance);
            let force = tangent * self.points.mass(p) * params.swirl_acceleration * strength * falloff;
            self.points.add_static_force(p, force);
        }
    }
}
