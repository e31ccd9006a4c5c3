//! Gripped Moves
//!
//! Moves and rotations applied with a radial falloff around one or more grips.
//! A point belongs to at most one grip per call: the nearest one, by center
//! distance, whose augmented radius contains it.

use glam::{Mat2, Vec2};

use crate::geometry::linear_step;
use crate::ship::{PointIndex, Ship};
use crate::world::SimulationParameters;

/// Extra width of the falloff band, as a fraction of the grip radius.
pub const GRIP_TRANSITION_WIDTH_FRACTION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrippedMove {
    pub center: Vec2,
    pub radius: f32,
    pub offset: Vec2,
    pub inertial_velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrippedRotation {
    pub center: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub inertial_angle: f32,
}

fn augmented_radius(radius: f32) -> f32 {
    radius * (1.0 + GRIP_TRANSITION_WIDTH_FRACTION)
}

/// Index of the grip owning `position` and the grip's strength there.
fn select_grip(position: Vec2, grips: impl Iterator<Item = (Vec2, f32)>) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32, f32)> = None;
    for (i, (center, radius)) in grips.enumerate() {
        let augmented = augmented_radius(radius);
        let distance = position.distance(center);
        if distance >= augmented {
            continue;
        }
        if best.is_none_or(|(_, d, _)| distance < d) {
            best = Some((i, distance, 1.0 - linear_step(0.0, augmented, distance)));
        }
    }
    best.map(|(i, _, strength)| (i, strength))
}

impl Ship {
    fn grip_strength(&self, p: PointIndex, strength: f32) -> f32 {
        if self.points.is_pinned(p) { 0.0 } else { strength }
    }

    /// Move points by their grip's offset scaled by the grip strength.
    ///
    /// Gripped points get forces receptivity `1 - strength`; all others get 1.
    pub fn move_gripped_by(&mut self, grips: &[GrippedMove], params: &SimulationParameters) {
        for p in self.points.ship_points() {
            let position = self.points.position(p);
            let Some((g, strength)) = select_grip(position, grips.iter().map(|g| (g.center, g.radius))) else {
                self.points.set_forces_receptivity(p, 1.0);
                continue;
            };
            let strength = self.grip_strength(p, strength);
            let grip = &grips[g];
            self.points.set_position(p, position + grip.offset * strength);
            self.points.set_velocity(p, grip.inertial_velocity * strength);
            self.points.set_forces_receptivity(p, 1.0 - strength);
        }
        self.trim_for_world_bounds(params);
    }

    /// Rotate points around their grip's center by the grip angle scaled by the
    /// grip strength.
    pub fn rotate_gripped_by(&mut self, grips: &[GrippedRotation], params: &SimulationParameters) {
        let dt = params.simulation_step_duration;
        for p in self.points.ship_points() {
            let position = self.points.position(p);
            let Some((g, strength)) = select_grip(position, grips.iter().map(|g| (g.center, g.radius))) else {
                self.points.set_forces_receptivity(p, 1.0);
                continue;
            };
            let strength = self.grip_strength(p, strength);
            let grip = &grips[g];
            let rotated = Mat2::from_angle(grip.angle * strength) * (position - grip.center);
            let inertial = Mat2::from_angle(grip.inertial_angle * strength) * rotated - rotated;
            self.points.set_position(p, grip.center + rotated);
            self.points.set_velocity(p, inertial / dt);
            self.points.set_forces_receptivity(p, 1.0 - strength);
        }
        self.trim_for_world_bounds(params);
    }

    /// Restore full forces receptivity everywhere.
    pub fn end_move_gripped_by(&mut self) {
        for p in self.points.all_points() {
            self.points.set_forces_receptivity(p, 1.0);
        }
    }
}
