//! Rigid Moves
//!
//! Translation and rotation of one connected component or of the whole ship,
//! followed by world bounds trimming.

use glam::{Mat2, Vec2};

use crate::ship::{ConnectedComponentId, Ship};
use crate::world::SimulationParameters;

impl Ship {
    /// Component of the point nearest `position` within the tool search radius.
    ///
    /// Components with at least one non-orphaned point win over orphans.
    pub fn pick_connected_component_to_move(
        &self,
        position: Vec2,
        params: &SimulationParameters,
    ) -> Option<ConnectedComponentId> {
        let mut best_any: Option<(f32, ConnectedComponentId)> = None;
        let mut best_connected: Option<(f32, ConnectedComponentId)> = None;

        for (p, distance) in self.points_within(position, params.tool_search_radius) {
            let component = self.points.connected_component(p);
            if component.is_none() {
                continue;
            }
            if best_any.is_none_or(|(d, _)| distance < d) {
                best_any = Some((distance, component));
            }
            if !self.points.is_orphaned(p) && best_connected.is_none_or(|(d, _)| distance < d) {
                best_connected = Some((distance, component));
            }
        }

        best_connected.or(best_any).map(|(_, component)| component)
    }

    /// Translate every point of `component` by `offset`.
    ///
    /// Forces are cleared and `inertial_velocity` becomes the velocity and water
    /// velocity of every moved point.
    pub fn move_by(
        &mut self,
        component: ConnectedComponentId,
        offset: Vec2,
        inertial_velocity: Vec2,
        params: &SimulationParameters,
    ) {
        for p in self.points.all_points() {
            if self.points.connected_component(p) != component {
                continue;
            }
            *self.points.position_mut(p) += offset;
            self.points.set_velocity(p, inertial_velocity);
            self.points.set_water_velocity(p, inertial_velocity);
            self.points.reset_forces(p);
        }
        self.trim_for_world_bounds(params);
    }

    /// Rotate every point of `component` by `angle` around `center`.
    ///
    /// The inertial velocity of each point is the displacement `inertial_angle`
    /// would cause over one simulation step.
    pub fn rotate_by(
        &mut self,
        component: ConnectedComponentId,
        angle: f32,
        center: Vec2,
        inertial_angle: f32,
        params: &SimulationParameters,
    ) {
        let rotation = Mat2::from_angle(angle);
        let inertial_rotation = Mat2::from_angle(inertial_angle);
        let dt = params.simulation_step_duration;

        for p in self.points.all_points() {
            if self.points.connected_component(p) != component {
                continue;
            }
            let arm = self.points.position(p) - center;
            let rotated = rotation * arm;
            let inertial_velocity = (inertial_rotation * rotated - rotated) / dt;
            self.points.set_position(p, center + rotated);
            self.points.set_velocity(p, inertial_velocity);
            self.points.set_water_velocity(p, inertial_velocity);
            self.points.reset_forces(p);
        }
        self.trim_for_world_bounds(params);
    }

    /// Translate the whole ship, ephemeral particles included.
    pub fn move_ship_by(&mut self, offset: Vec2, inertial_velocity: Vec2, params: &SimulationParameters) {
        {
            let (positions, velocities, water_velocities) = self.points.kinematics_mut();
            for position in positions.iter_mut() {
                *position += offset;
            }
            velocities.fill(inertial_velocity);
            water_velocities.fill(inertial_velocity);
        }
        let (static_forces, dynamic_forces) = self.points.forces_mut();
        static_forces.fill(Vec2::ZERO);
        dynamic_forces.fill(Vec2::ZERO);

        self.trim_for_world_bounds(params);
    }

    /// Rotate the whole ship around `center`, ephemeral particles included.
    pub fn rotate_ship_by(&mut self, angle: f32, center: Vec2, inertial_angle: f32, params: &SimulationParameters) {
        let rotation = Mat2::from_angle(angle);
        let inertial_rotation = Mat2::from_angle(inertial_angle);
        let dt = params.simulation_step_duration;

        {
            let (positions, velocities, water_velocities) = self.points.kinematics_mut();
            for ((position, velocity), water_velocity) in
                positions.iter_mut().zip(velocities.iter_mut()).zip(water_velocities.iter_mut())
            {
                let rotated = rotation * (*position - center);
                *position = center + rotated;
                *velocity = (inertial_rotation * rotated - rotated) / dt;
                *water_velocity = *velocity;
            }
        }
        let (static_forces, dynamic_forces) = self.points.forces_mut();
        static_forces.fill(Vec2::ZERO);
        dynamic_forces.fill(Vec2::ZERO);

        self.trim_for_world_bounds(params);
    }

    /// Clamp every particle into the world rectangle, cancelling outward
    /// velocity. Returns the number of particles trimmed.
    pub fn trim_for_world_bounds(&mut self, params: &SimulationParameters) -> usize {
        let bounds = params.world_bounds();
        let (positions, velocities, _) = self.points.kinematics_mut();
        let mut trimmed = 0;
        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            if bounds.trim(position, velocity) {
                trimmed += 1;
            }
        }
        if trimmed > 0 {
            log::trace!("trimmed {} particles to world bounds", trimmed);
        }
        trimmed
    }
}
