//! Simulation Parameters
//!
//! Centralized, tunable parameters read by the builder and by every tool.
//! `Default` holds the tuned values; a JSON file may override any subset.

use serde::{Deserialize, Serialize};

use super::bounds::WorldBounds;
use super::REFERENCE_TEMPERATURE;
use crate::builder::OrderingStrategy;
use crate::error::ConfigError;

/// Global simulation parameters.
///
/// Radii are in meters, heat flows in kW, forces in N, pressures in Pa.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationParameters {
    /// Half of the world width (world spans `-w..w`)
    pub half_max_world_width: f32,
    /// Half of the world height (world spans `-h..h`)
    pub half_max_world_height: f32,

    /// Duration of one simulation step (s)
    pub simulation_step_duration: f32,
    /// Mechanical sub-iterations per simulation step
    pub num_mechanical_dynamics_iterations: u32,

    /// Scales every particle's mass
    pub mass_adjustment: f32,
    /// Scales spring stiffness coefficients
    pub spring_stiffness_adjustment: f32,
    /// Scales spring damping coefficients
    pub spring_damping_adjustment: f32,
    /// Temperature of freshly built particles (K)
    pub initial_temperature: f32,

    /// Radius for picking points and components
    pub tool_search_radius: f32,
    /// Base radius of the destroy tool
    pub destroy_radius: f32,
    /// Base radius of the blast tool
    pub blast_radius: f32,
    /// Peak radial force of the blast tool
    pub blast_force: f32,
    /// Acceleration imparted by the draw tool (m/s²)
    pub draw_acceleration: f32,
    /// Acceleration imparted by the swirl tool (m/s²)
    pub swirl_acceleration: f32,
    /// Radius of the draw and swirl tools
    pub draw_swirl_radius: f32,
    /// Radius of the heat blaster
    pub heat_blaster_radius: f32,
    /// Heat flow of the heat blaster (kW)
    pub heat_blaster_heat_flow: f32,
    /// Radius of the fire extinguisher
    pub extinguish_radius: f32,
    /// Heat removed by the fire extinguisher (kW)
    pub extinguish_heat_removal: f32,
    /// Radius of the laser cannon beam
    pub laser_radius: f32,
    /// Heat flow of the laser cannon (kW)
    pub laser_heat_flow: f32,
    /// Radius of the scrub and rot brushes
    pub scrub_rot_radius: f32,
    /// Search radius for pressure injection targets
    pub inject_pressure_search_radius: f32,
    /// Pressure injected per application (Pa)
    pub inject_pressure_quantity: f32,
    /// Radius of the flood hose
    pub flood_radius: f32,
    /// Water added or removed per application (m³)
    pub flood_quantity: f32,
    /// Radius of guaranteed-heat-but-possible-destruction around a lightning strike
    pub lightning_destroy_radius: f32,
    /// Radius of heat injection around a lightning strike
    pub lightning_search_radius: f32,
    /// Heat delivered at the center of a lightning strike (kJ)
    pub lightning_heat: f32,
    /// Per-call detach probability of the snap tool
    pub thanos_snap_probability: f32,

    /// Ephemeral particle slots appended after the structural points
    pub max_ephemeral_particles: usize,
    /// Debris particles spawned per detached point
    pub debris_per_detached_point: usize,
    /// Sparkles spawned per metal spring cut
    pub sparkles_per_cut: usize,

    /// Element orderings tried by the builder, best ACMR wins
    pub ordering_strategies: Vec<OrderingStrategy>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let bounds = WorldBounds::default();
        Self {
            half_max_world_width: bounds.half_width,
            half_max_world_height: bounds.half_height,
            simulation_step_duration: 1.0 / 64.0,
            num_mechanical_dynamics_iterations: 24,
            mass_adjustment: 1.0,
            spring_stiffness_adjustment: 1.0,
            spring_damping_adjustment: 1.0,
            initial_temperature: REFERENCE_TEMPERATURE,
            tool_search_radius: 2.0,
            destroy_radius: 0.75,
            blast_radius: 5.0,
            blast_force: 250_000.0,
            draw_acceleration: 60.0,
            swirl_acceleration: 40.0,
            draw_swirl_radius: 10.0,
            heat_blaster_radius: 8.0,
            heat_blaster_heat_flow: 2000.0,
            extinguish_radius: 5.0,
            extinguish_heat_removal: 4000.0,
            laser_radius: 1.5,
            laser_heat_flow: 8000.0,
            scrub_rot_radius: 5.0,
            inject_pressure_search_radius: 0.5,
            inject_pressure_quantity: 101_325.0,
            flood_radius: 0.75,
            flood_quantity: 0.25,
            lightning_destroy_radius: 3.0,
            lightning_search_radius: 8.0,
            lightning_heat: 60_000.0,
            thanos_snap_probability: 0.07,
            max_ephemeral_particles: 512,
            debris_per_detached_point: 2,
            sparkles_per_cut: 3,
            ordering_strategies: OrderingStrategy::all().to_vec(),
        }
    }
}

impl SimulationParameters {
    /// Parse parameters from JSON; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(self.half_max_world_width, self.half_max_world_height)
    }

    /// Duration of one mechanical sub-iteration (s).
    pub fn mechanical_dt(&self) -> f32 {
        self.simulation_step_duration / self.num_mechanical_dynamics_iterations.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params = SimulationParameters::from_json_str(
            r#"{ "destroy_radius": 2.5, "num_mechanical_dynamics_iterations": 10 }"#,
        )
        .unwrap();
        assert_eq!(params.destroy_radius, 2.5);
        assert_eq!(params.num_mechanical_dynamics_iterations, 10);
        assert_eq!(params.blast_radius, SimulationParameters::default().blast_radius);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimulationParameters::from_json_str("{ destroy_radius: ").is_err());
    }

    #[test]
    fn mechanical_dt_divides_step() {
        let params = SimulationParameters {
            simulation_step_duration: 0.5,
            num_mechanical_dynamics_iterations: 5,
            ..Default::default()
        };
        assert!((params.mechanical_dt() - 0.1).abs() < 1e-6);
    }
}
