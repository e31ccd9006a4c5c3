//! Interaction Engine
//!
//! Tool-driven mutations of a built [`Ship`]. Every operation is an `impl Ship`
//! method that takes its explicit arguments plus the [`SimulationParameters`],
//! a [`GameRandom`](crate::random::GameRandom) when it is probabilistic and an
//! [`OceanSurface`](crate::world::OceanSurface) when the water level matters.
//!
//! Interactions never fail: finding nothing eligible is a normal outcome and is
//! reported as `false`, `None` or a zero count. Spatial queries are brute-force
//! scans over the live points.
//!
//! # Submodules
//!
//! - [`move_rotate`] - Rigid component and whole-ship moves, world bounds trimming
//! - [`grip`] - Gripped moves with radial falloff
//! - [`destroy`] - Destroy, saw and laser tools
//! - [`field`] - Heat blaster and fire extinguisher
//! - [`queued`] - Pull, blast, draw and swirl, applied once per mechanical step
//! - [`pressure`] - Pressure injection and flooding
//! - [`lightning`] - Lightning targeting and strikes
//! - [`decay`] - Scrub and rot brushes
//! - [`thanos`] - Band-wise probabilistic disintegration
//! - [`pin`] - Point pinning

pub mod decay;
pub mod destroy;
pub mod field;
pub mod grip;
pub mod lightning;
pub mod move_rotate;
pub mod pin;
pub mod pressure;
pub mod queued;
pub mod thanos;

use glam::Vec2;

pub use destroy::SawOutcome;
pub use field::HeatBlasterAction;
pub use grip::{GrippedMove, GrippedRotation};
pub use pin::MAX_PINNED_POINTS;

use crate::ship::{PointIndex, Ship};
use crate::world::TEMPERATURE_FLOOR;

/// Tool-originated force recorded for a single application during the next
/// mechanical step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueuedInteraction {
    /// Hookean pull of one point towards a target
    Pull { point: PointIndex, target: Vec2, strength: f32 },
    /// Radial push away from a center
    Blast { center: Vec2, radius: f32, force: f32 },
    /// Attraction towards a center
    Draw { center: Vec2, strength: f32 },
    /// Tangential force around a center
    Swirl { center: Vec2, strength: f32 },
}

/// Probability of a tool detaching a point at distance `distance` from the
/// center of a tool with radius `radius`.
pub(crate) fn detach_probability(radius: f32, distance: f32) -> f32 {
    let d2 = distance * distance;
    if d2 <= f32::EPSILON {
        return 1.0;
    }
    (0.1 * radius * radius / d2).min(1.0)
}

impl Ship {
    /// Structural points within `radius` of `center`, with their distances.
    pub(crate) fn points_within(&self, center: Vec2, radius: f32) -> Vec<(PointIndex, f32)> {
        let radius_squared = radius * radius;
        self.points
            .ship_points()
            .filter_map(|p| {
                let d2 = self.points.position(p).distance_squared(center);
                (d2 < radius_squared).then(|| (p, d2.sqrt()))
            })
            .collect()
    }

    /// Nearest structural point within `radius`, if any.
    pub fn nearest_point_at(&self, position: Vec2, radius: f32) -> Option<PointIndex> {
        self.points_within(position, radius)
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    /// Add (or with a negative value, remove) `heat` kJ to a point.
    pub(crate) fn add_heat(&mut self, p: PointIndex, heat: f32) {
        let heat_capacity = self.points.mass(p) * self.point_material(p).specific_heat;
        if heat_capacity <= 0.0 {
            return;
        }
        let temperature = self.points.temperature(p) + heat * 1000.0 / heat_capacity;
        self.points.set_temperature(p, temperature.max(TEMPERATURE_FLOOR));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::builder::{build_ship, RasterLayer, ShipDefinition};
    use crate::material::palette::{self, STEEL_COLOR};
    use crate::material::ColorKey;
    use crate::ship::Ship;
    use crate::world::SimulationParameters;

    pub fn params() -> SimulationParameters {
        SimulationParameters {
            max_ephemeral_particles: 16,
            ..Default::default()
        }
    }

    pub fn ship_from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> ColorKey) -> Ship {
        let definition = ShipDefinition::new("test", RasterLayer::from_fn(width, height, f));
        build_ship(&definition, Arc::new(palette::default_database()), &params()).unwrap()
    }

    pub fn solid_ship(width: u32, height: u32) -> Ship {
        ship_from_fn(width, height, |_, _| STEEL_COLOR)
    }
}
