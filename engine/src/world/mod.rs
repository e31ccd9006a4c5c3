//! World Module
//!
//! World-space configuration shared by the builder and the interaction tools.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, one structural pixel is one meter wide.
//!
//! - Temperatures in Kelvin
//! - Pressures in Pascal
//! - Water quantities in m³ (one particle holds at most about one cubic meter)
//!
//! # Submodules
//!
//! - [`bounds`] - World rectangle and position trimming
//! - [`ocean`] - Ocean surface collaborator
//! - [`params`] - Tunable simulation parameters

pub mod bounds;
pub mod ocean;
pub mod params;

pub use bounds::WorldBounds;
pub use ocean::{FlatOcean, OceanSurface};
pub use params::SimulationParameters;

/// Lowest temperature any particle may reach (K).
pub const TEMPERATURE_FLOOR: f32 = 0.1;

/// Sea-level air pressure (Pa).
pub const AIR_PRESSURE_AT_SEA_LEVEL: f32 = 101_325.0;

/// Reference temperature for gas-law pressure deltas (K).
pub const REFERENCE_TEMPERATURE: f32 = 298.15;
