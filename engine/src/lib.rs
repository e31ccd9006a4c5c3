//! Wreckyard Engine Library
//!
//! Destructible soft-body ships: particles joined by springs, grouped into
//! triangles and wired into an electrical network. The [`builder`] turns raster
//! ship layers into a cache-friendly [`Ship`]; the [`interaction`] tools cut,
//! blast, heat, pull and flood it afterwards.
//!
//! # Modules
//!
//! - [`builder`] - Raster layers to optimized ship mesh
//! - [`ship`] - Runtime mesh containers and topology maintenance
//! - [`interaction`] - Tool-driven mutations and queued forces
//! - [`material`] - Structural and electrical material database
//! - [`geometry`] - Shared 2D helpers
//! - [`world`] - World bounds, ocean surface and simulation parameters
//! - [`random`] - Seedable random engine for probabilistic tools
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wreckyard_engine::builder::{RasterLayer, ShipBuilder, ShipDefinition};
//! use wreckyard_engine::material::palette;
//! use wreckyard_engine::{GameRandom, SimulationParameters};
//!
//! let structure = RasterLayer::load_png("ship.png".as_ref())?;
//! let definition = ShipDefinition::new("Tug", structure);
//!
//! let builder = ShipBuilder::new(Arc::new(palette::default_database()), SimulationParameters::default());
//! let (mut ship, report) = builder.build(&definition)?;
//! if let Some(metrics) = report.ordering.as_ref().and_then(|o| o.chosen_metrics()) {
//!     println!("{} points, ACMR {:.3}", report.point_count, metrics.acmr);
//! }
//!
//! let mut rng = GameRandom::from_seed(42);
//! ship.destroy_at(glam::Vec2::new(0.0, 2.0), 1.0, 0.0, builder.params(), &mut rng);
//! ```

pub mod builder;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod material;
pub mod random;
pub mod ship;
pub mod world;

pub use builder::{build_ship, BuildReport, OrderingStrategy, RasterLayer, ShipBuilder, ShipDefinition};
pub use error::{BuildError, BuildResult, ConfigError, ShipError};
pub use material::{ColorKey, MaterialDatabase};
pub use random::GameRandom;
pub use ship::{PointIndex, Ship, SpringIndex, TriangleIndex};
pub use world::{FlatOcean, OceanSurface, SimulationParameters};
