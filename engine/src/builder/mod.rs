//! Ship Builder
//!
//! Converts raster ship layers into a runtime [`Ship`]. The pipeline is strictly
//! sequential and operates on an intermediate [`BuildModel`]:
//!
//! 1. Rope endpoint extraction
//! 2. Point, spring and triangle derivation (rope endpoints injected, ropes chained)
//! 3. Electrical decoration
//! 4. Redundant triangle filtering
//! 5. Spring–triangle cross-linking
//! 6. Reordering for memory locality
//! 7. Frontier detection
//! 8. Container emission
//!
//! Any layer violation aborts the build; no partial ship is ever returned.
//!
//! # Submodules
//!
//! - [`layers`] - Raster layers and the ship definition
//! - [`model`] - Intermediate build model
//! - [`derive`] - Stages 1-3
//! - [`filter`] - Stages 4-5
//! - [`reorder`] / [`vertex_cache`] - Stage 6
//! - [`frontier`] - Stage 7
//! - [`emit`] - Stage 8

pub mod derive;
pub mod emit;
pub mod filter;
pub mod frontier;
pub mod layers;
pub mod model;
pub mod reorder;
pub mod vertex_cache;

use std::sync::Arc;

pub use frontier::BuildFrontier;
pub use layers::{RasterLayer, ShipDefinition};
pub use model::BuildModel;
pub use reorder::{OrderingStrategy, ReorderReport};
pub use vertex_cache::CacheMetrics;

use crate::error::BuildResult;
use crate::material::MaterialDatabase;
use crate::ship::Ship;
use crate::world::SimulationParameters;

/// Statistics of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub point_count: usize,
    pub spring_count: usize,
    pub triangle_count: usize,
    pub electrical_element_count: usize,
    pub filtered_triangle_count: usize,
    pub frontier_count: usize,
    pub ordering: Option<ReorderReport>,
}

/// Output of stages 1-7.
#[derive(Debug, Clone)]
pub struct FinishedModel {
    pub model: BuildModel,
    pub frontiers: Vec<BuildFrontier>,
    pub filtered_triangle_count: usize,
    pub ordering: Option<ReorderReport>,
}

/// Builds ships against one material database and parameter set.
pub struct ShipBuilder {
    materials: Arc<MaterialDatabase>,
    params: SimulationParameters,
}

impl ShipBuilder {
    pub fn new(materials: Arc<MaterialDatabase>, params: SimulationParameters) -> Self {
        Self { materials, params }
    }

    pub fn materials(&self) -> &Arc<MaterialDatabase> {
        &self.materials
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Run stages 1-7 and return the finished model with its frontiers.
    pub fn build_model(&self, definition: &ShipDefinition) -> BuildResult<FinishedModel> {
        definition.validate_sizes()?;
        let structural = &definition.structural;
        let materials = &*self.materials;

        let segments = match &definition.ropes {
            Some(ropes) => derive::extract_rope_segments(ropes)?,
            None => Vec::new(),
        };
        log::debug!("{}: {} rope(s)", definition.name, segments.len());

        let mut model = BuildModel::new(structural.width(), structural.height());
        derive::derive_points(&mut model, structural, materials)?;
        derive::inject_rope_endpoints(&mut model, &segments, materials);
        derive::derive_springs(&mut model);
        derive::derive_triangles(&mut model);
        derive::materialize_ropes(&mut model, &segments, materials);
        log::debug!(
            "{}: derived {} points, {} springs, {} triangles",
            definition.name,
            model.points.len(),
            model.springs.len(),
            model.triangles.len()
        );

        if let Some(electrical) = &definition.electrical {
            derive::decorate_electrical(&mut model, electrical, materials)?;
        }

        let filtered = filter::filter_redundant_triangles(&mut model);
        if filtered > 0 {
            log::debug!("{}: filtered {} redundant triangles", definition.name, filtered);
        }
        filter::cross_link(&mut model);

        let ordering = reorder::reorder(&mut model, &self.params.ordering_strategies);
        let frontiers = frontier::compute_frontiers(&model);
        Ok(FinishedModel {
            model,
            frontiers,
            filtered_triangle_count: filtered,
            ordering,
        })
    }

    pub fn build(&self, definition: &ShipDefinition) -> BuildResult<(Ship, BuildReport)> {
        let finished = self.build_model(definition).inspect_err(|e| {
            log::warn!("{}: build failed: {}", definition.name, e);
        })?;

        let ship = emit::emit_ship(&finished.model, &finished.frontiers, Arc::clone(&self.materials), &self.params);
        let report = BuildReport {
            point_count: ship.points().ship_point_count(),
            spring_count: ship.springs().len(),
            triangle_count: ship.triangles().len(),
            electrical_element_count: ship.electrical_elements().len(),
            filtered_triangle_count: finished.filtered_triangle_count,
            frontier_count: finished.frontiers.len(),
            ordering: finished.ordering,
        };
        log::info!(
            "{}: built {} points, {} springs, {} triangles, {} electrical elements, {} frontiers (ordering {:?})",
            definition.name,
            report.point_count,
            report.spring_count,
            report.triangle_count,
            report.electrical_element_count,
            report.frontier_count,
            report.ordering.as_ref().map(|o| o.chosen)
        );
        Ok((ship, report))
    }
}

/// Build a ship in one call.
pub fn build_ship(
    definition: &ShipDefinition,
    materials: Arc<MaterialDatabase>,
    params: &SimulationParameters,
) -> BuildResult<Ship> {
    ShipBuilder::new(materials, params.clone())
        .build(definition)
        .map(|(ship, _)| ship)
}
