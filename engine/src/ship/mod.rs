//! Ship Module
//!
//! The runtime mesh of one ship. A [`Ship`] exclusively owns its points, springs,
//! triangles, electrical elements and frontiers; the interaction tools in
//! [`crate::interaction`] are the only code that mutates them.
//!
//! # Submodules
//!
//! - [`index`] - Typed element indices and connected component ids
//! - [`points`] - Particle storage, including the ephemeral pool
//! - [`springs`] - Edge storage
//! - [`triangles`] - Surface storage
//! - [`electrical`] - Electrical element storage and wiring
//! - [`frontiers`] - Boundary loops
//! - [`connectivity`] - Connected component labelling
//! - [`ephemeral`] - Debris, sparkles and air bubbles
//! - [`topology`] - Transactional destruction of springs, triangles and points

pub mod connectivity;
pub mod electrical;
pub mod ephemeral;
pub mod frontiers;
pub mod index;
pub mod points;
pub mod springs;
pub mod topology;
pub mod triangles;

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;

pub use electrical::ElectricalElements;
pub use frontiers::{Frontier, FrontierKind, Frontiers};
pub use index::{ConnectedComponentId, ElectricalElementIndex, PointIndex, SpringIndex, TriangleIndex};
pub use points::{EphemeralType, PointSpec, Points};
pub use springs::{SpringSpec, Springs};
pub use triangles::{TriangleVertexIndices, Triangles};

use crate::error::ShipError;
use crate::interaction::QueuedInteraction;
use crate::material::{ElectricalElementKind, MaterialDatabase, StructuralMaterial};

/// Total mass and center of mass of the structural particles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MassAggregate {
    pub total_mass: f32,
    pub center_of_mass: Vec2,
}

pub struct Ship {
    pub(crate) materials: Arc<MaterialDatabase>,
    pub(crate) points: Points,
    pub(crate) springs: Springs,
    pub(crate) triangles: Triangles,
    pub(crate) electrical_elements: ElectricalElements,
    pub(crate) frontiers: Frontiers,
    pub(crate) queued_interactions: Vec<QueuedInteraction>,
    pub(crate) pinned_points: VecDeque<PointIndex>,
    pub(crate) mass_aggregate: MassAggregate,
    connected_component_count: usize,
}

impl Ship {
    /// Assemble a ship from fully populated containers.
    pub fn from_parts(
        materials: Arc<MaterialDatabase>,
        points: Points,
        springs: Springs,
        triangles: Triangles,
        electrical_elements: ElectricalElements,
        frontiers: Frontiers,
    ) -> Self {
        let mut ship = Self {
            materials,
            points,
            springs,
            triangles,
            electrical_elements,
            frontiers,
            queued_interactions: Vec::new(),
            pinned_points: VecDeque::new(),
            mass_aggregate: MassAggregate::default(),
            connected_component_count: 0,
        };
        ship.mass_aggregate = ship.compute_mass_aggregate();
        ship.refresh_connected_components();
        ship
    }

    pub fn points(&self) -> &Points {
        &self.points
    }

    pub fn springs(&self) -> &Springs {
        &self.springs
    }

    pub fn triangles(&self) -> &Triangles {
        &self.triangles
    }

    pub fn electrical_elements(&self) -> &ElectricalElements {
        &self.electrical_elements
    }

    pub fn frontiers(&self) -> &Frontiers {
        &self.frontiers
    }

    pub fn materials(&self) -> &MaterialDatabase {
        &self.materials
    }

    /// Mass aggregate computed at build time.
    pub fn mass_aggregate(&self) -> MassAggregate {
        self.mass_aggregate
    }

    pub fn connected_component_count(&self) -> usize {
        self.connected_component_count
    }

    pub fn queued_interaction_count(&self) -> usize {
        self.queued_interactions.len()
    }

    pub fn pinned_points(&self) -> impl Iterator<Item = PointIndex> + '_ {
        self.pinned_points.iter().copied()
    }

    pub(crate) fn point_material(&self, p: PointIndex) -> &StructuralMaterial {
        self.materials.structural(self.points.material(p))
    }

    fn compute_mass_aggregate(&self) -> MassAggregate {
        let mut total_mass = 0.0;
        let mut weighted = Vec2::ZERO;
        for p in self.points.ship_points() {
            let mass = self.points.mass(p);
            total_mass += mass;
            weighted += self.points.position(p) * mass;
        }
        MassAggregate {
            total_mass,
            center_of_mass: if total_mass > 0.0 { weighted / total_mass } else { Vec2::ZERO },
        }
    }

    /// Relabel connected components after springs were destroyed.
    pub fn refresh_connected_components(&mut self) {
        self.connected_component_count = connectivity::assign_connected_components(&mut self.points, &self.springs);
    }

    // ------------------------------------------------------------------
    // Checked accessors
    // ------------------------------------------------------------------

    fn check_point(&self, p: PointIndex) -> Result<(), ShipError> {
        if self.points.contains(p) {
            Ok(())
        } else {
            Err(ShipError::InvalidPointIndex {
                index: p.index(),
                count: self.points.len(),
            })
        }
    }

    fn check_element(&self, e: ElectricalElementIndex) -> Result<(), ShipError> {
        if self.electrical_elements.contains(e) {
            Ok(())
        } else {
            Err(ShipError::InvalidElectricalElementIndex {
                index: e.index(),
                count: self.electrical_elements.len(),
            })
        }
    }

    pub fn point_position(&self, p: PointIndex) -> Result<Vec2, ShipError> {
        self.check_point(p)?;
        Ok(self.points.position(p))
    }

    pub fn connected_component_of(&self, p: PointIndex) -> Result<ConnectedComponentId, ShipError> {
        self.check_point(p)?;
        Ok(self.points.connected_component(p))
    }

    pub fn spring_endpoints(&self, s: SpringIndex) -> Result<[PointIndex; 2], ShipError> {
        if !self.springs.contains(s) {
            return Err(ShipError::InvalidSpringIndex {
                index: s.index(),
                count: self.springs.len(),
            });
        }
        Ok(self.springs.endpoints(s))
    }

    /// Turn a switch on or off.
    pub fn set_switch_state(&mut self, e: ElectricalElementIndex, on: bool) -> Result<(), ShipError> {
        self.check_element(e)?;
        if self.electrical_elements.kind(e) != ElectricalElementKind::Switch {
            return Err(ShipError::NotASwitch { index: e.index() });
        }
        if self.electrical_elements.is_deleted(e) {
            return Err(ShipError::ElectricalElementDestroyed { index: e.index() });
        }
        self.electrical_elements.set_on(e, on);
        log::debug!("switch {:?} -> {}", e, if on { "on" } else { "off" });
        Ok(())
    }

    /// Flip a switch; returns the new state.
    pub fn toggle_switch(&mut self, e: ElectricalElementIndex) -> Result<bool, ShipError> {
        self.check_element(e)?;
        let new_state = !self.electrical_elements.is_on(e);
        self.set_switch_state(e, new_state)?;
        Ok(new_state)
    }
}
