//! Materials
//!
//! Structural and electrical materials, keyed by the color used to paint them in
//! ship layer images. Materials are read-only once loaded and shared by every
//! ship built from the same database.
//!
//! Different structural materials differ in:
//! - Density (mass of a one-meter particle)
//! - Strength and stiffness (spring behavior)
//! - Thermal properties (specific heat, ignition)
//! - Hull/rope/metal classification used by the tools

pub mod palette;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A 24-bit RGB color used as a material key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorKey(pub [u8; 3]);

impl ColorKey {
    /// Pixels of this color are empty in every layer.
    pub const EMPTY: ColorKey = ColorKey([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Index of a structural material inside its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralMaterialId(pub u16);

/// Index of an electrical material inside its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElectricalMaterialId(pub u16);

/// Physical properties of a structural material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuralMaterial {
    pub name: String,
    pub color: ColorKey,
    /// Mass of one cubic meter (kg)
    pub density: f32,
    /// Relative spring strength (breaking threshold multiplier)
    pub strength: f32,
    /// Relative spring stiffness
    pub stiffness: f32,
    /// Specific heat (J/(kg·K))
    pub specific_heat: f32,
    /// Temperature at which the material starts burning (K)
    pub ignition_temperature: f32,
    /// Hull particles are watertight
    #[serde(default)]
    pub is_hull: bool,
    #[serde(default)]
    pub is_rope: bool,
    /// Drives the metal/non-metal bucket of cutting tools
    #[serde(default)]
    pub is_metal: bool,
}

impl StructuralMaterial {
    /// Mass of a particle covering `area` square meters (one meter deep).
    pub fn mass_for_area(&self, area: f32) -> f32 {
        self.density * area
    }
}

/// Kinds of electrical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectricalElementKind {
    Cable,
    Lamp,
    Switch,
    Generator,
    Engine,
    Pump,
    Probe,
}

impl ElectricalElementKind {
    /// Instanced elements are individually addressable by the tool layer.
    pub fn is_instanced(self) -> bool {
        matches!(
            self,
            ElectricalElementKind::Switch
                | ElectricalElementKind::Engine
                | ElectricalElementKind::Probe
        )
    }

    /// Power state of a freshly built element.
    pub fn initial_state(self) -> bool {
        match self {
            ElectricalElementKind::Generator | ElectricalElementKind::Cable => true,
            ElectricalElementKind::Lamp
            | ElectricalElementKind::Switch
            | ElectricalElementKind::Engine
            | ElectricalElementKind::Pump
            | ElectricalElementKind::Probe => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElectricalMaterial {
    pub name: String,
    pub color: ColorKey,
    pub kind: ElectricalElementKind,
}

/// On-disk shape of a material database.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MaterialDatabaseFile {
    structural: Vec<StructuralMaterial>,
    #[serde(default)]
    electrical: Vec<ElectricalMaterial>,
    /// Name of the structural material used for rope layer particles
    rope_material: String,
}

/// All materials known to the builder, indexed by color.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    structural: Vec<StructuralMaterial>,
    electrical: Vec<ElectricalMaterial>,
    structural_by_color: HashMap<ColorKey, StructuralMaterialId>,
    electrical_by_color: HashMap<ColorKey, ElectricalMaterialId>,
    rope_material: StructuralMaterialId,
}

impl MaterialDatabase {
    /// Build a database; `rope_material` names the material for rope-layer particles.
    ///
    /// Falls back to the first material flagged as rope when the name is unknown,
    /// and fails when there is none.
    pub fn new(
        structural: Vec<StructuralMaterial>,
        electrical: Vec<ElectricalMaterial>,
        rope_material: &str,
    ) -> Result<Self, ConfigError> {
        let mut structural_by_color = HashMap::with_capacity(structural.len());
        for (i, material) in structural.iter().enumerate() {
            if structural_by_color
                .insert(material.color, StructuralMaterialId(i as u16))
                .is_some()
            {
                return Err(ConfigError::DuplicateColor(material.color.to_string()));
            }
        }

        let mut electrical_by_color = HashMap::with_capacity(electrical.len());
        for (i, material) in electrical.iter().enumerate() {
            if electrical_by_color
                .insert(material.color, ElectricalMaterialId(i as u16))
                .is_some()
            {
                return Err(ConfigError::DuplicateColor(material.color.to_string()));
            }
        }

        let rope_index = structural
            .iter()
            .position(|m| m.name == rope_material)
            .or_else(|| structural.iter().position(|m| m.is_rope))
            .ok_or_else(|| ConfigError::MissingRopeMaterial(rope_material.to_string()))?;

        Ok(Self {
            structural,
            electrical,
            structural_by_color,
            electrical_by_color,
            rope_material: StructuralMaterialId(rope_index as u16),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: MaterialDatabaseFile = serde_json::from_str(json)?;
        Self::new(file.structural, file.electrical, &file.rope_material)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn structural(&self, id: StructuralMaterialId) -> &StructuralMaterial {
        &self.structural[id.0 as usize]
    }

    pub fn electrical(&self, id: ElectricalMaterialId) -> &ElectricalMaterial {
        &self.electrical[id.0 as usize]
    }

    pub fn find_structural(&self, color: ColorKey) -> Option<StructuralMaterialId> {
        self.structural_by_color.get(&color).copied()
    }

    pub fn find_electrical(&self, color: ColorKey) -> Option<ElectricalMaterialId> {
        self.electrical_by_color.get(&color).copied()
    }

    pub fn rope_material(&self) -> StructuralMaterialId {
        self.rope_material
    }

    pub fn structural_count(&self) -> usize {
        self.structural.len()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        palette::default_database()
    }
}
