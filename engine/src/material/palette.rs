//! Built-in Material Palette
//!
//! The default database used when no material file is supplied.
//! Indices: 0=Iron Hull, 1=Steel, 2=Wood, 3=Glass, 4=Rubber, 5=Rope

use super::{
    ColorKey, ElectricalElementKind, ElectricalMaterial, MaterialDatabase, StructuralMaterial,
};

pub const IRON_HULL_COLOR: ColorKey = ColorKey::new(64, 64, 72);
pub const STEEL_COLOR: ColorKey = ColorKey::new(128, 128, 153);
pub const WOOD_COLOR: ColorKey = ColorKey::new(176, 124, 70);
pub const GLASS_COLOR: ColorKey = ColorKey::new(180, 220, 230);
pub const RUBBER_COLOR: ColorKey = ColorKey::new(40, 40, 40);
pub const ROPE_COLOR: ColorKey = ColorKey::new(204, 179, 128);

pub const CABLE_COLOR: ColorKey = ColorKey::new(0, 100, 0);
pub const LAMP_COLOR: ColorKey = ColorKey::new(255, 255, 0);
pub const SWITCH_COLOR: ColorKey = ColorKey::new(255, 0, 0);
pub const GENERATOR_COLOR: ColorKey = ColorKey::new(0, 0, 255);
pub const ENGINE_COLOR: ColorKey = ColorKey::new(255, 128, 0);
pub const PUMP_COLOR: ColorKey = ColorKey::new(0, 200, 200);
pub const PROBE_COLOR: ColorKey = ColorKey::new(200, 0, 200);

pub const ROPE_MATERIAL_NAME: &str = "Rope";

fn structural(
    name: &str,
    color: ColorKey,
    density: f32,
    strength: f32,
    stiffness: f32,
    specific_heat: f32,
    ignition_temperature: f32,
) -> StructuralMaterial {
    StructuralMaterial {
        name: name.to_string(),
        color,
        density,
        strength,
        stiffness,
        specific_heat,
        ignition_temperature,
        is_hull: false,
        is_rope: false,
        is_metal: false,
    }
}

pub fn default_structural_materials() -> Vec<StructuralMaterial> {
    vec![
        // 0: Iron Hull
        StructuralMaterial {
            is_hull: true,
            is_metal: true,
            ..structural("Iron Hull", IRON_HULL_COLOR, 7800.0, 1.0, 1.0, 450.0, 1800.0)
        },
        // 1: Steel
        StructuralMaterial {
            is_metal: true,
            ..structural("Steel", STEEL_COLOR, 7850.0, 1.2, 1.0, 490.0, 1700.0)
        },
        // 2: Wood
        structural("Wood", WOOD_COLOR, 600.0, 0.4, 0.6, 2000.0, 573.0),
        // 3: Glass
        structural("Glass", GLASS_COLOR, 2500.0, 0.15, 0.9, 840.0, 1900.0),
        // 4: Rubber
        StructuralMaterial {
            is_hull: true,
            ..structural("Rubber", RUBBER_COLOR, 1100.0, 0.5, 0.2, 2000.0, 570.0)
        },
        // 5: Rope
        StructuralMaterial {
            is_rope: true,
            ..structural(ROPE_MATERIAL_NAME, ROPE_COLOR, 400.0, 0.3, 0.25, 1500.0, 530.0)
        },
    ]
}

pub fn default_electrical_materials() -> Vec<ElectricalMaterial> {
    [
        ("Cable", CABLE_COLOR, ElectricalElementKind::Cable),
        ("Lamp", LAMP_COLOR, ElectricalElementKind::Lamp),
        ("Switch", SWITCH_COLOR, ElectricalElementKind::Switch),
        ("Generator", GENERATOR_COLOR, ElectricalElementKind::Generator),
        ("Engine", ENGINE_COLOR, ElectricalElementKind::Engine),
        ("Pump", PUMP_COLOR, ElectricalElementKind::Pump),
        ("Probe", PROBE_COLOR, ElectricalElementKind::Probe),
    ]
    .into_iter()
    .map(|(name, color, kind)| ElectricalMaterial {
        name: name.to_string(),
        color,
        kind,
    })
    .collect()
}

pub fn default_database() -> MaterialDatabase {
    // Palette colors are distinct and it carries a rope material.
    match MaterialDatabase::new(
        default_structural_materials(),
        default_electrical_materials(),
        ROPE_MATERIAL_NAME,
    ) {
        Ok(db) => db,
        Err(e) => unreachable!("built-in palette is inconsistent: {e}"),
    }
}
