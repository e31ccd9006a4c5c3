//! Model Derivation
//!
//! The first stages of the build: rope endpoint extraction, point/spring/triangle
//! derivation from the structural raster, rope materialization and electrical
//! decoration. Every stage scans pixels bottom row first, left to right, so the
//! resulting model is a pure function of the layers.

use std::collections::HashMap;

use glam::IVec2;

use super::layers::RasterLayer;
use super::model::{BuildModel, BuildPoint, ElectricalDecoration, RopeSegment};
use crate::error::{BuildError, BuildResult};
use crate::geometry::Octant;
use crate::material::{ColorKey, ElectricalElementKind, MaterialDatabase};

/// Octants probed when creating springs; the other four are covered from the
/// neighbor's side.
const FORWARD_OCTANTS: [Octant; 4] = [Octant::E, Octant::NE, Octant::N, Octant::NW];

/// Collect the two endpoints of every rope color key, in first-seen order.
pub fn extract_rope_segments(ropes: &RasterLayer) -> BuildResult<Vec<RopeSegment>> {
    let mut segments: Vec<RopeSegment> = Vec::new();
    let mut by_color: HashMap<ColorKey, usize> = HashMap::new();

    for (x, y, color) in ropes.non_empty_pixels() {
        let index = *by_color.entry(color).or_insert_with(|| {
            segments.push(RopeSegment::new(color));
            segments.len() - 1
        });
        if !segments[index].set_endpoint(x, y) {
            return Err(BuildError::TooManyRopeEndpoints {
                color: color.to_string(),
                x,
                y,
            });
        }
    }

    for segment in &segments {
        if let (Some((x, y)), None) = (segment.a, segment.b) {
            return Err(BuildError::IncompleteRope {
                color: segment.color.to_string(),
                x,
                y,
            });
        }
    }

    Ok(segments)
}

/// One build point per non-empty structural pixel.
pub fn derive_points(model: &mut BuildModel, structural: &RasterLayer, materials: &MaterialDatabase) -> BuildResult<()> {
    for (x, y, color) in structural.non_empty_pixels() {
        let material = materials
            .find_structural(color)
            .ok_or_else(|| BuildError::UnrecognizedStructuralColor {
                color: color.to_string(),
                x,
                y,
            })?;
        let position = model.pixel_position(x, y);
        model.add_point(BuildPoint::new(position, material, Some(IVec2::new(x as i32, y as i32))));
    }

    if model.points.is_empty() {
        return Err(BuildError::EmptyStructuralLayer);
    }
    Ok(())
}

/// Make sure every rope endpoint has a point, injecting rope points on empty
/// pixels. Must run before springs and triangles are derived so injected
/// endpoints join the lattice.
pub fn inject_rope_endpoints(model: &mut BuildModel, segments: &[RopeSegment], materials: &MaterialDatabase) {
    for segment in segments {
        for (x, y) in [segment.a, segment.b].into_iter().flatten() {
            let coords = IVec2::new(x as i32, y as i32);
            let p = match model.matrix.get(coords) {
                Some(p) => p,
                None => {
                    let position = model.pixel_position(x, y);
                    let mut point = BuildPoint::new(position, materials.rope_material(), Some(coords));
                    point.is_rope_only = true;
                    model.add_point(point)
                }
            };
            model.points[p].rope_color = Some(segment.color);
        }
    }
}

/// Springs between every pair of 8-connected lattice points.
pub fn derive_springs(model: &mut BuildModel) {
    for p in 0..model.points.len() {
        let Some(coords) = model.points[p].coords else {
            continue;
        };
        for octant in FORWARD_OCTANTS {
            if let Some(n) = model.matrix.neighbor(coords, octant) {
                model.add_spring(p, n, false);
            }
        }
    }
}

/// Counter-clockwise triangles covering every populated 2×2 block.
///
/// A full block is split along its lower-left/upper-right diagonal; a block with
/// three corners gets the one triangle they span. Each block is emitted from
/// exactly one of its points.
pub fn derive_triangles(model: &mut BuildModel) {
    for p in 0..model.points.len() {
        let Some(coords) = model.points[p].coords else {
            continue;
        };
        let at = |o: Octant| model.matrix.neighbor(coords, o);
        let (e, ne, n, w, nw) = (at(Octant::E), at(Octant::NE), at(Octant::N), at(Octant::W), at(Octant::NW));

        // Block with p at its lower-left corner
        let mut emitted: Vec<[usize; 3]> = Vec::with_capacity(2);
        match (e, ne, n) {
            (Some(e), Some(ne), Some(n)) => {
                emitted.push([p, e, ne]);
                emitted.push([p, ne, n]);
            }
            (Some(e), Some(ne), None) => emitted.push([p, e, ne]),
            (None, Some(ne), Some(n)) => emitted.push([p, ne, n]),
            (Some(e), None, Some(n)) => emitted.push([p, e, n]),
            _ => {}
        }

        // Block with p at its lower-right corner and nothing at the lower-left
        if w.is_none() {
            if let (Some(n), Some(nw)) = (n, nw) {
                emitted.push([p, n, nw]);
            }
        }

        for triangle in emitted {
            model.add_triangle(triangle);
        }
    }
}

/// Chain each rope between its endpoints with rope points at unit spacing.
pub fn materialize_ropes(model: &mut BuildModel, segments: &[RopeSegment], materials: &MaterialDatabase) {
    for segment in segments {
        let (Some((ax, ay)), Some((bx, by))) = (segment.a, segment.b) else {
            continue;
        };
        let endpoints = (
            model.matrix.get(IVec2::new(ax as i32, ay as i32)),
            model.matrix.get(IVec2::new(bx as i32, by as i32)),
        );
        let (Some(start), Some(end)) = endpoints else {
            log::warn!("rope #{} lost an endpoint before materialization", segment.color);
            continue;
        };

        let from = model.points[start].position;
        let to = model.points[end].position;
        let steps = (from.distance(to).ceil() as usize).max(1);

        let mut previous = start;
        for i in 1..steps {
            let position = from.lerp(to, i as f32 / steps as f32);
            let mut point = BuildPoint::new(position, materials.rope_material(), None);
            point.is_rope_only = true;
            point.rope_color = Some(segment.color);
            let current = model.add_point(point);
            model.add_spring(previous, current, true);
            previous = current;
        }
        model.add_spring(previous, end, true);
    }
}

/// Overlay the electrical layer onto existing points.
pub fn decorate_electrical(model: &mut BuildModel, electrical: &RasterLayer, materials: &MaterialDatabase) -> BuildResult<()> {
    let mut instance_counters: HashMap<ElectricalElementKind, u32> = HashMap::new();

    for (x, y, color) in electrical.non_empty_pixels() {
        let material = materials
            .find_electrical(color)
            .ok_or_else(|| BuildError::UnrecognizedElectricalColor {
                color: color.to_string(),
                x,
                y,
            })?;
        let p = model
            .matrix
            .get(IVec2::new(x as i32, y as i32))
            .ok_or(BuildError::ElectricalWithoutSubstratum { x, y })?;

        let kind = materials.electrical(material).kind;
        let instance_index = kind.is_instanced().then(|| {
            let counter = instance_counters.entry(kind).or_insert(0);
            let index = *counter;
            *counter += 1;
            index
        });
        model.points[p].electrical = Some(ElectricalDecoration { material, instance_index });
    }
    Ok(())
}

/// Whether an electrical particle may be placed at a pixel of the model.
pub fn is_electrical_particle_allowed_at(model: &BuildModel, x: u32, y: u32) -> bool {
    model.matrix.get(IVec2::new(x as i32, y as i32)).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::palette::{self, ROPE_COLOR, STEEL_COLOR};

    fn filled(width: u32, height: u32) -> RasterLayer {
        RasterLayer::from_fn(width, height, |_, _| STEEL_COLOR)
    }

    fn derive(layer: &RasterLayer) -> BuildModel {
        let materials = palette::default_database();
        let mut model = BuildModel::new(layer.width(), layer.height());
        derive_points(&mut model, layer, &materials).unwrap();
        derive_springs(&mut model);
        derive_triangles(&mut model);
        model
    }

    #[test]
    fn three_by_three_lattice() {
        let model = derive(&filled(3, 3));
        assert_eq!(model.points.len(), 9);
        assert_eq!(model.springs.len(), 20);
        assert_eq!(model.triangles.len(), 8);
    }

    #[test]
    fn triangles_are_counter_clockwise() {
        let model = derive(&filled(4, 3));
        for t in &model.triangles {
            let [a, b, c] = t.points.map(|p| model.points[p].position);
            assert!(crate::geometry::cross_2d(a, b, c) > 0.0);
        }
    }

    #[test]
    fn three_corner_blocks_get_one_triangle() {
        for missing in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let layer = RasterLayer::from_fn(2, 2, |x, y| {
                if (x, y) == missing { ColorKey::EMPTY } else { STEEL_COLOR }
            });
            let model = derive(&layer);
            assert_eq!(model.triangles.len(), 1, "missing corner {:?}", missing);
        }
    }

    #[test]
    fn rope_endpoint_rules() {
        let mut ropes = RasterLayer::empty(5, 1);
        let red = ColorKey::new(250, 10, 10);
        ropes.set(0, 0, red);
        assert!(matches!(extract_rope_segments(&ropes), Err(BuildError::IncompleteRope { .. })));
        ropes.set(4, 0, red);
        assert_eq!(extract_rope_segments(&ropes).unwrap().len(), 1);
        ropes.set(2, 0, red);
        assert!(matches!(
            extract_rope_segments(&ropes),
            Err(BuildError::TooManyRopeEndpoints { x: 4, .. })
        ));
    }

    #[test]
    fn ropes_are_chained_at_unit_spacing() {
        let materials = palette::default_database();
        let structural = RasterLayer::from_fn(6, 1, |x, _| if x == 0 { STEEL_COLOR } else { ColorKey::EMPTY });
        let mut ropes = RasterLayer::empty(6, 1);
        ropes.set(0, 0, ROPE_COLOR);
        ropes.set(5, 0, ROPE_COLOR);

        let segments = extract_rope_segments(&ropes).unwrap();
        let mut model = BuildModel::new(6, 1);
        derive_points(&mut model, &structural, &materials).unwrap();
        inject_rope_endpoints(&mut model, &segments, &materials);
        assert_eq!(model.points.len(), 2);
        assert!(!model.points[0].is_rope_only);
        assert!(model.points[1].is_rope_only);

        derive_springs(&mut model);
        materialize_ropes(&mut model, &segments, &materials);
        // 4 intermediate points, 5 rope springs
        assert_eq!(model.points.len(), 6);
        assert_eq!(model.springs.len(), 5);
        assert!(model.springs.iter().all(|s| s.is_rope));
    }

    #[test]
    fn electrical_needs_substratum() {
        let materials = palette::default_database();
        let mut model = derive(&filled(2, 2));
        let mut electrical = RasterLayer::empty(3, 3);
        electrical.set(2, 2, palette::LAMP_COLOR);
        assert!(matches!(
            decorate_electrical(&mut model, &electrical, &materials),
            Err(BuildError::ElectricalWithoutSubstratum { x: 2, y: 2 })
        ));
        assert!(is_electrical_particle_allowed_at(&model, 1, 1));
        assert!(!is_electrical_particle_allowed_at(&model, 2, 2));
    }

    #[test]
    fn instanced_kinds_are_numbered_per_kind() {
        let materials = palette::default_database();
        let mut model = derive(&filled(3, 1));
        let mut electrical = RasterLayer::empty(3, 1);
        electrical.set(0, 0, palette::SWITCH_COLOR);
        electrical.set(1, 0, palette::LAMP_COLOR);
        electrical.set(2, 0, palette::SWITCH_COLOR);
        decorate_electrical(&mut model, &electrical, &materials).unwrap();

        let instances: Vec<Option<u32>> = model
            .points
            .iter()
            .map(|p| p.electrical.and_then(|e| e.instance_index))
            .collect();
        assert_eq!(instances, vec![Some(0), None, Some(1)]);
    }
}
