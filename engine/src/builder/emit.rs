//! Container Emission
//!
//! Final stage of the build: sizes the runtime containers to the final element
//! counts and fills them from the (reordered) build model.

use std::sync::Arc;

use super::frontier::BuildFrontier;
use super::model::BuildModel;
use crate::geometry::triangle_area;
use crate::material::{MaterialDatabase, StructuralMaterialId};
use crate::ship::{
    ElectricalElements, Frontier, Frontiers, PointIndex, PointSpec, Points, Ship, SpringIndex, SpringSpec, Springs,
    Triangles,
};
use crate::world::SimulationParameters;

/// Area represented by a point: a third of each incident triangle, or one
/// square meter for a point outside every triangle.
pub fn point_area(model: &BuildModel, p: usize) -> f32 {
    let point = &model.points[p];
    if point.connected_triangles.is_empty() {
        return 1.0;
    }
    point
        .connected_triangles
        .iter()
        .map(|&t| {
            let [a, b, c] = model.triangles[t].points.map(|q| model.points[q].position);
            triangle_area(a, b, c) / 3.0
        })
        .sum()
}

/// Material of a spring: the rope material for rope springs, otherwise the
/// weaker endpoint's material.
fn spring_material(model: &BuildModel, materials: &MaterialDatabase, s: usize) -> StructuralMaterialId {
    let spring = &model.springs[s];
    if spring.is_rope {
        return materials.rope_material();
    }
    let (ma, mb) = (model.points[spring.a].material, model.points[spring.b].material);
    if materials.structural(mb).strength < materials.structural(ma).strength {
        mb
    } else {
        ma
    }
}

pub fn emit_ship(
    model: &BuildModel,
    frontiers: &[BuildFrontier],
    materials: Arc<MaterialDatabase>,
    params: &SimulationParameters,
) -> Ship {
    let mut points = Points::with_capacity(model.points.len(), params.max_ephemeral_particles);
    for (p, point) in model.points.iter().enumerate() {
        let material = materials.structural(point.material);
        points.add(PointSpec {
            position: point.position,
            material: point.material,
            mass: material.mass_for_area(point_area(model, p)) * params.mass_adjustment,
            temperature: params.initial_temperature,
            is_rope: point.is_rope_only || material.is_rope,
            is_hull: material.is_hull,
        });
    }

    let mut springs = Springs::with_capacity(model.springs.len());
    for (s, spring) in model.springs.iter().enumerate() {
        let material_id = spring_material(model, &materials, s);
        let material = materials.structural(material_id);
        let (a, b) = (PointIndex::new(spring.a), PointIndex::new(spring.b));
        let index = springs.add(SpringSpec {
            endpoints: [a, b],
            rest_length: model.points[spring.a].position.distance(model.points[spring.b].position),
            material: material_id,
            stiffness: material.stiffness * params.spring_stiffness_adjustment,
            damping: params.spring_damping_adjustment,
            is_rope: spring.is_rope,
        });
        points.add_connected_spring(a, index);
        points.add_connected_spring(b, index);
    }

    let mut triangles = Triangles::with_capacity(model.triangles.len());
    for triangle in &model.triangles {
        let Some(sub_springs) = triangle.sub_springs else {
            continue;
        };
        let vertices = triangle.points.map(PointIndex::new);
        let index = triangles.add(vertices, sub_springs.map(SpringIndex::new));
        for s in sub_springs {
            springs.add_super_triangle(SpringIndex::new(s), index);
        }
        for p in vertices {
            points.add_connected_triangle(p, index);
        }
    }

    let mut electrical = ElectricalElements::with_capacity(model.points.iter().filter(|p| p.electrical.is_some()).count());
    for (p, point) in model.points.iter().enumerate() {
        if let Some(decoration) = point.electrical {
            let kind = materials.electrical(decoration.material).kind;
            let element = electrical.add(kind, decoration.material, decoration.instance_index, PointIndex::new(p));
            points.set_electrical_element(PointIndex::new(p), Some(element));
        }
    }
    for spring in &model.springs {
        let a = points.electrical_element(PointIndex::new(spring.a));
        let b = points.electrical_element(PointIndex::new(spring.b));
        if let (Some(a), Some(b)) = (a, b) {
            electrical.connect(a, b);
        }
    }

    points.allocate_ephemeral_pool(params.max_ephemeral_particles, StructuralMaterialId(0), params.initial_temperature);

    let frontiers = Frontiers::new(
        frontiers
            .iter()
            .map(|f| Frontier {
                kind: f.kind,
                edges: f.edges.iter().map(|&s| SpringIndex::new(s)).collect(),
            })
            .collect(),
    );

    Ship::from_parts(materials, points, springs, triangles, electrical, frontiers)
}
