//! Frontier Detection
//!
//! Walks the boundary of the triangulated lattice. A frontier edge is a spring
//! bounding exactly one triangle; each connected run of frontier edges forms a
//! closed loop, external when counter-clockwise and internal (a hole) when
//! clockwise.

use glam::Vec2;

use super::model::BuildModel;
use crate::geometry::{signed_polygon_area, Octant};
use crate::ship::FrontierKind;

/// A closed boundary loop in build model indices.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFrontier {
    pub kind: FrontierKind,
    /// Springs in walk order
    pub edges: Vec<usize>,
    /// Points in walk order; `points[i]` is the start of `edges[i]`
    pub points: Vec<usize>,
}

fn is_frontier_edge(model: &BuildModel, s: usize) -> bool {
    model.springs[s].super_triangles.len() == 1
}

/// Frontier edge leaving `p` towards `octant`, with the point it reaches.
fn frontier_edge_towards(model: &BuildModel, p: usize, octant: Octant) -> Option<(usize, usize)> {
    let coords = model.points[p].coords?;
    let n = model.matrix.neighbor(coords, octant)?;
    let s = model.spring_between(p, n)?;
    is_frontier_edge(model, s).then_some((s, n))
}

/// Orient a frontier edge along its triangle's counter-clockwise winding.
fn oriented_start(model: &BuildModel, s: usize) -> Option<(usize, usize)> {
    let t = *model.springs[s].super_triangles.first()?;
    let spring = &model.springs[s];
    model.triangles[t]
        .edges()
        .into_iter()
        .find(|&(u, v)| (u == spring.a && v == spring.b) || (u == spring.b && v == spring.a))
}

/// Walk every frontier loop of the model.
///
/// From each point the walk sweeps clockwise, starting just after the direction
/// it came from, and follows the first frontier edge it meets. That keeps the
/// triangulated side on the left.
pub fn compute_frontiers(model: &BuildModel) -> Vec<BuildFrontier> {
    let mut visited = vec![false; model.springs.len()];
    let mut frontiers = Vec::new();

    for start in 0..model.springs.len() {
        if visited[start] || !is_frontier_edge(model, start) {
            continue;
        }
        let Some((u, v)) = oriented_start(model, start) else {
            continue;
        };
        let Some(first_coords) = model.points[u].coords else {
            continue;
        };
        let Some(second_coords) = model.points[v].coords else {
            continue;
        };
        let Some(mut incoming) = Octant::from_delta(second_coords - first_coords) else {
            continue;
        };

        visited[start] = true;
        let mut edges = vec![start];
        let mut points = vec![u];
        let mut current = v;
        let mut closed = false;

        while edges.len() <= model.springs.len() {
            let mut octant = incoming.opposite().clockwise();
            let mut next = None;
            for _ in 0..8 {
                if let Some(found) = frontier_edge_towards(model, current, octant) {
                    next = Some((found, octant));
                    break;
                }
                octant = octant.clockwise();
            }

            let Some(((s, n), octant)) = next else {
                break;
            };
            if s == start {
                closed = true;
                break;
            }
            if visited[s] {
                break;
            }

            visited[s] = true;
            edges.push(s);
            points.push(current);
            current = n;
            incoming = octant;
        }

        if !closed {
            log::warn!("frontier starting at spring {} did not close after {} edges", start, edges.len());
            continue;
        }

        let positions: Vec<Vec2> = points.iter().map(|&p| model.points[p].position).collect();
        let kind = if signed_polygon_area(&positions) > 0.0 {
            FrontierKind::External
        } else {
            FrontierKind::Internal
        };
        frontiers.push(BuildFrontier { kind, edges, points });
    }

    frontiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::layers::RasterLayer;
    use crate::builder::{derive, filter};
    use crate::material::palette::{self, STEEL_COLOR};
    use crate::material::ColorKey;

    fn model_from(layer: &RasterLayer) -> BuildModel {
        let materials = palette::default_database();
        let mut model = BuildModel::new(layer.width(), layer.height());
        derive::derive_points(&mut model, layer, &materials).unwrap();
        derive::derive_springs(&mut model);
        derive::derive_triangles(&mut model);
        filter::cross_link(&mut model);
        model
    }

    #[test]
    fn solid_block_has_one_external_loop() {
        let model = model_from(&RasterLayer::from_fn(3, 3, |_, _| STEEL_COLOR));
        let frontiers = compute_frontiers(&model);
        assert_eq!(frontiers.len(), 1);
        assert_eq!(frontiers[0].kind, FrontierKind::External);
        assert_eq!(frontiers[0].edges.len(), 8);
    }

    #[test]
    fn hole_produces_internal_loop() {
        let layer = RasterLayer::from_fn(5, 5, |x, y| {
            if x == 2 && y == 2 { ColorKey::EMPTY } else { STEEL_COLOR }
        });
        let frontiers = compute_frontiers(&model_from(&layer));
        assert_eq!(frontiers.len(), 2);
        let external = frontiers.iter().find(|f| f.kind == FrontierKind::External).unwrap();
        let internal = frontiers.iter().find(|f| f.kind == FrontierKind::Internal).unwrap();
        assert_eq!(external.edges.len(), 16);
        assert_eq!(internal.edges.len(), 4);
    }

    #[test]
    fn loops_are_closed_chains() {
        let layer = RasterLayer::from_fn(6, 4, |x, y| {
            if (x, y) == (5, 3) || (x, y) == (0, 0) { ColorKey::EMPTY } else { STEEL_COLOR }
        });
        let model = model_from(&layer);
        for frontier in compute_frontiers(&model) {
            let n = frontier.edges.len();
            for i in 0..n {
                let spring = &model.springs[frontier.edges[i]];
                let from = frontier.points[i];
                let to = frontier.points[(i + 1) % n];
                assert!(
                    (spring.a == from && spring.b == to) || (spring.b == from && spring.a == to),
                    "edge {} does not join consecutive loop points",
                    i
                );
            }
        }
    }

    #[test]
    fn separate_islands_get_separate_loops() {
        let layer = RasterLayer::from_fn(7, 2, |x, _| if x == 3 { ColorKey::EMPTY } else { STEEL_COLOR });
        let frontiers = compute_frontiers(&model_from(&layer));
        assert_eq!(frontiers.len(), 2);
        assert!(frontiers.iter().all(|f| f.kind == FrontierKind::External));
    }
}
