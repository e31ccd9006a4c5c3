//! Triangle Filtering and Cross-Linking
//!
//! Drops triangles that cover area already covered by another triangle of the
//! same lattice cell, then links the survivors with the springs along their edges.

use std::collections::{HashMap, HashSet};

use glam::IVec2;

use super::model::{BuildModel, BuildTriangle};

/// Remove redundant triangles; returns how many were dropped.
///
/// A triangle is redundant when it repeats an accepted triangle's vertex set, or
/// when it shares an axis-aligned edge with an accepted triangle of the same 2×2
/// cell (the two then overlap). Triangles anchoring a rope are always kept.
pub fn filter_redundant_triangles(model: &mut BuildModel) -> usize {
    let mut seen: HashSet<[usize; 3]> = HashSet::new();
    let mut accepted_by_cell: HashMap<IVec2, Vec<[usize; 3]>> = HashMap::new();
    let mut kept: Vec<BuildTriangle> = Vec::with_capacity(model.triangles.len());

    let candidates = std::mem::take(&mut model.triangles);
    let before = candidates.len();
    for triangle in candidates {
        let touches_rope = triangle.points.iter().any(|&p| anchors_rope(model, p));

        let mut sorted = triangle.points;
        sorted.sort_unstable();
        let cell = cell_of(model, &triangle.points);

        if !touches_rope {
            if seen.contains(&sorted) {
                continue;
            }
            if let Some(cell) = cell {
                let overlapping = accepted_by_cell
                    .get(&cell)
                    .is_some_and(|others| others.iter().any(|other| overlaps_in_cell(model, &triangle.points, other)));
                if overlapping {
                    continue;
                }
            }
        }

        seen.insert(sorted);
        if let Some(cell) = cell {
            accepted_by_cell.entry(cell).or_default().push(triangle.points);
        }
        kept.push(triangle);
    }

    model.triangles = kept;
    before - model.triangles.len()
}

/// Rope-only points, and rope endpoints tied into non-rope structure.
fn anchors_rope(model: &BuildModel, p: usize) -> bool {
    let point = &model.points[p];
    point.is_rope_only || (point.rope_color.is_some() && model.is_connected_to_non_rope_points(p))
}

/// Lower-left corner of the lattice cell spanned by a triangle.
fn cell_of(model: &BuildModel, points: &[usize; 3]) -> Option<IVec2> {
    let mut min = IVec2::MAX;
    for &p in points {
        min = min.min(model.points[p].coords?);
    }
    Some(min)
}

/// Two distinct triangles of one cell overlap unless they meet along a diagonal.
fn overlaps_in_cell(model: &BuildModel, a: &[usize; 3], b: &[usize; 3]) -> bool {
    let shared: Vec<usize> = a.iter().copied().filter(|p| b.contains(p)).collect();
    match shared.as_slice() {
        [p, q] => {
            let (Some(cp), Some(cq)) = (model.points[*p].coords, model.points[*q].coords) else {
                return false;
            };
            let d = cq - cp;
            d.x == 0 || d.y == 0
        }
        _ => shared.len() == 3,
    }
}

/// Link every triangle with its three sub springs and every spring with its
/// super triangles. Triangles whose edges lack a spring are dropped.
pub fn cross_link(model: &mut BuildModel) {
    let mut kept: Vec<BuildTriangle> = Vec::with_capacity(model.triangles.len());

    for mut triangle in std::mem::take(&mut model.triangles) {
        let edges = triangle.edges();
        let sub_springs = [
            model.spring_between(edges[0].0, edges[0].1),
            model.spring_between(edges[1].0, edges[1].1),
            model.spring_between(edges[2].0, edges[2].1),
        ];
        let [Some(s0), Some(s1), Some(s2)] = sub_springs else {
            log::warn!("dropping triangle {:?}: edge without a spring", triangle.points);
            continue;
        };
        if [s0, s1, s2].iter().any(|&s| model.springs[s].super_triangles.len() >= 2) {
            log::warn!("dropping triangle {:?}: edge already bounds two triangles", triangle.points);
            continue;
        }

        let t = kept.len();
        triangle.sub_springs = Some([s0, s1, s2]);
        for s in [s0, s1, s2] {
            model.springs[s].super_triangles.push(t);
        }
        for p in triangle.points {
            model.points[p].connected_triangles.push(t);
        }
        kept.push(triangle);
    }

    model.triangles = kept;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::builder::model::BuildPoint;
    use crate::material::StructuralMaterialId;

    /// Unit square with corners 0 (0,0), 1 (1,0), 2 (1,1), 3 (0,1) and all six springs.
    fn square() -> BuildModel {
        let mut model = BuildModel::new(2, 2);
        for (x, y) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
            let coords = IVec2::new(x, y);
            model.add_point(BuildPoint::new(
                Vec2::new(x as f32, y as f32),
                StructuralMaterialId(0),
                Some(coords),
            ));
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)] {
            model.add_spring(a, b, false);
        }
        model
    }

    #[test]
    fn lattice_split_is_kept() {
        let mut model = square();
        model.add_triangle([0, 1, 2]);
        model.add_triangle([0, 2, 3]);
        assert_eq!(filter_redundant_triangles(&mut model), 0);
        assert_eq!(model.triangles.len(), 2);
    }

    #[test]
    fn duplicate_and_overlapping_triangles_are_dropped() {
        let mut model = square();
        model.add_triangle([0, 1, 2]);
        model.add_triangle([1, 2, 0]);
        // Shares the axis-aligned edge 0-1 with the first one
        model.add_triangle([0, 1, 3]);
        model.add_triangle([0, 2, 3]);
        assert_eq!(filter_redundant_triangles(&mut model), 2);
        let kept: Vec<[usize; 3]> = model.triangles.iter().map(|t| t.points).collect();
        assert_eq!(kept, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn rope_triangles_survive() {
        let mut model = square();
        model.points[3].is_rope_only = true;
        model.add_triangle([0, 1, 2]);
        model.add_triangle([0, 1, 3]);
        assert_eq!(filter_redundant_triangles(&mut model), 0);
    }

    #[test]
    fn rope_endpoint_on_structure_keeps_its_triangles() {
        let mut model = square();
        model.points[3].rope_color = Some(crate::material::palette::ROPE_COLOR);
        assert!(model.is_connected_to_non_rope_points(3));
        model.add_triangle([0, 1, 2]);
        model.add_triangle([0, 1, 3]);
        assert_eq!(filter_redundant_triangles(&mut model), 0);
        assert_eq!(model.triangles.len(), 2);
    }

    #[test]
    fn cross_link_populates_back_references() {
        let mut model = square();
        model.add_triangle([0, 1, 2]);
        model.add_triangle([0, 2, 3]);
        cross_link(&mut model);

        let diagonal = model.spring_between(0, 2).unwrap();
        assert_eq!(model.springs[diagonal].super_triangles, vec![0, 1]);
        let cross = model.spring_between(1, 3).unwrap();
        assert!(model.springs[cross].super_triangles.is_empty());
        assert_eq!(model.points[0].connected_triangles, vec![0, 1]);
        assert!(model.triangles.iter().all(|t| t.sub_springs.is_some()));
    }
}
