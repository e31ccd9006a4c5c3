//! Element Reordering
//!
//! Candidate orderings of points, springs and triangles for memory locality.
//! Each candidate is scored by the ACMR of its triangle index stream and the
//! lowest one is applied to the model.

use serde::{Deserialize, Serialize};

use super::model::{BuildModel, PointPair};
use super::vertex_cache::{self, CacheMetrics, MEASUREMENT_CACHE_SIZE};
use glam::IVec2;

/// Rows per stripe of the striped traversal.
const STRIPE_HEIGHT: i32 = 2;
/// Edge length of the blocks of the blocked traversal.
const BLOCK_SIZE: i32 = 8;
/// Edge length of the tiles of the tiled traversal.
const TILE_SIZE: i32 = 4;

/// How the builder lays out elements in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingStrategy {
    /// Column-by-column sweep of horizontal two-row stripes
    Striped,
    /// Row-major blocks, row-major inside each block
    Blocked,
    /// Serpentine sequence of small tiles
    Tiled,
    /// Forsyth vertex cache optimization of the triangle and spring lists
    VertexCache,
}

impl OrderingStrategy {
    pub const fn all() -> [OrderingStrategy; 4] {
        [
            OrderingStrategy::Striped,
            OrderingStrategy::Blocked,
            OrderingStrategy::Tiled,
            OrderingStrategy::VertexCache,
        ]
    }
}

/// New-to-old index maps for every element kind.
#[derive(Debug, Clone)]
pub struct Ordering {
    pub strategy: OrderingStrategy,
    pub points: Vec<usize>,
    pub springs: Vec<usize>,
    pub triangles: Vec<usize>,
    pub metrics: CacheMetrics,
}

/// Outcome of the reordering stage.
#[derive(Debug, Clone)]
pub struct ReorderReport {
    pub chosen: OrderingStrategy,
    pub candidates: Vec<(OrderingStrategy, CacheMetrics)>,
}

impl ReorderReport {
    /// Metrics of the applied ordering.
    pub fn chosen_metrics(&self) -> Option<CacheMetrics> {
        self.candidates
            .iter()
            .find(|(strategy, _)| *strategy == self.chosen)
            .map(|&(_, metrics)| metrics)
    }
}

/// Evaluate every strategy and apply the one with the lowest ACMR.
///
/// Ties keep the earlier candidate. With no strategy configured the model keeps
/// its derivation order.
pub fn reorder(model: &mut BuildModel, strategies: &[OrderingStrategy]) -> Option<ReorderReport> {
    let mut best: Option<Ordering> = None;
    let mut candidates = Vec::with_capacity(strategies.len());

    for &strategy in strategies {
        let ordering = compute_ordering(model, strategy);
        log::debug!(
            "ordering {:?}: ACMR {:.3}, vertex miss ratio {:.3}",
            strategy,
            ordering.metrics.acmr,
            ordering.metrics.vertex_miss_ratio
        );
        candidates.push((strategy, ordering.metrics));
        if best.as_ref().is_none_or(|b| ordering.metrics.acmr < b.metrics.acmr) {
            best = Some(ordering);
        }
    }

    let best = best?;
    apply_ordering(model, &best);
    Some(ReorderReport {
        chosen: best.strategy,
        candidates,
    })
}

pub fn compute_ordering(model: &BuildModel, strategy: OrderingStrategy) -> Ordering {
    let (points, triangles) = match strategy {
        OrderingStrategy::Striped => (complete_point_order(model, striped_cells(model)), None),
        OrderingStrategy::Blocked => (complete_point_order(model, blocked_cells(model)), None),
        OrderingStrategy::Tiled => (complete_point_order(model, tiled_cells(model)), None),
        OrderingStrategy::VertexCache => {
            let triangle_vertices: Vec<[usize; 3]> = model.triangles.iter().map(|t| t.points).collect();
            let triangle_order = vertex_cache::optimize_order(&triangle_vertices, model.points.len());
            let first_use = triangle_order.iter().flat_map(|&t| model.triangles[t].points);
            (complete_point_order(model, first_use), Some(triangle_order))
        }
    };
    let old_to_new = invert(&points);

    let triangles = triangles.unwrap_or_else(|| {
        let mut order: Vec<usize> = (0..model.triangles.len()).collect();
        order.sort_by_key(|&t| {
            let mut key = model.triangles[t].points.map(|p| old_to_new[p]);
            key.sort_unstable();
            key
        });
        order
    });

    let springs = if strategy == OrderingStrategy::VertexCache {
        let spring_vertices: Vec<[usize; 2]> = model
            .springs
            .iter()
            .map(|s| [old_to_new[s.a], old_to_new[s.b]])
            .collect();
        vertex_cache::optimize_order(&spring_vertices, model.points.len())
    } else {
        let mut order: Vec<usize> = (0..model.springs.len()).collect();
        order.sort_by_key(|&s| PointPair::new(old_to_new[model.springs[s].a], old_to_new[model.springs[s].b]));
        order
    };

    let stream: Vec<[usize; 3]> = triangles
        .iter()
        .map(|&t| model.triangles[t].points.map(|p| old_to_new[p]))
        .collect();
    let metrics = vertex_cache::measure(&stream, MEASUREMENT_CACHE_SIZE);

    Ordering {
        strategy,
        points,
        springs,
        triangles,
        metrics,
    }
}

/// Turn a (possibly repeating, possibly partial) point visit sequence into a
/// full permutation: first visits in order, then every unvisited point in
/// derivation order.
fn complete_point_order(model: &BuildModel, visits: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut placed = vec![false; model.points.len()];
    let mut order = Vec::with_capacity(model.points.len());
    for p in visits.into_iter().chain(0..model.points.len()) {
        if !placed[p] {
            placed[p] = true;
            order.push(p);
        }
    }
    order
}

fn cells_to_points(model: &BuildModel, cells: impl IntoIterator<Item = IVec2>) -> Vec<usize> {
    cells.into_iter().filter_map(|c| model.matrix.get(c)).collect()
}

fn striped_cells(model: &BuildModel) -> Vec<usize> {
    let (w, h) = (model.matrix.width(), model.matrix.height());
    let mut cells = Vec::new();
    for stripe in (0..h).step_by(STRIPE_HEIGHT as usize) {
        for x in 0..w {
            for y in stripe..(stripe + STRIPE_HEIGHT).min(h) {
                cells.push(IVec2::new(x, y));
            }
        }
    }
    cells_to_points(model, cells)
}

fn block_cells(origin: IVec2, size: i32, w: i32, h: i32, out: &mut Vec<IVec2>) {
    for y in origin.y..(origin.y + size).min(h) {
        for x in origin.x..(origin.x + size).min(w) {
            out.push(IVec2::new(x, y));
        }
    }
}

fn blocked_cells(model: &BuildModel) -> Vec<usize> {
    let (w, h) = (model.matrix.width(), model.matrix.height());
    let mut cells = Vec::new();
    for by in (0..h).step_by(BLOCK_SIZE as usize) {
        for bx in (0..w).step_by(BLOCK_SIZE as usize) {
            block_cells(IVec2::new(bx, by), BLOCK_SIZE, w, h, &mut cells);
        }
    }
    cells_to_points(model, cells)
}

fn tiled_cells(model: &BuildModel) -> Vec<usize> {
    let (w, h) = (model.matrix.width(), model.matrix.height());
    let mut cells = Vec::new();
    for (row, ty) in (0..h).step_by(TILE_SIZE as usize).enumerate() {
        let xs: Vec<i32> = (0..w).step_by(TILE_SIZE as usize).collect();
        let xs: Box<dyn Iterator<Item = i32>> = if row % 2 == 0 {
            Box::new(xs.into_iter())
        } else {
            Box::new(xs.into_iter().rev())
        };
        for tx in xs {
            block_cells(IVec2::new(tx, ty), TILE_SIZE, w, h, &mut cells);
        }
    }
    cells_to_points(model, cells)
}

fn invert(new_to_old: &[usize]) -> Vec<usize> {
    let mut old_to_new = vec![0; new_to_old.len()];
    for (new, &old) in new_to_old.iter().enumerate() {
        old_to_new[old] = new;
    }
    old_to_new
}

/// Permute the model and rewrite every cross reference.
pub fn apply_ordering(model: &mut BuildModel, ordering: &Ordering) {
    let point_map = invert(&ordering.points);
    let spring_map = invert(&ordering.springs);
    let triangle_map = invert(&ordering.triangles);

    let mut points: Vec<_> = ordering.points.iter().map(|&p| model.points[p].clone()).collect();
    for point in &mut points {
        for s in &mut point.connected_springs {
            *s = spring_map[*s];
        }
        for t in &mut point.connected_triangles {
            *t = triangle_map[*t];
        }
    }

    let mut springs: Vec<_> = ordering.springs.iter().map(|&s| model.springs[s].clone()).collect();
    for spring in &mut springs {
        spring.a = point_map[spring.a];
        spring.b = point_map[spring.b];
        for t in &mut spring.super_triangles {
            *t = triangle_map[*t];
        }
    }

    let mut triangles: Vec<_> = ordering.triangles.iter().map(|&t| model.triangles[t].clone()).collect();
    for triangle in &mut triangles {
        triangle.points = triangle.points.map(|p| point_map[p]);
        triangle.sub_springs = triangle.sub_springs.map(|ss| ss.map(|s| spring_map[s]));
    }

    model.point_pair_to_spring = springs
        .iter()
        .enumerate()
        .map(|(i, s)| (PointPair::new(s.a, s.b), i))
        .collect();
    model.matrix.remap(&point_map);
    model.points = points;
    model.springs = springs;
    model.triangles = triangles;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::derive;
    use crate::builder::filter;
    use crate::builder::layers::RasterLayer;
    use crate::material::palette::{self, STEEL_COLOR};

    fn model(width: u32, height: u32) -> BuildModel {
        let materials = palette::default_database();
        let layer = RasterLayer::from_fn(width, height, |_, _| STEEL_COLOR);
        let mut model = BuildModel::new(width, height);
        derive::derive_points(&mut model, &layer, &materials).unwrap();
        derive::derive_springs(&mut model);
        derive::derive_triangles(&mut model);
        filter::cross_link(&mut model);
        model
    }

    fn assert_consistent(model: &BuildModel) {
        for (s, spring) in model.springs.iter().enumerate() {
            assert_eq!(model.spring_between(spring.a, spring.b), Some(s));
            assert!(model.points[spring.a].connected_springs.contains(&s));
            for &t in &spring.super_triangles {
                assert!(model.triangles[t].sub_springs.unwrap().contains(&s));
            }
        }
        for (t, triangle) in model.triangles.iter().enumerate() {
            for p in triangle.points {
                assert!(model.points[p].connected_triangles.contains(&t));
            }
        }
        for (p, point) in model.points.iter().enumerate() {
            if let Some(c) = point.coords {
                assert_eq!(model.matrix.get(c), Some(p));
            }
        }
    }

    #[test]
    fn every_strategy_yields_permutations() {
        let model = model(11, 7);
        for strategy in OrderingStrategy::all() {
            let ordering = compute_ordering(&model, strategy);
            for (order, len) in [
                (&ordering.points, model.points.len()),
                (&ordering.springs, model.springs.len()),
                (&ordering.triangles, model.triangles.len()),
            ] {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..len).collect::<Vec<_>>(), "{:?}", strategy);
            }
        }
    }

    #[test]
    fn applied_ordering_keeps_references_consistent() {
        for strategy in OrderingStrategy::all() {
            let mut model = model(9, 6);
            let ordering = compute_ordering(&model, strategy);
            apply_ordering(&mut model, &ordering);
            assert_consistent(&model);
        }
    }

    #[test]
    fn lowest_acmr_wins() {
        let mut m = model(12, 12);
        let report = reorder(&mut m, &OrderingStrategy::all()).unwrap();
        let best = report
            .candidates
            .iter()
            .map(|(_, metrics)| metrics.acmr)
            .fold(f32::INFINITY, f32::min);
        let chosen = report.candidates.iter().find(|(s, _)| *s == report.chosen).unwrap().1;
        assert_eq!(chosen.acmr, best);
        // Earliest strategy reaching the minimum
        let first_best = report.candidates.iter().find(|(_, m)| m.acmr == best).unwrap().0;
        assert_eq!(report.chosen, first_best);
    }

    #[test]
    fn reordering_is_deterministic() {
        let mut a = model(10, 5);
        let mut b = model(10, 5);
        reorder(&mut a, &OrderingStrategy::all());
        reorder(&mut b, &OrderingStrategy::all());
        let pa: Vec<_> = a.points.iter().map(|p| p.coords).collect();
        let pb: Vec<_> = b.points.iter().map(|p| p.coords).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn no_strategy_keeps_order() {
        let mut m = model(3, 3);
        assert!(reorder(&mut m, &[]).is_none());
        assert_eq!(m.points[0].coords, Some(IVec2::new(0, 0)));
    }
}
