//! Intermediate Build Model
//!
//! Mutable, index-based scratch representation the builder stages operate on.
//! Nothing here outlives a build; [`super::emit`] turns it into runtime containers.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use crate::geometry::Octant;
use crate::material::{ColorKey, ElectricalMaterialId, StructuralMaterialId};

/// Electrical overlay of a build point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectricalDecoration {
    pub material: ElectricalMaterialId,
    /// Per-kind counter for instanced kinds
    pub instance_index: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct BuildPoint {
    pub position: Vec2,
    pub material: StructuralMaterialId,
    /// Pixel coordinates; `None` for rope points placed between pixels
    pub coords: Option<IVec2>,
    /// Created by the rope layer rather than the structural layer
    pub is_rope_only: bool,
    /// Endpoint or body of a rope
    pub rope_color: Option<ColorKey>,
    pub electrical: Option<ElectricalDecoration>,
    pub connected_springs: Vec<usize>,
    pub connected_triangles: Vec<usize>,
}

impl BuildPoint {
    pub fn new(position: Vec2, material: StructuralMaterialId, coords: Option<IVec2>) -> Self {
        Self {
            position,
            material,
            coords,
            is_rope_only: false,
            rope_color: None,
            electrical: None,
            connected_springs: Vec::new(),
            connected_triangles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildSpring {
    pub a: usize,
    pub b: usize,
    /// Direction of `b` as seen from `a`
    pub a_octant: Octant,
    /// Direction of `a` as seen from `b`
    pub b_octant: Octant,
    pub is_rope: bool,
    pub super_triangles: Vec<usize>,
}

impl BuildSpring {
    pub fn other(&self, p: usize) -> usize {
        if self.a == p { self.b } else { self.a }
    }

    pub fn octant_at(&self, p: usize) -> Octant {
        if self.a == p { self.a_octant } else { self.b_octant }
    }
}

/// Three build points in counter-clockwise order.
#[derive(Debug, Clone)]
pub struct BuildTriangle {
    pub points: [usize; 3],
    pub sub_springs: Option<[usize; 3]>,
}

impl BuildTriangle {
    pub fn new(points: [usize; 3]) -> Self {
        Self {
            points,
            sub_springs: None,
        }
    }

    /// Directed edges `(p0, p1)`, `(p1, p2)`, `(p2, p0)`.
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.points;
        [(a, b), (b, c), (c, a)]
    }
}

/// Canonical key of an undirected point pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointPair {
    pub min: usize,
    pub max: usize,
}

impl PointPair {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// The two endpoints of one rope color key.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeSegment {
    pub color: ColorKey,
    pub a: Option<(u32, u32)>,
    pub b: Option<(u32, u32)>,
}

impl RopeSegment {
    pub fn new(color: ColorKey) -> Self {
        Self { color, a: None, b: None }
    }

    /// Record an endpoint; `false` when both endpoints are already set.
    pub fn set_endpoint(&mut self, x: u32, y: u32) -> bool {
        if self.a.is_none() {
            self.a = Some((x, y));
            true
        } else if self.b.is_none() {
            self.b = Some((x, y));
            true
        } else {
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.a.is_some() && self.b.is_some()
    }
}

/// Pixel grid to build point lookup, padded by one cell on every side so
/// neighbor probes never go out of range.
#[derive(Debug, Clone)]
pub struct PointMatrix {
    width: i32,
    height: i32,
    cells: Vec<Option<usize>>,
}

impl PointMatrix {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as i32, height as i32);
        Self {
            width,
            height,
            cells: vec![None; ((width + 2) * (height + 2)) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn slot(&self, coords: IVec2) -> Option<usize> {
        let (x, y) = (coords.x + 1, coords.y + 1);
        if x < 0 || y < 0 || x >= self.width + 2 || y >= self.height + 2 {
            return None;
        }
        Some((x + y * (self.width + 2)) as usize)
    }

    pub fn get(&self, coords: IVec2) -> Option<usize> {
        self.slot(coords).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, coords: IVec2, point: Option<usize>) {
        if let Some(i) = self.slot(coords) {
            self.cells[i] = point;
        }
    }

    pub fn neighbor(&self, coords: IVec2, octant: Octant) -> Option<usize> {
        self.get(coords + octant.delta())
    }

    /// Rewrite every stored index through `old_to_new`.
    pub fn remap(&mut self, old_to_new: &[usize]) {
        for cell in self.cells.iter_mut().flatten() {
            *cell = old_to_new[*cell];
        }
    }
}

/// The whole intermediate model.
#[derive(Debug, Clone)]
pub struct BuildModel {
    pub points: Vec<BuildPoint>,
    pub springs: Vec<BuildSpring>,
    pub triangles: Vec<BuildTriangle>,
    pub point_pair_to_spring: HashMap<PointPair, usize>,
    pub matrix: PointMatrix,
    /// Horizontal offset centering the ship on x = 0
    pub origin: Vec2,
}

impl BuildModel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            points: Vec::new(),
            springs: Vec::new(),
            triangles: Vec::new(),
            point_pair_to_spring: HashMap::new(),
            matrix: PointMatrix::new(width, height),
            origin: Vec2::new(-(width as f32) / 2.0, 0.0),
        }
    }

    /// Ship-space position of a pixel.
    pub fn pixel_position(&self, x: u32, y: u32) -> Vec2 {
        self.origin + Vec2::new(x as f32, y as f32)
    }

    pub fn add_point(&mut self, point: BuildPoint) -> usize {
        let index = self.points.len();
        if let Some(coords) = point.coords {
            self.matrix.set(coords, Some(index));
        }
        self.points.push(point);
        index
    }

    /// Add a spring between two distinct points, reusing an existing one.
    ///
    /// A rope spring over an existing pair promotes that spring to a rope.
    pub fn add_spring(&mut self, a: usize, b: usize, is_rope: bool) -> usize {
        debug_assert_ne!(a, b);
        let pair = PointPair::new(a, b);
        if let Some(&s) = self.point_pair_to_spring.get(&pair) {
            self.springs[s].is_rope |= is_rope;
            return s;
        }

        let a_octant = self.octant_between(a, b);
        let index = self.springs.len();
        self.springs.push(BuildSpring {
            a,
            b,
            a_octant,
            b_octant: a_octant.opposite(),
            is_rope,
            super_triangles: Vec::new(),
        });
        self.point_pair_to_spring.insert(pair, index);
        self.points[a].connected_springs.push(index);
        self.points[b].connected_springs.push(index);
        index
    }

    pub fn add_triangle(&mut self, points: [usize; 3]) -> usize {
        let index = self.triangles.len();
        self.triangles.push(BuildTriangle::new(points));
        index
    }

    pub fn spring_between(&self, a: usize, b: usize) -> Option<usize> {
        self.point_pair_to_spring.get(&PointPair::new(a, b)).copied()
    }

    /// Octant of `b` as seen from `a`, exact for grid neighbors and
    /// discretized by angle otherwise.
    fn octant_between(&self, a: usize, b: usize) -> Octant {
        if let (Some(ca), Some(cb)) = (self.points[a].coords, self.points[b].coords) {
            if let Some(octant) = Octant::from_delta(cb - ca) {
                return octant;
            }
        }
        let d = self.points[b].position - self.points[a].position;
        let sector = (d.y.atan2(d.x) / std::f32::consts::FRAC_PI_4).round() as i32;
        Octant::new(sector.rem_euclid(8) as u8)
    }

    /// True when `p` is linked to at least one point that is not rope-only.
    pub fn is_connected_to_non_rope_points(&self, p: usize) -> bool {
        self.points[p]
            .connected_springs
            .iter()
            .any(|&s| !self.points[self.springs[s].other(p)].is_rope_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_point(model: &mut BuildModel, x: i32, y: i32) -> usize {
        let position = model.pixel_position(x as u32, y as u32);
        model.add_point(BuildPoint::new(position, StructuralMaterialId(0), Some(IVec2::new(x, y))))
    }

    #[test]
    fn springs_are_deduplicated_by_pair() {
        let mut model = BuildModel::new(2, 1);
        let a = grid_point(&mut model, 0, 0);
        let b = grid_point(&mut model, 1, 0);
        let s1 = model.add_spring(a, b, false);
        let s2 = model.add_spring(b, a, false);
        assert_eq!(s1, s2);
        assert_eq!(model.springs.len(), 1);
        assert_eq!(model.springs[s1].octant_at(a), Octant::E);
        assert_eq!(model.springs[s1].octant_at(b), Octant::W);
    }

    #[test]
    fn rope_spring_promotes_existing_pair() {
        let mut model = BuildModel::new(2, 1);
        let a = grid_point(&mut model, 0, 0);
        let b = grid_point(&mut model, 1, 0);
        let s = model.add_spring(a, b, false);
        assert_eq!(model.add_spring(b, a, true), s);
        assert!(model.springs[s].is_rope);
        // A later structural pass never demotes it
        model.add_spring(a, b, false);
        assert!(model.springs[s].is_rope);
        assert_eq!(model.springs.len(), 1);
    }

    #[test]
    fn matrix_is_padded() {
        let mut model = BuildModel::new(1, 1);
        let a = grid_point(&mut model, 0, 0);
        assert_eq!(model.matrix.get(IVec2::new(0, 0)), Some(a));
        assert_eq!(model.matrix.neighbor(IVec2::new(0, 0), Octant::SW), None);
        assert_eq!(model.matrix.get(IVec2::new(-5, 3)), None);
    }

    #[test]
    fn rope_segment_takes_two_endpoints() {
        let mut rope = RopeSegment::new(ColorKey::new(1, 2, 3));
        assert!(rope.set_endpoint(0, 0));
        assert!(!rope.is_complete());
        assert!(rope.set_endpoint(4, 0));
        assert!(rope.is_complete());
        assert!(!rope.set_endpoint(2, 2));
    }

    #[test]
    fn off_grid_octant_is_discretized() {
        let mut model = BuildModel::new(4, 4);
        let a = grid_point(&mut model, 0, 0);
        let b = model.add_point(BuildPoint::new(Vec2::new(-2.0, 0.9), StructuralMaterialId(0), None));
        let s = model.add_spring(a, b, true);
        // Nearly straight up from (-2, 0)
        assert_eq!(model.springs[s].octant_at(a), Octant::N);
    }
}
