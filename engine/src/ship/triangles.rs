//! Triangles
//!
//! The triangulated surface of the ship, wound counter-clockwise, each triangle
//! knowing its three bounding springs.

use bytemuck::{Pod, Zeroable};

use super::index::{PointIndex, SpringIndex, TriangleIndex};

/// GPU-ready triangle record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct TriangleVertexIndices {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

static_assertions::assert_eq_size!(TriangleVertexIndices, [u32; 3]);

#[derive(Debug, Clone, Default)]
pub struct Triangles {
    points: Vec<[PointIndex; 3]>,
    sub_springs: Vec<[SpringIndex; 3]>,
    is_deleted: Vec<bool>,
}

impl Triangles {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            points: Vec::with_capacity(n),
            sub_springs: Vec::with_capacity(n),
            is_deleted: Vec::with_capacity(n),
        }
    }

    pub fn add(&mut self, points: [PointIndex; 3], sub_springs: [SpringIndex; 3]) -> TriangleIndex {
        let index = TriangleIndex::new(self.points.len());
        self.points.push(points);
        self.sub_springs.push(sub_springs);
        self.is_deleted.push(false);
        index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = TriangleIndex> + use<> {
        (0..self.points.len()).map(TriangleIndex::new)
    }

    pub fn live_count(&self) -> usize {
        self.is_deleted.iter().filter(|&&d| !d).count()
    }

    pub fn points(&self, t: TriangleIndex) -> [PointIndex; 3] {
        self.points[t.index()]
    }

    pub fn sub_springs(&self, t: TriangleIndex) -> [SpringIndex; 3] {
        self.sub_springs[t.index()]
    }

    pub fn is_deleted(&self, t: TriangleIndex) -> bool {
        self.is_deleted[t.index()]
    }

    pub(crate) fn mark_deleted(&mut self, t: TriangleIndex) {
        self.is_deleted[t.index()] = true;
    }

    /// Index buffer of the live triangles.
    pub fn live_index_buffer(&self) -> Vec<TriangleVertexIndices> {
        self.indices()
            .filter(|&t| !self.is_deleted(t))
            .map(|t| {
                let [a, b, c] = self.points(t);
                TriangleVertexIndices {
                    a: a.raw(),
                    b: b.raw(),
                    c: c.raw(),
                }
            })
            .collect()
    }
}
