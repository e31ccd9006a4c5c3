//! Springs
//!
//! Struct-of-arrays storage for the edges of the mesh. Each spring remembers the
//! (at most two) triangles it bounds so cutting tools can take triangles down
//! with it.

use super::index::{PointIndex, SpringIndex, TriangleIndex};
use crate::material::StructuralMaterialId;

/// Attributes of a spring at emission time.
#[derive(Debug, Clone, Copy)]
pub struct SpringSpec {
    pub endpoints: [PointIndex; 2],
    pub rest_length: f32,
    pub material: StructuralMaterialId,
    pub stiffness: f32,
    pub damping: f32,
    pub is_rope: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Springs {
    endpoints: Vec<[PointIndex; 2]>,
    rest_length: Vec<f32>,
    material: Vec<StructuralMaterialId>,
    stiffness_coefficient: Vec<f32>,
    damping_coefficient: Vec<f32>,
    is_rope: Vec<bool>,
    is_deleted: Vec<bool>,
    super_triangles: Vec<Vec<TriangleIndex>>,
}

impl Springs {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            endpoints: Vec::with_capacity(n),
            rest_length: Vec::with_capacity(n),
            material: Vec::with_capacity(n),
            stiffness_coefficient: Vec::with_capacity(n),
            damping_coefficient: Vec::with_capacity(n),
            is_rope: Vec::with_capacity(n),
            is_deleted: Vec::with_capacity(n),
            super_triangles: Vec::with_capacity(n),
        }
    }

    pub fn add(&mut self, spec: SpringSpec) -> SpringIndex {
        let index = SpringIndex::new(self.endpoints.len());
        self.endpoints.push(spec.endpoints);
        self.rest_length.push(spec.rest_length);
        self.material.push(spec.material);
        self.stiffness_coefficient.push(spec.stiffness);
        self.damping_coefficient.push(spec.damping);
        self.is_rope.push(spec.is_rope);
        self.is_deleted.push(false);
        self.super_triangles.push(Vec::with_capacity(2));
        index
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn contains(&self, s: SpringIndex) -> bool {
        s.index() < self.endpoints.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = SpringIndex> + use<> {
        (0..self.endpoints.len()).map(SpringIndex::new)
    }

    pub fn live_count(&self) -> usize {
        self.is_deleted.iter().filter(|&&d| !d).count()
    }

    pub fn endpoints(&self, s: SpringIndex) -> [PointIndex; 2] {
        self.endpoints[s.index()]
    }

    /// The endpoint that is not `p`.
    pub fn other_endpoint(&self, s: SpringIndex, p: PointIndex) -> PointIndex {
        let [a, b] = self.endpoints[s.index()];
        if a == p { b } else { a }
    }

    pub fn rest_length(&self, s: SpringIndex) -> f32 {
        self.rest_length[s.index()]
    }

    pub fn material(&self, s: SpringIndex) -> StructuralMaterialId {
        self.material[s.index()]
    }

    pub fn stiffness_coefficient(&self, s: SpringIndex) -> f32 {
        self.stiffness_coefficient[s.index()]
    }

    pub fn damping_coefficient(&self, s: SpringIndex) -> f32 {
        self.damping_coefficient[s.index()]
    }

    pub fn is_rope(&self, s: SpringIndex) -> bool {
        self.is_rope[s.index()]
    }

    pub fn is_deleted(&self, s: SpringIndex) -> bool {
        self.is_deleted[s.index()]
    }

    pub(crate) fn mark_deleted(&mut self, s: SpringIndex) {
        self.is_deleted[s.index()] = true;
    }

    pub fn super_triangles(&self, s: SpringIndex) -> &[TriangleIndex] {
        &self.super_triangles[s.index()]
    }

    pub(crate) fn add_super_triangle(&mut self, s: SpringIndex, t: TriangleIndex) {
        debug_assert!(self.super_triangles[s.index()].len() < 2);
        self.super_triangles[s.index()].push(t);
    }

    pub(crate) fn remove_super_triangle(&mut self, s: SpringIndex, t: TriangleIndex) {
        self.super_triangles[s.index()].retain(|&x| x != t);
    }

    /// Endpoint pairs as raw indices, for line rendering of live springs.
    pub fn live_index_buffer(&self) -> Vec<[u32; 2]> {
        self.indices()
            .filter(|&s| !self.is_deleted(s))
            .map(|s| {
                let [a, b] = self.endpoints(s);
                [a.raw(), b.raw()]
            })
            .collect()
    }
}
