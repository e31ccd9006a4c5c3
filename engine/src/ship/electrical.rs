//! Electrical Elements
//!
//! One element per electrical particle, wired to its neighbors through the
//! springs of the structure.

use super::index::{ElectricalElementIndex, PointIndex};
use crate::material::{ElectricalElementKind, ElectricalMaterialId};

#[derive(Debug, Clone, Default)]
pub struct ElectricalElements {
    kind: Vec<ElectricalElementKind>,
    material: Vec<ElectricalMaterialId>,
    instance_index: Vec<Option<u32>>,
    point: Vec<PointIndex>,
    is_on: Vec<bool>,
    is_deleted: Vec<bool>,
    connected: Vec<Vec<ElectricalElementIndex>>,
}

impl ElectricalElements {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            kind: Vec::with_capacity(n),
            material: Vec::with_capacity(n),
            instance_index: Vec::with_capacity(n),
            point: Vec::with_capacity(n),
            is_on: Vec::with_capacity(n),
            is_deleted: Vec::with_capacity(n),
            connected: Vec::with_capacity(n),
        }
    }

    pub fn add(
        &mut self,
        kind: ElectricalElementKind,
        material: ElectricalMaterialId,
        instance_index: Option<u32>,
        point: PointIndex,
    ) -> ElectricalElementIndex {
        let index = ElectricalElementIndex::new(self.kind.len());
        self.kind.push(kind);
        self.material.push(material);
        self.instance_index.push(instance_index);
        self.point.push(point);
        self.is_on.push(kind.initial_state());
        self.is_deleted.push(false);
        self.connected.push(Vec::new());
        index
    }

    /// Wire two elements together; wiring is symmetric and deduplicated.
    pub fn connect(&mut self, a: ElectricalElementIndex, b: ElectricalElementIndex) {
        if a == b || self.connected[a.index()].contains(&b) {
            return;
        }
        self.connected[a.index()].push(b);
        self.connected[b.index()].push(a);
    }

    pub(crate) fn disconnect(&mut self, a: ElectricalElementIndex, b: ElectricalElementIndex) {
        self.connected[a.index()].retain(|&x| x != b);
        self.connected[b.index()].retain(|&x| x != a);
    }

    pub fn len(&self) -> usize {
        self.kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn contains(&self, e: ElectricalElementIndex) -> bool {
        e.index() < self.kind.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = ElectricalElementIndex> + use<> {
        (0..self.kind.len()).map(ElectricalElementIndex::new)
    }

    pub fn kind(&self, e: ElectricalElementIndex) -> ElectricalElementKind {
        self.kind[e.index()]
    }

    pub fn material(&self, e: ElectricalElementIndex) -> ElectricalMaterialId {
        self.material[e.index()]
    }

    pub fn instance_index(&self, e: ElectricalElementIndex) -> Option<u32> {
        self.instance_index[e.index()]
    }

    pub fn point(&self, e: ElectricalElementIndex) -> PointIndex {
        self.point[e.index()]
    }

    pub fn is_on(&self, e: ElectricalElementIndex) -> bool {
        self.is_on[e.index()]
    }

    pub(crate) fn set_on(&mut self, e: ElectricalElementIndex, on: bool) {
        self.is_on[e.index()] = on;
    }

    pub fn is_deleted(&self, e: ElectricalElementIndex) -> bool {
        self.is_deleted[e.index()]
    }

    /// Destroy an element and unwire it from its neighbors.
    pub(crate) fn destroy(&mut self, e: ElectricalElementIndex) {
        if self.is_deleted[e.index()] {
            return;
        }
        self.is_deleted[e.index()] = true;
        self.is_on[e.index()] = false;
        let neighbors = std::mem::take(&mut self.connected[e.index()]);
        for n in neighbors {
            self.connected[n.index()].retain(|&x| x != e);
        }
    }

    pub fn connected(&self, e: ElectricalElementIndex) -> &[ElectricalElementIndex] {
        &self.connected[e.index()]
    }

    pub fn find_instance(&self, kind: ElectricalElementKind, instance: u32) -> Option<ElectricalElementIndex> {
        self.indices()
            .find(|&e| self.kind(e) == kind && self.instance_index(e) == Some(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiring_is_symmetric_and_cut_on_destroy() {
        let mut elements = ElectricalElements::with_capacity(3);
        let a = elements.add(ElectricalElementKind::Generator, ElectricalMaterialId(0), None, PointIndex::new(0));
        let b = elements.add(ElectricalElementKind::Cable, ElectricalMaterialId(1), None, PointIndex::new(1));
        let c = elements.add(ElectricalElementKind::Lamp, ElectricalMaterialId(2), None, PointIndex::new(2));
        elements.connect(a, b);
        elements.connect(b, c);
        elements.connect(c, b);

        assert_eq!(elements.connected(b), &[a, c]);
        assert_eq!(elements.connected(c), &[b]);

        elements.destroy(b);
        assert!(elements.is_deleted(b));
        assert!(elements.connected(a).is_empty());
        assert!(elements.connected(c).is_empty());
    }

    #[test]
    fn initial_state_by_kind() {
        let mut elements = ElectricalElements::with_capacity(2);
        let g = elements.add(ElectricalElementKind::Generator, ElectricalMaterialId(0), None, PointIndex::new(0));
        let s = elements.add(ElectricalElementKind::Switch, ElectricalMaterialId(1), Some(0), PointIndex::new(1));
        assert!(elements.is_on(g));
        assert!(!elements.is_on(s));
        assert_eq!(elements.find_instance(ElectricalElementKind::Switch, 0), Some(s));
    }
}
