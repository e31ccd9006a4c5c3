//! Frontiers
//!
//! Closed loops of boundary springs: one external loop per solid region and one
//! internal loop per hole.

use super::index::SpringIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierKind {
    /// Outer hull, traversed counter-clockwise.
    External,
    /// Hole, traversed clockwise.
    Internal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frontier {
    pub kind: FrontierKind,
    /// Springs in traversal order; the last one closes back onto the first.
    pub edges: Vec<SpringIndex>,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Frontiers {
    frontiers: Vec<Frontier>,
}

impl Frontiers {
    pub fn new(frontiers: Vec<Frontier>) -> Self {
        Self { frontiers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frontier> {
        self.frontiers.iter()
    }

    pub fn len(&self) -> usize {
        self.frontiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frontiers.is_empty()
    }

    pub fn count_of(&self, kind: FrontierKind) -> usize {
        self.frontiers.iter().filter(|f| f.kind == kind).count()
    }
}
