//! Octants
//!
//! The eight neighbor directions of a pixel, numbered counter-clockwise from east
//! with y pointing up.

use glam::IVec2;

/// Neighbor offsets indexed by octant number.
pub const OCTANT_DELTAS: [(i32, i32); 8] = [
    (1, 0),   // E
    (1, 1),   // NE
    (0, 1),   // N
    (-1, 1),  // NW
    (-1, 0),  // W
    (-1, -1), // SW
    (0, -1),  // S
    (1, -1),  // SE
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

impl Octant {
    pub const E: Octant = Octant(0);
    pub const NE: Octant = Octant(1);
    pub const N: Octant = Octant(2);
    pub const NW: Octant = Octant(3);
    pub const W: Octant = Octant(4);
    pub const SW: Octant = Octant(5);
    pub const S: Octant = Octant(6);
    pub const SE: Octant = Octant(7);

    pub const fn new(value: u8) -> Self {
        Self(value % 8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn delta(self) -> IVec2 {
        let (dx, dy) = OCTANT_DELTAS[self.0 as usize];
        IVec2::new(dx, dy)
    }

    /// The octant pointing from a cell to its neighbor at `delta`, if adjacent.
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        OCTANT_DELTAS
            .iter()
            .position(|&(dx, dy)| dx == delta.x && dy == delta.y)
            .map(|i| Octant(i as u8))
    }

    pub const fn opposite(self) -> Self {
        Self((self.0 + 4) % 8)
    }

    /// Next octant turning clockwise.
    pub const fn clockwise(self) -> Self {
        Self((self.0 + 7) % 8)
    }

    /// Next octant turning counter-clockwise.
    pub const fn counter_clockwise(self) -> Self {
        Self((self.0 + 1) % 8)
    }

    pub const fn is_diagonal(self) -> bool {
        self.0 % 2 == 1
    }
}
