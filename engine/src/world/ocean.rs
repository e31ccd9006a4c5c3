//! Ocean surface collaborator.
//!
//! The ocean simulation itself lives outside this crate; tools only need to know
//! where the surface is.

use glam::Vec2;

pub trait OceanSurface {
    /// Height of the water surface at world x.
    fn height_at(&self, x: f32) -> f32;

    fn is_underwater(&self, pos: Vec2) -> bool {
        pos.y < self.height_at(pos.x)
    }

    /// Depth below the surface; negative above water.
    fn depth(&self, pos: Vec2) -> f32 {
        self.height_at(pos.x) - pos.y
    }
}

/// A perfectly calm ocean at a fixed level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatOcean {
    pub level: f32,
}

impl FlatOcean {
    pub fn new(level: f32) -> Self {
        Self { level }
    }
}

impl OceanSurface for FlatOcean {
    fn height_at(&self, _x: f32) -> f32 {
        self.level
    }
}
