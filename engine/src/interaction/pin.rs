//! Pinning
//!
//! Pinned particles are frozen in place: grips skip them and their velocity is
//! zeroed. The ship keeps at most [`MAX_PINNED_POINTS`]; pinning one more
//! releases the oldest pin.

use glam::Vec2;

use crate::ship::{PointIndex, Ship};
use crate::world::SimulationParameters;

pub const MAX_PINNED_POINTS: usize = 64;

impl Ship {
    /// Unpin the nearest pinned particle near `position`, or else pin the
    /// nearest free one. Returns whether a pin was toggled.
    pub fn toggle_pin_at(&mut self, position: Vec2, params: &SimulationParameters) -> bool {
        let candidates = self.points_within(position, params.tool_search_radius);
        let nearest = |pinned: bool| {
            candidates
                .iter()
                .filter(|&&(p, _)| self.points.is_pinned(p) == pinned && !self.points.is_detached(p))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|&(p, _)| p)
        };

        let (nearest_pinned, nearest_free) = (nearest(true), nearest(false));

        if let Some(p) = nearest_pinned {
            self.unpin(p);
            return true;
        }
        let Some(p) = nearest_free else {
            return false;
        };

        if self.pinned_points.len() >= MAX_PINNED_POINTS {
            if let Some(oldest) = self.pinned_points.front().copied() {
                self.unpin(oldest);
            }
        }
        self.points.set_pinned(p, true);
        self.points.set_velocity(p, Vec2::ZERO);
        self.pinned_points.push_back(p);
        log::trace!("pinned {:?}", p);
        true
    }

    fn unpin(&mut self, p: PointIndex) {
        self.points.set_pinned(p, false);
        self.pinned_points.retain(|&x| x != p);
        log::trace!("unpinned {:?}", p);
    }
}
