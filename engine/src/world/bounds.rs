//! World Bounds
//!
//! Every particle lives inside a fixed rectangle centered on the origin.
//! Position-mutating tools finish with a trimming pass against it.

use glam::Vec2;

/// The simulation's world rectangle, `[-half_width, half_width] x [-half_height, half_height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            half_width: 2500.0,
            half_height: 1500.0,
        }
    }
}

impl WorldBounds {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= -self.half_width
            && pos.x <= self.half_width
            && pos.y >= -self.half_height
            && pos.y <= self.half_height
    }

    /// Clamp a position to the rectangle.
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(-self.half_width, self.half_width),
            pos.y.clamp(-self.half_height, self.half_height),
        )
    }

    /// Clamp a position and cancel the velocity component that points out of the world.
    ///
    /// Returns `true` when the position had to be trimmed.
    pub fn trim(&self, pos: &mut Vec2, vel: &mut Vec2) -> bool {
        let mut trimmed = false;

        if pos.x < -self.half_width {
            pos.x = -self.half_width;
            vel.x = vel.x.max(0.0);
            trimmed = true;
        } else if pos.x > self.half_width {
            pos.x = self.half_width;
            vel.x = vel.x.min(0.0);
            trimmed = true;
        }

        if pos.y < -self.half_height {
            pos.y = -self.half_height;
            vel.y = vel.y.max(0.0);
            trimmed = true;
        } else if pos.y > self.half_height {
            pos.y = self.half_height;
            vel.y = vel.y.min(0.0);
            trimmed = true;
        }

        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_world() {
        let bounds = WorldBounds::new(50.0, 20.0);
        let clamped = bounds.clamp(Vec2::new(100.0, -75.0));
        assert_eq!(clamped, Vec2::new(50.0, -20.0));
    }

    #[test]
    fn test_trim_cancels_outward_velocity() {
        let bounds = WorldBounds::new(10.0, 10.0);
        let mut pos = Vec2::new(12.0, 3.0);
        let mut vel = Vec2::new(4.0, -1.0);
        assert!(bounds.trim(&mut pos, &mut vel));
        assert_eq!(pos, Vec2::new(10.0, 3.0));
        assert_eq!(vel, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_trim_inside_is_noop() {
        let bounds = WorldBounds::default();
        let mut pos = Vec2::new(1.0, 2.0);
        let mut vel = Vec2::new(3.0, 4.0);
        assert!(!bounds.trim(&mut pos, &mut vel));
        assert_eq!(pos, Vec2::new(1.0, 2.0));
        assert_eq!(vel, Vec2::new(3.0, 4.0));
    }
}
