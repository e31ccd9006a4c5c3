//! Ephemeral Particles
//!
//! Debris, sparkles and air bubbles living in the pool slots after the
//! structural points. They carry no springs or triangles and expire by lifetime.

use glam::Vec2;

use super::index::PointIndex;
use super::points::EphemeralType;
use super::Ship;
use crate::random::GameRandom;

const DEBRIS_LIFETIME: (f32, f32) = (0.5, 2.0);
const SPARKLE_LIFETIME: (f32, f32) = (0.2, 0.6);
const AIR_BUBBLE_LIFETIME: (f32, f32) = (1.0, 3.0);

const SPARKLE_MASS: f32 = 0.01;
const AIR_BUBBLE_MASS: f32 = 0.001;
/// Rise speed of a freshly spawned air bubble (m/s)
const AIR_BUBBLE_RISE_SPEED: f32 = 0.5;

impl Ship {
    pub fn spawn_debris(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        mass: f32,
        now: f32,
        rng: &mut GameRandom,
    ) -> Option<PointIndex> {
        let lifetime = rng.uniform_range(DEBRIS_LIFETIME.0, DEBRIS_LIFETIME.1);
        self.points
            .spawn_ephemeral(EphemeralType::Debris, position, velocity, mass, now, lifetime)
    }

    pub fn spawn_sparkle(&mut self, position: Vec2, velocity: Vec2, now: f32, rng: &mut GameRandom) -> Option<PointIndex> {
        let lifetime = rng.uniform_range(SPARKLE_LIFETIME.0, SPARKLE_LIFETIME.1);
        self.points
            .spawn_ephemeral(EphemeralType::Sparkle, position, velocity, SPARKLE_MASS, now, lifetime)
    }

    /// Spawn a bubble drifting upwards with a little horizontal jitter.
    pub fn spawn_air_bubble(&mut self, position: Vec2, now: f32, rng: &mut GameRandom) -> Option<PointIndex> {
        let velocity = Vec2::new(rng.uniform_range(-0.1, 0.1), AIR_BUBBLE_RISE_SPEED);
        let lifetime = rng.uniform_range(AIR_BUBBLE_LIFETIME.0, AIR_BUBBLE_LIFETIME.1);
        self.points
            .spawn_ephemeral(EphemeralType::AirBubble, position, velocity, AIR_BUBBLE_MASS, now, lifetime)
    }

    /// Expire particles whose lifetime has elapsed. Returns how many expired.
    pub fn update_ephemeral_particles(&mut self, now: f32) -> usize {
        let expired = self.points.update_ephemeral_particles(now);
        if expired > 0 {
            log::trace!("{} ephemeral particle(s) expired", expired);
        }
        expired
    }
}
