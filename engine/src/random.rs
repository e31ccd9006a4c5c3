//! Game Random Engine
//!
//! Every probabilistic tool draws from an explicitly passed [`GameRandom`].
//! Results are reproducible when the seed and the order of calls are.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct GameRandom {
    rng: StdRng,
}

impl GameRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform_real(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// Uniform real in `[min, max)`; returns `min` for an empty range.
    pub fn uniform_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// `true` with the given probability.
    pub fn uniform_bool(&mut self, probability: f32) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.rng.gen_bool(probability as f64)
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    pub fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.gen_range(0..len.max(1))
    }

    pub fn random_unit_direction(&mut self) -> Vec2 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Random vector with magnitude in `[min_magnitude, max_magnitude)`.
    pub fn random_radial(&mut self, min_magnitude: f32, max_magnitude: f32) -> Vec2 {
        let magnitude = self.uniform_range(min_magnitude, max_magnitude);
        self.random_unit_direction() * magnitude
    }
}

impl Default for GameRandom {
    fn default() -> Self {
        Self::from_seed(0x5eed)
    }
}
