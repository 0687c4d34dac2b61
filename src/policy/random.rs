//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::config::SwerveConfig;

/// Uniformly random continuous actions in `[-1, 1]`.
///
/// Used for sanity checks and as a lower-bound baseline.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy with a reproducible seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_actions(&mut self, _observations: &[f32], num_agents: usize) -> Vec<f32> {
        (0..num_agents * SwerveConfig::ACTION_DIM)
            .map(|_| self.rng.gen_range(-1.0..=1.0))
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}
