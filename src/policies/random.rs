use super::Policy;

use rand::{rngs::SmallRng, Rng};

/// Uniform-random reference policy.
#[derive(Clone, Debug)]
pub struct Random {
    arms: usize,
}

impl Random {
    pub fn new(arms: usize) -> Self {
        Self { arms }
    }
}

impl Policy for Random {
    fn choose(&mut self, _t: usize, rng: &mut SmallRng) -> usize {
        rng.gen_range(0..self.arms)
    }

    fn update(&mut self, _arm: usize, _reward: f64) {}
}
