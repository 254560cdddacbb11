use super::Policy;

use rand::rngs::SmallRng;

/// Always pulls the environment's latent best arm. This is the reference
/// policy the regret baseline is checked against: its cumulative regret is
/// identically zero.
#[derive(Clone, Debug)]
pub struct Oracle {
    best: usize,
}

impl Oracle {
    pub fn new(best: usize) -> Self {
        Self { best }
    }
}

impl Policy for Oracle {
    fn choose(&mut self, _t: usize, _rng: &mut SmallRng) -> usize {
        self.best
    }

    fn update(&mut self, _arm: usize, _reward: f64) {}
}
