use super::arm::ArmEstimate;
use super::Policy;

use rand::rngs::SmallRng;
use std::cmp::Ordering;

/// Explore-then-commit: pull every arm `rounds` times round-robin, then
/// commit to the arm with the best empirical mean for the rest of the run.
#[derive(Clone, Debug)]
pub struct ExploreCommit {
    rounds: usize,
    arms: Vec<ArmEstimate>,
    committed: Option<usize>,
}

impl ExploreCommit {
    pub fn new(arms: usize, rounds: usize) -> Self {
        Self {
            rounds,
            arms: vec![ArmEstimate::default(); arms],
            committed: None,
        }
    }
}

impl Policy for ExploreCommit {
    fn choose(&mut self, t: usize, _rng: &mut SmallRng) -> usize {
        let arms = self.arms.len();
        if t < self.rounds * arms {
            t % arms
        } else if let Some(arm) = self.committed {
            arm
        } else {
            let best = self
                .arms
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal))
                .map(|(arm, _)| arm)
                .unwrap_or(0);
            self.committed = Some(best);
            best
        }
    }

    fn update(&mut self, arm: usize, reward: f64) {
        self.arms[arm].observe(reward);
    }
}
