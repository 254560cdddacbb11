use super::arm::ArmEstimate;
use super::Policy;

use rand::{rngs::SmallRng, Rng};
use std::cmp::Ordering;

/// With probability epsilon pick a uniform arm, otherwise the arm with the
/// best empirical mean.
#[derive(Clone, Debug)]
pub struct EpsilonGreedy {
    epsilon: f64,
    arms: Vec<ArmEstimate>,
}

impl EpsilonGreedy {
    pub fn new(arms: usize, epsilon: f64) -> Self {
        Self {
            epsilon,
            arms: vec![ArmEstimate::default(); arms],
        }
    }
}

impl Policy for EpsilonGreedy {
    fn choose(&mut self, _t: usize, rng: &mut SmallRng) -> usize {
        if rng.gen::<f64>() < self.epsilon {
            rng.gen_range(0..self.arms.len())
        } else {
            self.arms
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.mean.partial_cmp(&b.mean).unwrap_or(Ordering::Equal))
                .map(|(arm, _)| arm)
                .unwrap_or(0)
        }
    }

    fn update(&mut self, arm: usize, reward: f64) {
        self.arms[arm].observe(reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    #[test]
    fn greedy_choice_follows_the_best_mean() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(3, 0.0);

        policy.update(1, 1.0);
        policy.update(0, 0.2);
        policy.update(2, 0.5);

        for t in 0..50 {
            assert_eq!(policy.choose(t, &mut rng), 1);
        }
    }

    #[test]
    fn full_exploration_reaches_every_arm() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = EpsilonGreedy::new(4, 1.0);

        let mut seen = [false; 4];
        for t in 0..200 {
            seen[policy.choose(t, &mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn update_tracks_the_running_mean() {
        let mut policy = EpsilonGreedy::new(2, 0.0);

        policy.update(0, 1.0);
        policy.update(0, 0.0);

        assert_eq!(policy.arms[0].mean, 0.5);
        assert_eq!(policy.arms[1].mean, 0.0);
    }
}
