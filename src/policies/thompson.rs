use super::Policy;

use rand::rngs::SmallRng;
use rand_distr::{Beta, Distribution};
use std::cmp::Ordering;

#[derive(Clone, Debug)]
struct BetaPosterior {
    alpha: f64,
    beta: f64,
}

impl Default for BetaPosterior {
    fn default() -> Self {
        // uniform prior
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

/// Beta-Bernoulli Thompson sampling. Rewards are clamped to [0, 1] before
/// the posterior update, so the posterior parameters stay valid.
#[derive(Clone, Debug)]
pub struct ThompsonSampling {
    arms: Vec<BetaPosterior>,
}

impl ThompsonSampling {
    pub fn new(arms: usize) -> Self {
        Self {
            arms: vec![BetaPosterior::default(); arms],
        }
    }
}

impl Policy for ThompsonSampling {
    fn choose(&mut self, _t: usize, rng: &mut SmallRng) -> usize {
        // sample from each arm's posterior and select the best statistic
        self.arms
            .iter()
            .enumerate()
            .filter_map(|(arm, posterior)| {
                Beta::new(posterior.alpha, posterior.beta)
                    .ok()
                    .map(|dist| (arm, dist.sample(rng)))
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0)
    }

    fn update(&mut self, arm: usize, reward: f64) {
        let reward = reward.clamp(0.0, 1.0);
        let posterior = &mut self.arms[arm];
        posterior.alpha += reward;
        posterior.beta += 1.0 - reward;
    }
}
