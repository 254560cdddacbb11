use super::arm::ArmEstimate;
use super::Policy;

use rand::{rngs::SmallRng, seq::IteratorRandom};
use std::cmp::Ordering;

/// UCB1 with exploration factor `rho`: empirical mean plus
/// `rho * sqrt(ln(t) / (2 n_k))`.
#[derive(Clone, Debug)]
pub struct Ucb1 {
    rho: f64,
    arms: Vec<ArmEstimate>,
}

impl Ucb1 {
    pub fn new(arms: usize, rho: f64) -> Self {
        Self {
            rho,
            arms: vec![ArmEstimate::default(); arms],
        }
    }
}

impl Policy for Ucb1 {
    fn choose(&mut self, t: usize, rng: &mut SmallRng) -> usize {
        // sample random arms while some have never been pulled, then the one
        // with the best index
        if let Some(arm) = self
            .arms
            .iter()
            .enumerate()
            .filter(|(_, arm)| arm.pulls == 0)
            .map(|(arm, _)| arm)
            .choose(rng)
        {
            return arm;
        }

        self.arms
            .iter()
            .enumerate()
            .map(|(arm, estimate)| {
                let bonus = ((t as f64).ln() / (2.0 * estimate.pulls as f64)).sqrt();
                (arm, estimate.mean + self.rho * bonus)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0)
    }

    fn update(&mut self, arm: usize, reward: f64) {
        self.arms[arm].observe(reward);
    }
}

/// MOSS with exploration factor `rho`: empirical mean plus
/// `rho * sqrt(max(ln(T / (K n_k)), 0) / n_k)`, where T is the horizon.
#[derive(Clone, Debug)]
pub struct Moss {
    rho: f64,
    horizon: usize,
    arms: Vec<ArmEstimate>,
}

impl Moss {
    pub fn new(arms: usize, horizon: usize, rho: f64) -> Self {
        Self {
            rho,
            horizon,
            arms: vec![ArmEstimate::default(); arms],
        }
    }
}

impl Policy for Moss {
    fn choose(&mut self, _t: usize, rng: &mut SmallRng) -> usize {
        if let Some(arm) = self
            .arms
            .iter()
            .enumerate()
            .filter(|(_, arm)| arm.pulls == 0)
            .map(|(arm, _)| arm)
            .choose(rng)
        {
            return arm;
        }

        let arms = self.arms.len() as f64;
        self.arms
            .iter()
            .enumerate()
            .map(|(arm, estimate)| {
                let pulls = estimate.pulls as f64;
                let log_term = (self.horizon as f64 / (arms * pulls)).ln().max(0.0);
                (arm, estimate.mean + self.rho * (log_term / pulls).sqrt())
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0)
    }

    fn update(&mut self, arm: usize, reward: f64) {
        self.arms[arm].observe(reward);
    }
}
