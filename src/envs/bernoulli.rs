use super::{Environment, Family};
use crate::errors::ExperimentError;

use rand::{rngs::SmallRng, Rng};

/// Environment with {0, 1} rewards and one success probability per arm.
#[derive(Clone, Debug)]
pub struct BernoulliEnv {
    probs: Vec<f64>,
}

impl BernoulliEnv {
    pub fn new(probs: Vec<f64>) -> Result<Self, ExperimentError> {
        if probs.is_empty() {
            return Err(ExperimentError::InvalidScenario(
                "at least one arm is required".to_string(),
            ));
        }
        if probs.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(ExperimentError::InvalidScenario(
                "success probabilities must lie in [0, 1]".to_string(),
            ));
        }

        Ok(Self { probs })
    }

    /// Instance with independent uniform success probabilities.
    pub fn random(arms: usize, rng: &mut SmallRng) -> Result<Self, ExperimentError> {
        Self::new((0..arms).map(|_| rng.gen::<f64>()).collect())
    }
}

impl Environment for BernoulliEnv {
    fn family(&self) -> Family {
        Family::Bernoulli
    }

    fn arm_count(&self) -> usize {
        self.probs.len()
    }

    fn sample(&self, arm: usize, rng: &mut SmallRng) -> f64 {
        (rng.gen::<f64>() < self.probs[arm]) as u8 as f64
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.probs[arm]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    #[test]
    fn rejects_out_of_range_probabilities() {
        assert!(BernoulliEnv::new(vec![0.5, 1.2]).is_err());
        assert!(BernoulliEnv::new(vec![-0.1]).is_err());
        assert!(BernoulliEnv::new(vec![]).is_err());
    }

    #[test]
    fn extreme_arms_are_deterministic() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = BernoulliEnv::new(vec![1.0, 0.0]).unwrap();

        for _ in 0..100 {
            assert_eq!(env.sample(0, &mut rng), 1.0);
            assert_eq!(env.sample(1, &mut rng), 0.0);
        }
    }

    #[test]
    fn random_instance_is_valid() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = BernoulliEnv::random(10, &mut rng).unwrap();

        assert_eq!(env.arm_count(), 10);
        for arm in 0..10 {
            let p = env.expected_reward(arm);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
