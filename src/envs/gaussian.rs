use super::{Environment, Family};
use crate::errors::ExperimentError;

use rand::{rngs::SmallRng, Rng};
use rand_distr::{Distribution, Normal, StandardNormal};

/// Environment with normally distributed rewards, one mean per arm and a
/// shared standard deviation.
#[derive(Clone, Debug)]
pub struct GaussianEnv {
    means: Vec<f64>,
    dists: Vec<Normal<f64>>,
}

impl GaussianEnv {
    pub fn new(means: Vec<f64>, std_dev: f64) -> Result<Self, ExperimentError> {
        if means.is_empty() {
            return Err(ExperimentError::InvalidScenario(
                "at least one arm is required".to_string(),
            ));
        }
        if means.iter().any(|mu| !mu.is_finite()) {
            return Err(ExperimentError::InvalidScenario(
                "arm means must be finite".to_string(),
            ));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ExperimentError::InvalidScenario(
                "standard deviation must be finite and non-negative".to_string(),
            ));
        }

        let dists = means
            .iter()
            .map(|&mu| Normal::new(mu, std_dev))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExperimentError::InvalidScenario(e.to_string()))?;

        Ok(Self { means, dists })
    }

    /// Instance with standard-normal means and unit variance.
    pub fn random(arms: usize, rng: &mut SmallRng) -> Result<Self, ExperimentError> {
        let means = (0..arms).map(|_| rng.sample(StandardNormal)).collect();
        Self::new(means, 1.0)
    }
}

impl Environment for GaussianEnv {
    fn family(&self) -> Family {
        Family::Gaussian
    }

    fn arm_count(&self) -> usize {
        self.means.len()
    }

    fn sample(&self, arm: usize, rng: &mut SmallRng) -> f64 {
        self.dists[arm].sample(rng)
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.means[arm]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    #[test]
    fn rejects_invalid_parameters() {
        assert!(GaussianEnv::new(vec![], 1.0).is_err());
        assert!(GaussianEnv::new(vec![0.0], -1.0).is_err());
        assert!(GaussianEnv::new(vec![f64::NAN], 1.0).is_err());
    }

    #[test]
    fn zero_variance_reward_equals_the_mean() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = GaussianEnv::new(vec![0.3, -1.5], 0.0).unwrap();

        assert_eq!(env.sample(0, &mut rng), 0.3);
        assert_eq!(env.sample(1, &mut rng), -1.5);
    }

    #[test]
    fn sample_mean_approaches_expected_reward() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = GaussianEnv::new(vec![2.0], 1.0).unwrap();

        let n = 20_000;
        let total: f64 = (0..n).map(|_| env.sample(0, &mut rng)).sum();
        assert!((total / n as f64 - 2.0).abs() < 0.05);
    }
}
