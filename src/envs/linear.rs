use super::{Environment, Family};
use crate::errors::ExperimentError;

use rand::{rngs::SmallRng, Rng};
use rand_distr::{Distribution, Normal, StandardNormal};
use std::cmp::Ordering;

/// Environment where each arm's expected reward is the inner product of its
/// feature vector with a hidden weight vector, observed under additive
/// Gaussian noise. The best arm is analytically known.
#[derive(Clone, Debug)]
pub struct LinearGaussianEnv {
    features: Vec<Vec<f64>>,
    means: Vec<f64>,
    noise: Normal<f64>,
    best: usize,
}

impl LinearGaussianEnv {
    pub fn new(
        features: Vec<Vec<f64>>,
        weights: Vec<f64>,
        noise_std: f64,
    ) -> Result<Self, ExperimentError> {
        if features.is_empty() {
            return Err(ExperimentError::InvalidScenario(
                "at least one arm is required".to_string(),
            ));
        }
        if weights.is_empty() {
            return Err(ExperimentError::InvalidScenario(
                "feature dimension must be positive".to_string(),
            ));
        }
        if features.iter().any(|x| x.len() != weights.len()) {
            return Err(ExperimentError::InvalidScenario(
                "every arm must have one feature per weight".to_string(),
            ));
        }
        let finite = features
            .iter()
            .flatten()
            .chain(&weights)
            .all(|v| v.is_finite());
        if !finite {
            return Err(ExperimentError::InvalidScenario(
                "features and weights must be finite".to_string(),
            ));
        }
        if !noise_std.is_finite() || noise_std < 0.0 {
            return Err(ExperimentError::InvalidScenario(
                "noise scale must be finite and non-negative".to_string(),
            ));
        }

        let means: Vec<f64> = features
            .iter()
            .map(|x| x.iter().zip(&weights).map(|(xi, wi)| xi * wi).sum())
            .collect();
        let best = means
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0);
        let noise = Normal::new(0.0, noise_std)
            .map_err(|e| ExperimentError::InvalidScenario(e.to_string()))?;

        Ok(Self {
            features,
            means,
            noise,
            best,
        })
    }

    /// Instance with features uniform on [-1/sqrt(d), 1/sqrt(d)] per
    /// coordinate and standard-normal weights.
    pub fn random(
        arms: usize,
        dim: usize,
        noise_std: f64,
        rng: &mut SmallRng,
    ) -> Result<Self, ExperimentError> {
        if arms == 0 || dim == 0 {
            return Err(ExperimentError::InvalidScenario(
                "arm count and feature dimension must be positive".to_string(),
            ));
        }

        let scale = 1.0 / (dim as f64).sqrt();
        let features = (0..arms)
            .map(|_| (0..dim).map(|_| rng.gen_range(-scale..=scale)).collect())
            .collect();
        let weights = (0..dim).map(|_| rng.sample(StandardNormal)).collect();
        Self::new(features, weights, noise_std)
    }
}

impl Environment for LinearGaussianEnv {
    fn family(&self) -> Family {
        Family::LinearGaussian
    }

    fn arm_count(&self) -> usize {
        self.features.len()
    }

    fn sample(&self, arm: usize, rng: &mut SmallRng) -> f64 {
        self.means[arm] + self.noise.sample(rng)
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.means[arm]
    }

    fn features(&self, arm: usize) -> Option<&[f64]> {
        self.features.get(arm).map(|x| x.as_slice())
    }

    fn best_arm(&self) -> usize {
        self.best
    }

    fn best_expected_reward(&self) -> f64 {
        self.means[self.best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    #[test]
    fn rejects_mismatched_dimensions() {
        let features = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(LinearGaussianEnv::new(features, vec![1.0, 1.0], 0.1).is_err());
        assert!(LinearGaussianEnv::new(vec![], vec![1.0], 0.1).is_err());
        assert!(LinearGaussianEnv::new(vec![vec![1.0]], vec![1.0], -0.1).is_err());
    }

    #[test]
    fn best_arm_is_the_largest_inner_product() {
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]];
        let env = LinearGaussianEnv::new(features, vec![0.2, 0.9], 0.0).unwrap();

        assert_eq!(env.best_arm(), 1);
        assert_eq!(env.best_expected_reward(), 0.9);
        assert_eq!(env.expected_reward(2), 0.55);
    }

    #[test]
    fn noiseless_samples_equal_expected_rewards() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = LinearGaussianEnv::random(4, 3, 0.0, &mut rng).unwrap();

        for arm in 0..4 {
            assert_eq!(env.sample(arm, &mut rng), env.expected_reward(arm));
        }
    }

    #[test]
    fn exposes_arm_features() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = LinearGaussianEnv::random(3, 5, 1.0, &mut rng).unwrap();

        for arm in 0..3 {
            assert_eq!(env.features(arm).map(|x| x.len()), Some(5));
        }
        assert!(env.features(3).is_none());
    }
}
