use super::{Environment, Family};
use crate::errors::ExperimentError;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{rngs::SmallRng, Rng};

/// Environment where rewards take values on a fixed finite grid. Each
/// (latent value, arm) pair owns a probability row over the grid, and the
/// instance's true latent value is drawn from a prior at construction.
#[derive(Clone, Debug)]
pub struct FiniteEnv {
    support: Vec<f64>,
    table: Vec<Vec<Vec<f64>>>, // [latent][arm][reward], rows sum to 1
    samplers: Vec<Vec<WeightedIndex<f64>>>,
    prior: Vec<f64>,
    theta: usize,
}

impl FiniteEnv {
    /// Validates and normalises the reward table and the prior, then draws
    /// the instance's latent value from the prior. Rows and priors whose sum
    /// is not positive and finite are rejected rather than normalised.
    pub fn new(
        table: Vec<Vec<Vec<f64>>>,
        prior: Vec<f64>,
        support: Vec<f64>,
        rng: &mut SmallRng,
    ) -> Result<Self, ExperimentError> {
        if table.is_empty() || prior.is_empty() || support.is_empty() {
            return Err(ExperimentError::InvalidScenario(
                "latent, arm and reward counts must be positive".to_string(),
            ));
        }
        if table.len() != prior.len() {
            return Err(ExperimentError::InvalidScenario(
                "prior length must match the number of latent values".to_string(),
            ));
        }

        let arms = table[0].len();
        if arms == 0 {
            return Err(ExperimentError::InvalidScenario(
                "at least one arm is required".to_string(),
            ));
        }

        let mut table = table;
        for rows in table.iter_mut() {
            if rows.len() != arms {
                return Err(ExperimentError::InvalidScenario(
                    "every latent value must cover the same arms".to_string(),
                ));
            }
            for row in rows.iter_mut() {
                if row.len() != support.len() {
                    return Err(ExperimentError::InvalidScenario(
                        "reward rows must match the support size".to_string(),
                    ));
                }
                normalize(row, "reward row")?;
            }
        }

        let mut prior = prior;
        normalize(&mut prior, "prior")?;

        let samplers = table
            .iter()
            .map(|rows| {
                rows.iter()
                    .map(|row| WeightedIndex::new(row))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExperimentError::InvalidScenario(e.to_string()))?;

        let theta = WeightedIndex::new(&prior)
            .map_err(|e| ExperimentError::InvalidScenario(e.to_string()))?
            .sample(rng);

        Ok(Self {
            support,
            table,
            samplers,
            prior,
            theta,
        })
    }

    /// Instance with uniformly drawn reward weights and a random prior.
    pub fn random(
        latents: usize,
        arms: usize,
        rewards: usize,
        rng: &mut SmallRng,
    ) -> Result<Self, ExperimentError> {
        if latents == 0 || arms == 0 || rewards == 0 {
            return Err(ExperimentError::InvalidScenario(
                "latent, arm and reward counts must be positive".to_string(),
            ));
        }

        let table = random_table(latents, arms, rewards, rng);
        let prior = (0..latents).map(|_| rng.gen::<f64>()).collect();
        Self::new(table, prior, linspace(0.0, 1.0, rewards), rng)
    }

    /// Fixed-shape instance with 2 latent values, 5 arms, 11 rewards and the
    /// prior [0.35, 0.65], for reproducible regression runs.
    pub fn deterministic(rng: &mut SmallRng) -> Result<Self, ExperimentError> {
        let table = random_table(2, 5, 11, rng);
        Self::new(table, vec![0.35, 0.65], linspace(0.0, 1.0, 11), rng)
    }

    pub fn latent(&self) -> usize {
        self.theta
    }

    pub fn prior(&self) -> &[f64] {
        &self.prior
    }

    pub fn support(&self) -> &[f64] {
        &self.support
    }

    pub fn row(&self, latent: usize, arm: usize) -> &[f64] {
        &self.table[latent][arm]
    }
}

impl Environment for FiniteEnv {
    fn family(&self) -> Family {
        Family::FiniteSupport
    }

    fn arm_count(&self) -> usize {
        self.table[self.theta].len()
    }

    fn sample(&self, arm: usize, rng: &mut SmallRng) -> f64 {
        self.support[self.samplers[self.theta][arm].sample(rng)]
    }

    fn expected_reward(&self, arm: usize) -> f64 {
        self.table[self.theta][arm]
            .iter()
            .zip(&self.support)
            .map(|(q, r)| q * r)
            .sum()
    }
}

fn random_table(latents: usize, arms: usize, rewards: usize, rng: &mut SmallRng) -> Vec<Vec<Vec<f64>>> {
    (0..latents)
        .map(|_| {
            (0..arms)
                .map(|_| (0..rewards).map(|_| rng.gen::<f64>()).collect())
                .collect()
        })
        .collect()
}

fn normalize(weights: &mut [f64], what: &str) -> Result<(), ExperimentError> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 || weights.iter().any(|w| *w < 0.0) {
        return Err(ExperimentError::InvalidScenario(format!(
            "{what} must have non-negative weights with a positive sum"
        )));
    }
    weights.iter_mut().for_each(|w| *w /= total);
    Ok(())
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const SEED: u64 = 1234;
    const TOL: f64 = 1e-12;

    #[test]
    fn reward_rows_are_normalized() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = FiniteEnv::random(3, 4, 6, &mut rng).unwrap();

        for latent in 0..3 {
            for arm in 0..4 {
                let total: f64 = env.row(latent, arm).iter().sum();
                assert!((total - 1.0).abs() < TOL);
            }
        }
    }

    #[test]
    fn prior_is_normalized() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = FiniteEnv::random(5, 2, 3, &mut rng).unwrap();

        let total: f64 = env.prior().iter().sum();
        assert!((total - 1.0).abs() < TOL);
        assert!(env.latent() < 5);
    }

    #[test]
    fn deterministic_builder_shape() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = FiniteEnv::deterministic(&mut rng).unwrap();

        assert_eq!(env.arm_count(), 5);
        assert_eq!(env.support().len(), 11);
        assert!((env.prior()[0] - 0.35).abs() < TOL);
        assert!((env.prior()[1] - 0.65).abs() < TOL);
        assert_eq!(env.support()[0], 0.0);
        assert_eq!(env.support()[10], 1.0);
    }

    #[test]
    fn rejects_zero_sum_rows() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let table = vec![vec![vec![0.0, 0.0, 0.0], vec![0.2, 0.3, 0.5]]];
        let result = FiniteEnv::new(table, vec![1.0], linspace(0.0, 1.0, 3), &mut rng);
        assert!(matches!(
            result,
            Err(ExperimentError::InvalidScenario(_))
        ));
    }

    #[test]
    fn rejects_non_normalizable_prior() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let table = vec![vec![vec![0.5, 0.5]]; 2];
        let result = FiniteEnv::new(table, vec![0.0, 0.0], linspace(0.0, 1.0, 2), &mut rng);
        assert!(result.is_err());

        let table = vec![vec![vec![0.5, 0.5]]; 2];
        let result = FiniteEnv::new(table, vec![-1.0, 2.0], linspace(0.0, 1.0, 2), &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn expected_reward_matches_the_latent_row() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let table = vec![vec![vec![1.0, 0.0], vec![0.0, 1.0]]];
        let env = FiniteEnv::new(table, vec![1.0], vec![0.0, 1.0], &mut rng).unwrap();

        assert_eq!(env.expected_reward(0), 0.0);
        assert_eq!(env.expected_reward(1), 1.0);
        assert_eq!(env.best_arm(), 1);
    }

    #[test]
    fn samples_stay_on_the_support() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = FiniteEnv::random(2, 3, 4, &mut rng).unwrap();
        let support = env.support().to_vec();

        for _ in 0..200 {
            let reward = env.sample(0, &mut rng);
            assert!(support.iter().any(|r| *r == reward));
        }
    }
}
