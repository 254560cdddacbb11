mod bernoulli;
mod finite;
mod gaussian;
mod linear;

pub use bernoulli::BernoulliEnv;
pub use finite::FiniteEnv;
pub use gaussian::GaussianEnv;
pub use linear::LinearGaussianEnv;

use crate::errors::ExperimentError;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Family {
    Bernoulli,
    Gaussian,
    FiniteSupport,
    LinearGaussian,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::Bernoulli => write!(f, "Bernoulli"),
            Family::Gaussian => write!(f, "Gaussian"),
            Family::FiniteSupport => write!(f, "FiniteSupport"),
            Family::LinearGaussian => write!(f, "LinearGaussian"),
        }
    }
}

/// One instance of a reward-generating process with a fixed set of arms.
///
/// Expected rewards are computed from the latent parameters, never from
/// observed samples, so the regret baseline (`best_expected_reward`) is the
/// latent best arm in every family.
pub trait Environment {
    fn family(&self) -> Family;

    fn arm_count(&self) -> usize;

    /// One independent reward draw for the given arm.
    fn sample(&self, arm: usize, rng: &mut SmallRng) -> f64;

    fn expected_reward(&self, arm: usize) -> f64;

    /// Feature vector of the arm, for families with a linear reward model.
    fn features(&self, _arm: usize) -> Option<&[f64]> {
        None
    }

    fn best_arm(&self) -> usize {
        (0..self.arm_count())
            .map(|arm| (arm, self.expected_reward(arm)))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0)
    }

    fn best_expected_reward(&self) -> f64 {
        self.expected_reward(self.best_arm())
    }
}

/// Recipe for drawing one environment instance. Latent parameters are drawn
/// fresh on every `build`, so each Monte-Carlo repetition gets an
/// independent instance.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Scenario {
    Bernoulli { arms: usize },
    FixedBernoulli { probs: Vec<f64> },
    Gaussian { arms: usize },
    FiniteSupport { latents: usize, arms: usize, rewards: usize },
    DeterministicFiniteSupport,
    LinearGaussian { arms: usize, features: usize, noise: f64 },
}

impl Scenario {
    pub fn family(&self) -> Family {
        match self {
            Scenario::Bernoulli { .. } | Scenario::FixedBernoulli { .. } => Family::Bernoulli,
            Scenario::Gaussian { .. } => Family::Gaussian,
            Scenario::FiniteSupport { .. } | Scenario::DeterministicFiniteSupport => {
                Family::FiniteSupport
            }
            Scenario::LinearGaussian { .. } => Family::LinearGaussian,
        }
    }

    pub fn build(&self, rng: &mut SmallRng) -> Result<Box<dyn Environment>, ExperimentError> {
        Ok(match self {
            Scenario::Bernoulli { arms } => Box::new(BernoulliEnv::random(*arms, rng)?),
            Scenario::FixedBernoulli { probs } => Box::new(BernoulliEnv::new(probs.clone())?),
            Scenario::Gaussian { arms } => Box::new(GaussianEnv::random(*arms, rng)?),
            Scenario::FiniteSupport {
                latents,
                arms,
                rewards,
            } => Box::new(FiniteEnv::random(*latents, *arms, *rewards, rng)?),
            Scenario::DeterministicFiniteSupport => Box::new(FiniteEnv::deterministic(rng)?),
            Scenario::LinearGaussian {
                arms,
                features,
                noise,
            } => Box::new(LinearGaussianEnv::random(*arms, *features, *noise, rng)?),
        })
    }
}
