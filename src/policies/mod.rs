mod arm;
mod epsilon_greedy;
mod explore_commit;
mod lin_ucb;
mod oracle;
mod random;
mod thompson;
mod ucb;

pub use arm::ArmEstimate;
pub use epsilon_greedy::EpsilonGreedy;
pub use explore_commit::ExploreCommit;
pub use lin_ucb::LinUcb;
pub use oracle::Oracle;
pub use random::Random;
pub use thompson::ThompsonSampling;
pub use ucb::{Moss, Ucb1};

use crate::envs::{Environment, Family};
use crate::errors::ExperimentError;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-policy parameter values, keyed by policy name then parameter name.
pub type ParameterTable = HashMap<String, HashMap<String, f64>>;

/// One bandit strategy within a single run. Instances carry per-run state
/// only; the experiment builds a fresh instance for every repetition.
pub trait Policy {
    /// Index of the arm to pull in round `t`, based on past observations.
    fn choose(&mut self, t: usize, rng: &mut SmallRng) -> usize;

    /// Feed back the realized reward of the pulled arm.
    fn update(&mut self, arm: usize, reward: f64);
}

/// A named policy with its tunable parameters resolved. Specs are resolved
/// once per experiment and rebuilt into fresh policy instances per
/// repetition, so no state leaks between Monte-Carlo trials.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum PolicySpec {
    Random,
    Oracle,
    EpsilonGreedy { epsilon: f64 },
    Ucb1 { rho: f64 },
    Moss { rho: f64 },
    ExploreCommit { rounds: usize },
    ThompsonSampling,
    LinUcb { alpha: f64, lambda: f64 },
}

impl PolicySpec {
    /// Ordered tunable parameter names a policy declares, or `None` for an
    /// unknown policy name.
    pub fn declared_parameters(name: &str) -> Option<&'static [&'static str]> {
        match name {
            "Random" | "Oracle" | "TS" => Some(&[]),
            "EpsilonGreedy" => Some(&["epsilon"]),
            "UCB1" | "MOSS" => Some(&["rho"]),
            "ExploreCommit" => Some(&["m"]),
            "LinUCB" => Some(&["alpha", "lambda"]),
            _ => None,
        }
    }

    fn supported_families(name: &str) -> &'static [Family] {
        match name {
            // rewards on both families stay in [0, 1], where the Beta
            // posterior update is valid
            "TS" => &[Family::Bernoulli, Family::FiniteSupport],
            "LinUCB" => &[Family::LinearGaussian],
            _ => &[
                Family::Bernoulli,
                Family::Gaussian,
                Family::FiniteSupport,
                Family::LinearGaussian,
            ],
        }
    }

    /// Look up a policy by name and bind every declared parameter from the
    /// table. A declared parameter without a configured value is an error,
    /// never a silent default.
    pub fn resolve(
        name: &str,
        family: Family,
        table: &ParameterTable,
    ) -> Result<Self, ExperimentError> {
        let unsupported = || ExperimentError::UnsupportedPolicy {
            policy: name.to_string(),
            family: family.to_string(),
        };
        if !Self::supported_families(name).contains(&family) {
            return Err(unsupported());
        }

        let lookup = |parameter: &str| -> Result<f64, ExperimentError> {
            table
                .get(name)
                .and_then(|params| params.get(parameter))
                .copied()
                .ok_or_else(|| ExperimentError::UnresolvedParameter {
                    policy: name.to_string(),
                    parameter: parameter.to_string(),
                })
        };

        match name {
            "Random" => Ok(Self::Random),
            "Oracle" => Ok(Self::Oracle),
            "EpsilonGreedy" => Ok(Self::EpsilonGreedy {
                epsilon: lookup("epsilon")?,
            }),
            "UCB1" => Ok(Self::Ucb1 {
                rho: lookup("rho")?,
            }),
            "MOSS" => Ok(Self::Moss {
                rho: lookup("rho")?,
            }),
            "ExploreCommit" => Ok(Self::ExploreCommit {
                rounds: lookup("m")? as usize,
            }),
            "TS" => Ok(Self::ThompsonSampling),
            "LinUCB" => {
                let alpha = lookup("alpha")?;
                let lambda = lookup("lambda")?;
                if !lambda.is_finite() || lambda <= 0.0 {
                    return Err(ExperimentError::InvalidParameter {
                        policy: name.to_string(),
                        parameter: "lambda".to_string(),
                        message: "regularisation strength must be positive".to_string(),
                    });
                }
                Ok(Self::LinUcb { alpha, lambda })
            }
            _ => Err(unsupported()),
        }
    }

    /// Fresh policy instance bound to one environment draw.
    pub fn build(
        &self,
        env: &dyn Environment,
        horizon: usize,
    ) -> Result<Box<dyn Policy>, ExperimentError> {
        let arms = env.arm_count();
        Ok(match self {
            PolicySpec::Random => Box::new(Random::new(arms)),
            PolicySpec::Oracle => Box::new(Oracle::new(env.best_arm())),
            PolicySpec::EpsilonGreedy { epsilon } => Box::new(EpsilonGreedy::new(arms, *epsilon)),
            PolicySpec::Ucb1 { rho } => Box::new(Ucb1::new(arms, *rho)),
            PolicySpec::Moss { rho } => Box::new(Moss::new(arms, horizon, *rho)),
            PolicySpec::ExploreCommit { rounds } => Box::new(ExploreCommit::new(arms, *rounds)),
            PolicySpec::ThompsonSampling => Box::new(ThompsonSampling::new(arms)),
            PolicySpec::LinUcb { alpha, lambda } => {
                if !lambda.is_finite() || *lambda <= 0.0 {
                    return Err(ExperimentError::InvalidParameter {
                        policy: "LinUCB".to_string(),
                        parameter: "lambda".to_string(),
                        message: "regularisation strength must be positive".to_string(),
                    });
                }
                let features = (0..arms)
                    .map(|arm| env.features(arm).map(|x| x.to_vec()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| ExperimentError::UnsupportedPolicy {
                        policy: "LinUCB".to_string(),
                        family: env.family().to_string(),
                    })?;
                Box::new(LinUcb::new(features, *alpha, *lambda))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::Scenario;
    use rand::SeedableRng;

    fn table(policy: &str, entries: &[(&str, f64)]) -> ParameterTable {
        let params = entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        ParameterTable::from([(policy.to_string(), params)])
    }

    #[test]
    fn resolves_declared_parameters_in_order() {
        assert_eq!(
            PolicySpec::declared_parameters("LinUCB"),
            Some(["alpha", "lambda"].as_slice())
        );
        assert_eq!(PolicySpec::declared_parameters("TS"), Some([].as_slice()));
        assert_eq!(PolicySpec::declared_parameters("NoSuchPolicy"), None);
    }

    #[test]
    fn resolves_a_configured_policy() {
        let table = table("UCB1", &[("rho", 0.2)]);
        let spec = PolicySpec::resolve("UCB1", Family::Bernoulli, &table).unwrap();
        assert_eq!(spec, PolicySpec::Ucb1 { rho: 0.2 });
    }

    #[test]
    fn missing_parameter_is_an_error() {
        let result = PolicySpec::resolve("UCB1", Family::Bernoulli, &ParameterTable::new());
        assert!(matches!(
            result,
            Err(ExperimentError::UnresolvedParameter { policy, parameter })
                if policy == "UCB1" && parameter == "rho"
        ));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let result = PolicySpec::resolve("NoSuchPolicy", Family::Gaussian, &ParameterTable::new());
        assert!(matches!(
            result,
            Err(ExperimentError::UnsupportedPolicy { .. })
        ));
    }

    #[test]
    fn family_mismatch_is_an_error() {
        let result = PolicySpec::resolve("TS", Family::Gaussian, &ParameterTable::new());
        assert!(matches!(
            result,
            Err(ExperimentError::UnsupportedPolicy { policy, family })
                if policy == "TS" && family == "Gaussian"
        ));

        let result = PolicySpec::resolve("LinUCB", Family::Bernoulli, &ParameterTable::new());
        assert!(matches!(
            result,
            Err(ExperimentError::UnsupportedPolicy { .. })
        ));
    }

    #[test]
    fn non_positive_lambda_is_rejected() {
        for lambda in [0.0, -1.0, f64::NAN] {
            let table = table("LinUCB", &[("alpha", 0.5), ("lambda", lambda)]);
            let result = PolicySpec::resolve("LinUCB", Family::LinearGaussian, &table);
            assert!(matches!(
                result,
                Err(ExperimentError::InvalidParameter { parameter, .. }) if parameter == "lambda"
            ));
        }
    }

    #[test]
    fn building_with_a_bad_lambda_is_an_error() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let env = Scenario::LinearGaussian {
            arms: 3,
            features: 2,
            noise: 0.1,
        }
        .build(&mut rng)
        .unwrap();

        let spec = PolicySpec::LinUcb {
            alpha: 0.5,
            lambda: -1.0,
        };
        assert!(matches!(
            spec.build(env.as_ref(), 100),
            Err(ExperimentError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn thompson_sampling_supports_finite_rewards() {
        let spec =
            PolicySpec::resolve("TS", Family::FiniteSupport, &ParameterTable::new()).unwrap();
        assert_eq!(spec, PolicySpec::ThompsonSampling);
    }

    #[test]
    fn parameterless_policies_need_no_table_entry() {
        for name in ["Random", "Oracle", "TS"] {
            assert!(PolicySpec::resolve(name, Family::Bernoulli, &ParameterTable::new()).is_ok());
        }
    }
}
