use super::regret::cumulative_regret;
use super::sim::simulate;
use crate::envs::Scenario;
use crate::errors::ExperimentError;
use crate::policies::{ParameterTable, PolicySpec};
use crate::rng::ExperimentRng;

use serde::Serialize;
use tracing::{debug, info};

/// One comparative experiment: a scenario, the policies under comparison and
/// the Monte-Carlo dimensions.
#[derive(Debug)]
pub struct Experiment {
    scenario: Scenario,
    policies: Vec<String>,
    parameters: ParameterTable,
    horizon: usize,
    repetitions: usize,
    rng: ExperimentRng,
}

impl Experiment {
    pub fn new(
        scenario: Scenario,
        policies: Vec<String>,
        parameters: ParameterTable,
        horizon: usize,
        repetitions: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            scenario,
            policies,
            parameters,
            horizon,
            repetitions,
            rng: ExperimentRng::new(seed),
        }
    }

    /// Run every repetition and collect the per-run regret curves.
    ///
    /// Each repetition draws a fresh environment from the scenario on its own
    /// random stream and plays every policy against that same draw, with a
    /// fresh policy instance per repetition. All binding and construction
    /// errors surface before any simulation work starts.
    pub fn run(&self) -> Result<RegretMatrix, ExperimentError> {
        if self.horizon == 0 || self.repetitions == 0 {
            return Err(ExperimentError::InvalidScenario(
                "horizon and repetition counts must be positive".to_string(),
            ));
        }

        let family = self.scenario.family();
        let specs = self
            .policies
            .iter()
            .map(|name| PolicySpec::resolve(name, family, &self.parameters))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            policies = self.policies.len(),
            repetitions = self.repetitions,
            horizon = self.horizon,
            %family,
            "running experiment"
        );

        let mut matrix = RegretMatrix::new(self.policies.clone(), self.repetitions, self.horizon);
        for repetition in 0..self.repetitions {
            let mut rng = self.rng.stream(repetition);
            let env = self.scenario.build(&mut rng)?;

            for (index, spec) in specs.iter().enumerate() {
                let mut policy = spec.build(env.as_ref(), self.horizon)?;
                let trace = simulate(env.as_ref(), policy.as_mut(), self.horizon, &mut rng);
                matrix.record(index, repetition, cumulative_regret(env.as_ref(), &trace));
            }
            debug!(repetition, "repetition done");
        }

        Ok(matrix)
    }
}

/// Cumulative regret of every (policy, repetition) pair.
#[derive(Clone, Debug)]
pub struct RegretMatrix {
    policies: Vec<String>,
    horizon: usize,
    regrets: Vec<Vec<Vec<f64>>>, // [policy][repetition][round]
}

impl RegretMatrix {
    fn new(policies: Vec<String>, repetitions: usize, horizon: usize) -> Self {
        let regrets = vec![vec![Vec::new(); repetitions]; policies.len()];
        Self {
            policies,
            horizon,
            regrets,
        }
    }

    fn record(&mut self, policy: usize, repetition: usize, regret: Vec<f64>) {
        self.regrets[policy][repetition] = regret;
    }

    pub fn policies(&self) -> &[String] {
        &self.policies
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn repetitions(&self) -> usize {
        self.regrets.first().map(|reps| reps.len()).unwrap_or(0)
    }

    pub fn repetition_curve(&self, policy: usize, repetition: usize) -> &[f64] {
        &self.regrets[policy][repetition]
    }

    /// Reduce over the repetition axis to one mean regret curve per policy.
    pub fn mean_over_repetitions(&self) -> RegretReport {
        let curves = self
            .policies
            .iter()
            .zip(&self.regrets)
            .map(|(name, repetitions)| {
                let mut mean = vec![0.0; self.horizon];
                for repetition in repetitions {
                    for (total, value) in mean.iter_mut().zip(repetition) {
                        *total += value;
                    }
                }
                let scale = 1.0 / repetitions.len() as f64;
                mean.iter_mut().for_each(|total| *total *= scale);

                RegretCurve {
                    policy: name.clone(),
                    regret: mean,
                }
            })
            .collect();

        RegretReport { curves }
    }
}

/// Averaged regret curves, ordered like the experiment's policy list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegretReport {
    pub curves: Vec<RegretCurve>,
}

impl RegretReport {
    pub fn curve(&self, policy: &str) -> Option<&[f64]> {
        self.curves
            .iter()
            .find(|curve| curve.policy == policy)
            .map(|curve| curve.regret.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegretCurve {
    pub policy: String,
    pub regret: Vec<f64>,
}
