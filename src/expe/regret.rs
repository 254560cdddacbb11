use super::sim::Trace;
use crate::envs::Environment;

/// Cumulative regret of one run against the environment's latent best arm.
///
/// The instantaneous regret of round t is the gap between the best expected
/// reward and the expected reward of the arm actually pulled, both computed
/// from the environment's true parameters. Realized rewards never enter the
/// calculation, so a run that always pulls the best arm has exactly zero
/// regret.
pub fn cumulative_regret(env: &dyn Environment, trace: &Trace) -> Vec<f64> {
    let best = env.best_expected_reward();
    let mut total = 0.0;

    trace
        .arms
        .iter()
        .map(|&arm| {
            total += best - env.expected_reward(arm);
            total
        })
        .collect()
}
