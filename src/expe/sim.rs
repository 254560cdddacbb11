use crate::envs::Environment;
use crate::policies::Policy;

use rand::rngs::SmallRng;

/// Arm choices and realized rewards of one run, both of horizon length.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub arms: Vec<usize>,
    pub rewards: Vec<f64>,
}

/// Drive one (environment, policy) pair through `horizon` rounds. Each round
/// the policy picks an arm from its own observations so far, the environment
/// draws one reward for it, and the pair is appended to the trace.
pub fn simulate(
    env: &dyn Environment,
    policy: &mut dyn Policy,
    horizon: usize,
    rng: &mut SmallRng,
) -> Trace {
    let mut arms = Vec::with_capacity(horizon);
    let mut rewards = Vec::with_capacity(horizon);

    for t in 0..horizon {
        let arm = policy.choose(t, rng);
        let reward = env.sample(arm, rng);
        policy.update(arm, reward);

        arms.push(arm);
        rewards.push(reward);
    }

    Trace { arms, rewards }
}
