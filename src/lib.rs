//! Monte-Carlo comparison of multi-armed bandit policies.
//!
//! An [`Experiment`] repeatedly draws an environment instance from a
//! [`Scenario`], plays every configured policy against the same draw for a
//! fixed horizon, computes cumulative regret against the latent best arm and
//! averages the curves over repetitions.

pub mod config;
pub mod envs;
pub mod errors;
pub mod expe;
pub mod policies;
pub mod rng;

pub use envs::{Environment, Family, Scenario};
pub use errors::{AppError, ExperimentError};
pub use expe::{cumulative_regret, simulate, Experiment, RegretMatrix, RegretReport, Trace};
pub use policies::{ParameterTable, Policy, PolicySpec};
pub use rng::ExperimentRng;
