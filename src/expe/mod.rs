mod monte_carlo;
mod regret;
mod sim;

pub use monte_carlo::{Experiment, RegretCurve, RegretMatrix, RegretReport};
pub use regret::cumulative_regret;
pub use sim::{simulate, Trace};
