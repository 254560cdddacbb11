use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize};

// splitmix64 increment, keeps per-repetition streams decorrelated
const STREAM_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Master seed for one experiment, handing out an independent random stream
/// per Monte-Carlo repetition. Streams are addressed by repetition index so
/// results never depend on the order repetitions are executed in.
#[derive(Clone, Debug, Serialize)]
pub struct ExperimentRng {
    seed: Option<u64>,
    #[serde(skip)]
    master: u64,
}

impl ExperimentRng {
    pub fn new(seed: Option<u64>) -> Self {
        let master = seed.unwrap_or_else(|| SmallRng::from_entropy().gen());

        Self { seed, master }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn stream(&self, repetition: usize) -> SmallRng {
        let increment = (repetition as u64 + 1).wrapping_mul(STREAM_GAMMA);
        SmallRng::seed_from_u64(self.master.wrapping_add(increment))
    }
}

impl<'de> Deserialize<'de> for ExperimentRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seed = Deserialize::deserialize(deserializer)?;
        Ok(Self::new(seed))
    }
}
