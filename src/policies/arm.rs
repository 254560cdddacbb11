/// Running statistics for one arm within a single run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArmEstimate {
    pub pulls: u64,
    pub mean: f64,
}

impl ArmEstimate {
    pub fn observe(&mut self, reward: f64) {
        self.pulls += 1;
        self.mean += (reward - self.mean) / self.pulls as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_tracks_observations() {
        let mut arm = ArmEstimate::default();

        arm.observe(1.0);
        assert_eq!(arm.mean, 1.0);

        arm.observe(0.0);
        assert_eq!(arm.pulls, 2);
        assert_eq!(arm.mean, 0.5);
    }
}
