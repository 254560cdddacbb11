use super::Policy;

use rand::rngs::SmallRng;
use std::cmp::Ordering;

/// LinUCB over a fixed arm set with known feature vectors: one shared ridge
/// model, scored as predicted reward plus a confidence width. The inverse
/// design matrix is kept up to date with Sherman-Morrison rank-one updates,
/// so no matrix inversion happens on the decision path.
#[derive(Clone, Debug)]
pub struct LinUcb {
    alpha: f64,
    features: Vec<Vec<f64>>,
    a_inv: Vec<Vec<f64>>,
    b: Vec<f64>,
}

impl LinUcb {
    /// `lambda` must be positive; [`PolicySpec`](super::PolicySpec) validates
    /// it before instances are built.
    pub fn new(features: Vec<Vec<f64>>, alpha: f64, lambda: f64) -> Self {
        let dim = features.first().map(|x| x.len()).unwrap_or(0);

        let mut a_inv = vec![vec![0.0; dim]; dim];
        for (i, row) in a_inv.iter_mut().enumerate() {
            row[i] = 1.0 / lambda;
        }

        Self {
            alpha,
            features,
            a_inv,
            b: vec![0.0; dim],
        }
    }

    fn score(&self, x: &[f64], theta: &[f64]) -> f64 {
        let width = dot(x, &mat_vec(&self.a_inv, x)).max(0.0).sqrt();
        dot(x, theta) + self.alpha * width
    }
}

impl Policy for LinUcb {
    fn choose(&mut self, _t: usize, _rng: &mut SmallRng) -> usize {
        let theta = mat_vec(&self.a_inv, &self.b);
        self.features
            .iter()
            .enumerate()
            .map(|(arm, x)| (arm, self.score(x, &theta)))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(arm, _)| arm)
            .unwrap_or(0)
    }

    fn update(&mut self, arm: usize, reward: f64) {
        let x = self.features[arm].clone();

        // Sherman-Morrison rank-one update of the inverse design matrix
        let u = mat_vec(&self.a_inv, &x);
        let denom = 1.0 + dot(&x, &u);
        for (i, ui) in u.iter().enumerate() {
            for (j, uj) in u.iter().enumerate() {
                self.a_inv[i][j] -= ui * uj / denom;
            }
        }

        for (bi, xi) in self.b.iter_mut().zip(&x) {
            *bi += reward * xi;
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter().map(|row| dot(row, v)).collect()
}
