// ============================================================
// Layer 4 — Feature Standardizer
// ============================================================
// Rescales every feature column to zero mean and unit variance:
//
//   x' = (x - mean) / scale
//
// Raw Telco features span very different ranges (a flag is 0/1,
// TotalCharges reaches ~8700), which makes plain gradient descent
// crawl along the large-valued axes. Fitting on standardized
// inputs converges in a few hundred full-batch steps.
//
// The fitted mean/scale pairs are stored in the model artifact
// and applied verbatim at prediction time.
//
// Constant columns get scale 1.0 so they map to 0 instead of NaN.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub means:  Vec<f32>,
    pub scales: Vec<f32>,
}

impl Standardizer {
    /// Fit per-column mean and population standard deviation over a
    /// row-major matrix with `n_features` columns.
    pub fn fit(matrix: &[f32], n_features: usize) -> Self {
        let n_rows = if n_features == 0 { 0 } else { matrix.len() / n_features };
        let mut means  = vec![0.0f64; n_features];
        let mut sq_sum = vec![0.0f64; n_features];

        for row in matrix.chunks_exact(n_features.max(1)) {
            for (j, &v) in row.iter().enumerate() {
                means[j] += v as f64;
            }
        }
        let denom = n_rows.max(1) as f64;
        means.iter_mut().for_each(|m| *m /= denom);

        for row in matrix.chunks_exact(n_features.max(1)) {
            for (j, &v) in row.iter().enumerate() {
                let d = v as f64 - means[j];
                sq_sum[j] += d * d;
            }
        }

        let scales = sq_sum
            .iter()
            .map(|&s| {
                let std = (s / denom).sqrt();
                if std > f64::EPSILON { std as f32 } else { 1.0 }
            })
            .collect();

        Self {
            means: means.into_iter().map(|m| m as f32).collect(),
            scales,
        }
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Standardize a row-major matrix in place.
    pub fn transform(&self, matrix: &mut [f32]) {
        let n = self.n_features().max(1);
        for row in matrix.chunks_exact_mut(n) {
            for ((v, m), s) in row.iter_mut().zip(&self.means).zip(&self.scales) {
                *v = (*v - m) / s;
            }
        }
    }

    /// Check that this standardizer matches a schema of `n_features` columns.
    pub fn ensure_width(&self, n_features: usize) -> Result<()> {
        ensure!(
            self.means.len() == n_features && self.scales.len() == n_features,
            "Standardizer has {} means / {} scales but the schema has {} columns",
            self.means.len(),
            self.scales.len(),
            n_features
        );
        Ok(())
    }
}
