// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Scores the held-out split after fitting and appends one CSV
// row per training run to metrics.csv next to the artifact.
//
// Metrics recorded per run:
//   - iterations: optimiser steps actually taken
//   - train_loss: final regularised loss on the training split
//   - test_loss:  mean log-loss on the held-out split
//   - accuracy, precision, recall at the 0.5 decision threshold
//   - tp, fp, tn, fn: the confusion counts behind them
//
// Example CSV output:
//   iterations,train_loss,test_loss,accuracy,precision,recall,tp,fp,tn,fn
//   412,0.414310,0.428807,0.804541,0.652174,0.557491,160,85,971,127

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::prediction::DECISION_THRESHOLD;

const CSV_HEADER: &str = "iterations,train_loss,test_loss,accuracy,precision,recall,tp,fp,tn,fn";

/// Hold-out evaluation of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutMetrics {
    pub iterations: usize,
    pub train_loss: f64,
    pub test_loss:  f64,
    pub accuracy:   f64,
    pub precision:  f64,
    pub recall:     f64,
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl HoldoutMetrics {
    /// Compare predicted probabilities against 0/1 labels.
    pub fn compute(probs: &[f32], labels: &[f32], iterations: usize, train_loss: f64) -> Self {
        let (mut tp, mut fp, mut tn, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        let mut loss_sum = 0.0f64;

        for (&p, &y) in probs.iter().zip(labels) {
            let p = f64::from(p).clamp(1e-15, 1.0 - 1e-15);
            let positive = y > 0.5;
            loss_sum -= if positive { p.ln() } else { (1.0 - p).ln() };

            match (p > DECISION_THRESHOLD, positive) {
                (true, true)   => tp += 1,
                (true, false)  => fp += 1,
                (false, false) => tn += 1,
                (false, true)  => fn_ += 1,
            }
        }

        let n = tp + fp + tn + fn_;
        let ratio = |num: usize, den: usize| if den > 0 { num as f64 / den as f64 } else { 0.0 };

        Self {
            iterations,
            train_loss,
            test_loss: if n > 0 { loss_sum / n as f64 } else { f64::NAN },
            accuracy:  ratio(tp + tn, n),
            precision: ratio(tp, tp + fp),
            recall:    ratio(tp, tp + fn_),
            tp, fp, tn, fn_,
        }
    }
}

/// Appends run metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{CSV_HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &HoldoutMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6},{},{},{},{}",
            m.iterations, m.train_loss, m.test_loss, m.accuracy, m.precision, m.recall,
            m.tp, m.fp, m.tn, m.fn_,
        )?;
        Ok(())
    }
}
