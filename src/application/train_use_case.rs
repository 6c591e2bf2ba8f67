// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load + clean customers     (Layer 4 - data)
//   Step 2: Seeded train/test split    (Layer 4 - data)
//   Step 3: Fit the feature schema     (Layer 4 - data)
//   Step 4: Encode + standardize       (Layer 4 - data)
//   Step 5: Fit logistic regression    (Layer 5 - ml)
//   Step 6: Score the held-out split   (Layer 5 + 6)
//   Step 7: Write the model artifact   (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    dataset::ChurnDataset,
    encoder::FeatureSchema,
    scaler::Standardizer,
    splitter::split_train_test,
};
use crate::domain::customer::CustomerRecord;
use crate::domain::traits::{DatasetSource, Persistable};
use crate::infra::{
    download::DEFAULT_DATASET_URL,
    metrics::{HoldoutMetrics, MetricsLogger},
    model_store::ModelArtifact,
};
use crate::ml::{model::encode_weights, trainer::{fit_logistic, score_dataset}};

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run. Serialisable so the artifact
// records exactly how its weights were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Local CSV; when set, `data_url` is not fetched
    pub data_path:     Option<String>,
    pub data_url:      String,
    /// Where the model artifact is written
    pub output:        String,
    pub test_size:     f64,
    pub seed:          u64,
    pub max_iter:      usize,
    pub learning_rate: f64,
    /// Inverse L2 regularisation strength
    pub c:             f64,
    /// Stop once the loss changes by less than this between iterations
    pub tol:           f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:     None,
            data_url:      DEFAULT_DATASET_URL.to_string(),
            output:        "api/churn_model.json".to_string(),
            test_size:     0.2,
            seed:          42,
            max_iter:      1000,
            learning_rate: 0.05,
            c:             1.0,
            tol:           1e-6,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline end to end and return the hold-out metrics.
    pub fn execute(&self, source: &dyn DatasetSource) -> Result<HoldoutMetrics> {
        let cfg = &self.config;
        ensure!(
            (0.0..1.0).contains(&cfg.test_size),
            "test_size must be in [0, 1), got {}",
            cfg.test_size
        );

        // ── Step 1: Load customers ────────────────────────────────────────────
        let customers = source.load_all()?;
        ensure!(!customers.is_empty(), "Dataset contains no usable rows");

        // ── Step 2: Seeded split ──────────────────────────────────────────────
        // The schema is fitted on every row before splitting, so a category
        // that only appears in the test split still gets a column.
        let all_records: Vec<CustomerRecord> = customers.iter().map(|c| c.record.clone()).collect();
        let (train, test) = split_train_test(customers, cfg.test_size, cfg.seed);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 3: Feature schema ────────────────────────────────────────────
        let schema = FeatureSchema::fit(&all_records);
        tracing::info!("Feature vector has {} columns", schema.len());

        // ── Step 4: Encode + standardize ──────────────────────────────────────
        let mut train_ds = ChurnDataset::encode(&train, &schema);
        let mut test_ds  = ChurnDataset::encode(&test, &schema);
        let scaler = Standardizer::fit(train_ds.features(), train_ds.n_features());
        train_ds.standardize(&scaler);
        test_ds.standardize(&scaler);
        tracing::info!("Training churn rate: {:.1}%", train_ds.positive_rate() * 100.0);

        // ── Step 5: Fit ───────────────────────────────────────────────────────
        let fit = fit_logistic(cfg, &train_ds)?;

        // ── Step 6: Evaluate ──────────────────────────────────────────────────
        let probs   = score_dataset(&fit.model, &test_ds)?;
        let metrics = HoldoutMetrics::compute(&probs, test_ds.labels(), fit.iterations, fit.final_loss);
        tracing::info!(
            "Hold-out ({}): accuracy={:.4} precision={:.4} recall={:.4} log_loss={:.4}",
            if fit.converged { "converged" } else { "iteration cap reached" },
            metrics.accuracy,
            metrics.precision,
            metrics.recall,
            metrics.test_loss
        );

        // ── Step 7: Save ──────────────────────────────────────────────────────
        let output = Path::new(&cfg.output);
        let artifact = ModelArtifact {
            feature_columns: schema.columns().to_vec(),
            standardizer:    scaler,
            weights:         encode_weights(&fit.model)?,
            trained_with:    cfg.clone(),
        };
        artifact.save(output)?;
        tracing::info!("Model saved to {}", output.display());

        let metrics_dir = output.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        MetricsLogger::new(metrics_dir)?.log(&metrics)?;

        Ok(metrics)
    }
}
