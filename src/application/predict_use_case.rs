// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads a model artifact once and answers churn queries:
//   1. Probe candidate paths for the artifact
//   2. Rebuild the encoder, standardizer and weights from it
//   3. For each customer: probability → label + risk band
//
// Shared by `serve` (behind an Arc in the HTTP state) and the
// one-shot `predict` command.

use anyhow::Result;
use std::path::Path;

use crate::domain::customer::CustomerRecord;
use crate::domain::prediction::Prediction;
use crate::domain::traits::Persistable;
use crate::infra::model_store::{locate_model, ModelArtifact};
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self> {
        Ok(Self { inferencer: Inferencer::from_artifact(artifact)? })
    }

    /// Load the first artifact found among `candidates`.
    pub fn locate_and_load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        let path     = locate_model(candidates)?;
        let artifact = ModelArtifact::load(&path)?;
        let use_case = Self::from_artifact(&artifact)?;

        tracing::info!("Model loaded successfully from {}", path.display());
        tracing::info!("Expected features: {}", use_case.feature_columns().len());
        Ok(use_case)
    }

    pub fn predict(&self, record: &CustomerRecord) -> Result<Prediction> {
        let p = self.inferencer.churn_probability(record)?;
        Ok(Prediction::from_probability(p))
    }

    pub fn feature_columns(&self) -> &[String] {
        self.inferencer.feature_columns()
    }
}

/// A small model trained on synthetic customers, for tests in any layer.
#[cfg(test)]
pub fn trained_predictor() -> PredictUseCase {
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};
    use crate::data::{fixtures::synthetic_csv, loader::CsvLoader};

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("churn_model.json");
    let cfg = TrainConfig {
        output:   output.display().to_string(),
        max_iter: 300,
        ..TrainConfig::default()
    };
    TrainUseCase::new(cfg)
        .execute(&CsvLoader::from_text("memory", synthetic_csv(300)))
        .unwrap();
    PredictUseCase::locate_and_load(&[output]).unwrap()
}
