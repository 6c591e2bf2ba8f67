// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Scores one customer against a loaded model artifact:
//
//   CustomerRecord
//       │  FeatureSchema::encode   (shared with training)
//       ▼
//   aligned feature row
//       │  Standardizer::transform (fitted on training split)
//       ▼
//   [1, d] tensor → FrozenLogistic → probability
//
// Built once at startup and never mutated afterwards.

use anyhow::{anyhow, Context, Result};
use burn::{prelude::*, tensor::TensorData};

use crate::data::{encoder::FeatureSchema, scaler::Standardizer};
use crate::domain::customer::CustomerRecord;
use crate::infra::model_store::ModelArtifact;
use crate::ml::model::{decode_weights, FrozenLogistic};

type InferBackend = burn::backend::NdArray;

pub struct Inferencer {
    model:  FrozenLogistic<InferBackend>,
    schema: FeatureSchema,
    scaler: Standardizer,
    device: <InferBackend as Backend>::Device,
}

impl Inferencer {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self> {
        let device = <InferBackend as Backend>::Device::default();

        let schema = FeatureSchema::from_columns(artifact.feature_columns.clone())
            .context("Artifact has an invalid feature column list")?;
        artifact.standardizer.ensure_width(schema.len())?;

        let model = decode_weights::<InferBackend>(artifact.weights.clone(), schema.len(), &device)?
            .freeze();

        tracing::info!("Model ready: {} features", schema.len());
        Ok(Self { model, schema, scaler: artifact.standardizer.clone(), device })
    }

    pub fn feature_columns(&self) -> &[String] {
        self.schema.columns()
    }

    /// Probability that `record` churns, in [0, 1].
    pub fn churn_probability(&self, record: &CustomerRecord) -> Result<f64> {
        let mut row = self.schema.encode(record);
        self.scaler.transform(&mut row);

        let x = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(row, [1, self.schema.len()]),
            &self.device,
        );
        let probs: Vec<f32> = self
            .model
            .predict_proba(x)
            .into_data()
            .to_vec()
            .map_err(|e| anyhow!("Cannot read probability back from tensor: {e:?}"))?;

        probs
            .first()
            .map(|&p| f64::from(p))
            .ok_or_else(|| anyhow!("Model returned no probability"))
    }
}
