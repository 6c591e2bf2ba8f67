use crate::data::encoder::FeatureSchema;
use crate::data::scaler::Standardizer;
use crate::domain::customer::LabeledCustomer;

/// An encoded design matrix plus churn labels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ChurnDataset {
    features:   Vec<f32>,
    labels:     Vec<f32>,
    n_features: usize,
}

impl ChurnDataset {
    /// Encode labelled customers through the shared schema.
    pub fn encode(samples: &[LabeledCustomer], schema: &FeatureSchema) -> Self {
        Self {
            features:   schema.encode_all(samples.iter().map(|s| &s.record)),
            labels:     samples.iter().map(|s| f32::from(s.churn)).collect(),
            n_features: schema.len(),
        }
    }

    pub fn standardize(&mut self, scaler: &Standardizer) {
        scaler.transform(&mut self.features);
    }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    pub fn n_features(&self) -> usize { self.n_features }

    pub fn features(&self) -> &[f32] { &self.features }

    pub fn labels(&self) -> &[f32] { &self.labels }

    pub fn positive_rate(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.labels.iter().map(|&y| y as f64).sum::<f64>() / self.len() as f64
    }
}
