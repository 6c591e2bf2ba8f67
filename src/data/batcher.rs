// ============================================================
// Layer 4 — Churn Batcher
// ============================================================
// Converts an encoded ChurnDataset into Burn tensors.
//
// Logistic regression is fitted full-batch, so there is only
// ever one batch: the whole training split.
//
//   Input:  ChurnDataset with N rows of D features
//   Output: ChurnBatch { features: [N, D], targets: [N] }
//
// B is the Burn Backend (NdArray, Autodiff<NdArray>) —
// generic so the same batcher feeds training and evaluation.
//
// Reference: Burn Book §4 (Batcher)

use burn::{prelude::*, tensor::TensorData};

use crate::data::dataset::ChurnDataset;

/// Feature matrix and float targets (0.0 / 1.0) on one device.
#[derive(Debug, Clone)]
pub struct ChurnBatch<B: Backend> {
    /// shape: [n_rows, n_features]
    pub features: Tensor<B, 2>,
    /// shape: [n_rows]
    pub targets:  Tensor<B, 1>,
}

#[derive(Clone, Debug)]
pub struct ChurnBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ChurnBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    pub fn batch(&self, dataset: &ChurnDataset) -> ChurnBatch<B> {
        let n = dataset.len();
        let d = dataset.n_features();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(dataset.features().to_vec(), [n, d]),
            &self.device,
        );
        let targets = Tensor::<B, 1>::from_data(
            TensorData::new(dataset.labels().to_vec(), [n]),
            &self.device,
        );

        ChurnBatch { features, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::FeatureSchema;
    use crate::data::fixtures::default_record;
    use crate::domain::customer::LabeledCustomer;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let samples: Vec<LabeledCustomer> = (0..3)
            .map(|i| LabeledCustomer { record: default_record(), churn: (i % 2) as u8 })
            .collect();
        let schema = FeatureSchema::fit(&[default_record()]);
        let ds = ChurnDataset::encode(&samples, &schema);

        let batch = ChurnBatcher::<TestBackend>::new(Default::default()).batch(&ds);
        assert_eq!(batch.features.dims(), [3, schema.len()]);
        assert_eq!(batch.targets.dims(), [3]);
        let targets: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![0.0, 1.0, 0.0]);
    }
}
