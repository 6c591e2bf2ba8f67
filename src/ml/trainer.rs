// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full-batch Adam on the regularised log-loss.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InnerBackend (NdArray)
//     for evaluation and persistence
//   - The loop stops at max_iter, or earlier once the loss
//     changes by less than `tol` between two iterations
//
// Every input to the loop is deterministic (zero-init weights,
// one fixed batch, no dropout), so two fits on the same split
// produce identical weights.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{anyhow, bail, ensure, Result};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::TensorData,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ChurnBatcher, dataset::ChurnDataset};
use crate::ml::model::{LogisticConfig, LogisticModel};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type InnerBackend = burn::backend::NdArray;

/// What the loop produced.
#[derive(Debug)]
pub struct FitOutcome {
    pub model:      LogisticModel<InnerBackend>,
    pub iterations: usize,
    pub final_loss: f64,
    pub converged:  bool,
}

pub fn fit_logistic(cfg: &TrainConfig, train: &ChurnDataset) -> Result<FitOutcome> {
    ensure!(!train.is_empty(), "Training split is empty");
    ensure!(cfg.c > 0.0, "Inverse regularisation strength C must be positive, got {}", cfg.c);

    let device = <TrainBackend as Backend>::Device::default();

    let mut model: LogisticModel<TrainBackend> =
        LogisticConfig::new(train.n_features()).init(&device);
    let batch = ChurnBatcher::<TrainBackend>::new(device.clone()).batch(train);

    // mean(ℓ) + ‖w‖²/(2Cn)  ⇔  C·Σℓ + ‖w‖²/2
    let l2 = 1.0 / (cfg.c * train.len() as f64);

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    tracing::info!(
        "Fitting logistic regression: {} rows × {} features, max_iter={}, lr={}, C={}",
        train.len(),
        train.n_features(),
        cfg.max_iter,
        cfg.learning_rate,
        cfg.c
    );

    let mut prev_loss  = f64::INFINITY;
    let mut final_loss = f64::NAN;
    let mut iterations = 0;
    let mut converged  = false;

    for iter in 1..=cfg.max_iter {
        let loss = model.objective(&batch, l2);
        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
        if !loss_val.is_finite() {
            bail!("Loss diverged to {} at iteration {}", loss_val, iter);
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.learning_rate, model, grads);

        iterations = iter;
        final_loss = loss_val;

        if iter % 100 == 0 {
            tracing::debug!("iter {:>5} | loss={:.6}", iter, loss_val);
        }

        if (prev_loss - loss_val).abs() < cfg.tol {
            converged = true;
            break;
        }
        prev_loss = loss_val;
    }

    if converged {
        tracing::info!("Converged after {} iterations, loss={:.6}", iterations, final_loss);
    } else {
        tracing::warn!(
            "Stopped at max_iter={} without converging (last loss={:.6}); consider raising --max-iter",
            cfg.max_iter,
            final_loss
        );
    }

    Ok(FitOutcome { model: model.valid(), iterations, final_loss, converged })
}

/// Churn probability for every row of an already-standardized dataset.
pub fn score_dataset(model: &LogisticModel<InnerBackend>, dataset: &ChurnDataset) -> Result<Vec<f32>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    let device = <InnerBackend as Backend>::Device::default();
    let x = Tensor::<InnerBackend, 2>::from_data(
        TensorData::new(dataset.features().to_vec(), [dataset.len(), dataset.n_features()]),
        &device,
    );
    model
        .predict_proba(x)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read probabilities back from tensor: {e:?}"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::FeatureSchema;
    use crate::data::fixtures::default_record;
    use crate::domain::customer::LabeledCustomer;

    /// Customers whose churn is decided by tenure alone.
    fn separable() -> ChurnDataset {
        let samples: Vec<LabeledCustomer> = (0..40)
            .map(|i| {
                let mut record = default_record();
                record.tenure = if i % 2 == 0 { 1 } else { 60 };
                LabeledCustomer { record, churn: u8::from(i % 2 == 0) }
            })
            .collect();
        let schema = FeatureSchema::fit(&[default_record()]);
        let mut ds = ChurnDataset::encode(&samples, &schema);
        let scaler = crate::data::scaler::Standardizer::fit(ds.features(), ds.n_features());
        ds.standardize(&scaler);
        ds
    }

    fn cfg(max_iter: usize) -> TrainConfig {
        TrainConfig { max_iter, ..TrainConfig::default() }
    }

    #[test]
    fn test_fit_learns_tenure_signal() {
        let ds  = separable();
        let out = fit_logistic(&cfg(300), &ds).unwrap();
        let probs = score_dataset(&out.model, &ds).unwrap();
        // even rows churn (short tenure), odd rows stay
        assert!(probs[0] > 0.8, "short tenure p={}", probs[0]);
        assert!(probs[1] < 0.2, "long tenure p={}", probs[1]);
        assert!(out.final_loss < std::f64::consts::LN_2);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let ds = separable();
        let a  = fit_logistic(&cfg(50), &ds).unwrap();
        let b  = fit_logistic(&cfg(50), &ds).unwrap();
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(score_dataset(&a.model, &ds).unwrap(), score_dataset(&b.model, &ds).unwrap());
    }

    #[test]
    fn test_respects_iteration_cap() {
        let out = fit_logistic(&TrainConfig { max_iter: 5, tol: 0.0, ..TrainConfig::default() }, &separable()).unwrap();
        assert_eq!(out.iterations, 5);
        assert!(!out.converged);
    }

    #[test]
    fn test_rejects_empty_split() {
        let schema = FeatureSchema::fit(&[default_record()]);
        let empty  = ChurnDataset::encode(&[], &schema);
        assert!(fit_logistic(&cfg(10), &empty).is_err());
    }

    #[test]
    fn test_rejects_non_positive_c() {
        let bad = TrainConfig { c: 0.0, ..TrainConfig::default() };
        assert!(fit_logistic(&bad, &separable()).is_err());
    }
}
