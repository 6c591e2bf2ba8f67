// ============================================================
// Layer 5 — Logistic Regression Model
// ============================================================
//   z = x · w + b          (one Linear layer, 1 output)
//   p = sigmoid(z)         (churn probability)
//
// Training minimises the mean log-loss plus an L2 penalty on
// the weights (not the bias), matching C-regularised logistic
// regression:  loss = mean(ℓ) + ‖w‖² / (2·C·n)
//
// Weights start at zero. The objective is convex, so zero-init
// plus full-batch updates makes every fit reproducible without
// seeding the backend RNG.
//
// Parameters persist as a Burn record encoded to bytes with
// NamedMpkBytesRecorder at full precision; the bytes are then
// embedded in the model artifact next to the feature columns.
//
// Reference: Burn Book §3 (Building Blocks), §5 (Records)

use anyhow::{anyhow, ensure, Result};
use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
    tensor::activation::sigmoid,
};

use crate::data::batcher::ChurnBatch;

#[derive(Config, Debug)]
pub struct LogisticConfig {
    pub n_features: usize,
}

impl LogisticConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LogisticModel<B> {
        let linear = LinearConfig::new(self.n_features, 1)
            .with_initializer(Initializer::Zeros)
            .init(device);
        LogisticModel { linear }
    }
}

#[derive(Module, Debug)]
pub struct LogisticModel<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> LogisticModel<B> {
    /// x: [n, d] → logits: [n]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 1> {
        let [n, _] = x.dims();
        self.linear.forward(x).reshape([n])
    }

    /// x: [n, d] → probabilities: [n]
    pub fn predict_proba(&self, x: Tensor<B, 2>) -> Tensor<B, 1> {
        sigmoid(self.forward(x))
    }

    /// Mean log-loss over the batch plus 0.5 · l2 · ‖w‖².
    pub fn objective(&self, batch: &ChurnBatch<B>, l2: f64) -> Tensor<B, 1> {
        let logits = self.forward(batch.features.clone());
        let w      = self.linear.weight.val();
        let penalty = (w.clone() * w).sum().mul_scalar(0.5 * l2);
        log_loss(logits, batch.targets.clone()) + penalty
    }

    /// Detach the learned parameters into plain tensors for serving.
    pub fn freeze(&self) -> FrozenLogistic<B> {
        let weight = self.linear.weight.val();
        let bias = match &self.linear.bias {
            Some(b) => b.val(),
            None    => Tensor::zeros([1], &weight.device()),
        };
        FrozenLogistic { weight, bias }
    }
}

/// Numerically stable mean binary cross-entropy on logits:
///   ℓ(z, y) = max(z, 0) − z·y + ln(1 + e^(−|z|))
pub fn log_loss<B: Backend>(logits: Tensor<B, 1>, targets: Tensor<B, 1>) -> Tensor<B, 1> {
    let positive = logits.clone().clamp_min(0.0);
    let softplus = logits.clone().abs().neg().exp().log1p();
    (positive - logits * targets + softplus).mean()
}

// ─── FrozenLogistic ───────────────────────────────────────────────────────────
/// Read-only weights of a fitted model.
///
/// Holds bare tensors instead of trainable `Param`s, so it is
/// `Send + Sync` and can sit behind an `Arc` shared by every
/// request handler.
#[derive(Debug, Clone)]
pub struct FrozenLogistic<B: Backend> {
    /// shape: [d, 1]
    weight: Tensor<B, 2>,
    /// shape: [1]
    bias:   Tensor<B, 1>,
}

impl<B: Backend> FrozenLogistic<B> {
    /// x: [n, d] → probabilities: [n]
    pub fn predict_proba(&self, x: Tensor<B, 2>) -> Tensor<B, 1> {
        let [n, _] = x.dims();
        let logits = x.matmul(self.weight.clone()) + self.bias.clone().unsqueeze::<2>();
        sigmoid(logits.reshape([n]))
    }
}

// ─── Record bytes ─────────────────────────────────────────────────────────────
type WeightsRecorder = NamedMpkBytesRecorder<FullPrecisionSettings>;

/// Serialise the model parameters to MessagePack bytes.
pub fn encode_weights<B: Backend>(model: &LogisticModel<B>) -> Result<Vec<u8>> {
    WeightsRecorder::default()
        .record(model.clone().into_record(), ())
        .map_err(|e| anyhow!("Failed to encode model weights: {e:?}"))
}

/// Rebuild a model of `n_features` inputs from bytes made by `encode_weights`.
pub fn decode_weights<B: Backend>(
    bytes:      Vec<u8>,
    n_features: usize,
    device:     &B::Device,
) -> Result<LogisticModel<B>> {
    let record: LogisticModelRecord<B> = WeightsRecorder::default()
        .load(bytes, device)
        .map_err(|e| anyhow!("Failed to decode model weights: {e:?}"))?;

    let width = record.linear.weight.val().dims()[0];
    ensure!(
        width == n_features,
        "Model weights expect {} features but the artifact lists {} columns",
        width,
        n_features
    );
    Ok(LogisticConfig::new(n_features).init::<B>(device).load_record(record))
}
