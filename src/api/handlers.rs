// ============================================================
// HTTP API — Handlers
// ============================================================
//   GET  /         → service banner
//   GET  /health   → liveness + whether a model is held
//   POST /predict  → churn prediction for one customer

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::domain::customer::CustomerRecord;
use crate::domain::prediction::Prediction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status:       String,
    pub model_loaded: bool,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Churn Prediction API",
        "status":  "running",
        "version": "1.0",
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model_loaded = state.predictor.is_some();
    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" }.to_string(),
        model_loaded,
    })
}

/// The body is validated before the model check, so a malformed
/// request is a 4xx even when no model is loaded.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CustomerRecord>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let Json(record) = payload?;
    let predictor = state.predictor.as_ref().ok_or(ApiError::ModelNotLoaded)?;

    let prediction = predictor.predict(&record)?;
    tracing::debug!(
        "Prediction: p={:.4} label={} risk={:?}",
        prediction.churn_probability,
        prediction.churn_prediction,
        prediction.risk_level
    );
    Ok(Json(prediction))
}
