// ============================================================
// HTTP API — Error Responses
// ============================================================
// Every failure leaves the service as {"detail": "..."}:
//
//   ModelNotLoaded → 503
//   InvalidBody    → axum's rejection status (422 / 400 / 415)
//   Prediction     → 500

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Prediction(format!("{e:#}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("{}", detail);
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
