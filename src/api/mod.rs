// ============================================================
// Layer 1 — HTTP API (Presentation Layer)
// ============================================================
// The long-running face of the service, built on axum:
//
//   config.rs   — ServeConfig loaded from YAML
//   handlers.rs — GET /, GET /health, POST /predict
//   error.rs    — ApiError → {"detail": ...} responses
//
// The model is loaded BEFORE the listener binds and shared as an
// immutable Arc<AppState>. Handlers only read it: no locks, no
// reloading. Like the CLI, this layer delegates every decision
// to Layer 2.

pub mod config;
pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::application::predict_use_case::PredictUseCase;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub predictor: Option<PredictUseCase>,
}

impl AppState {
    pub fn with_predictor(predictor: PredictUseCase) -> Self {
        Self { predictor: Some(predictor) }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .with_state(state)
}

/// Bind `listen_addr` and serve until Ctrl-C / SIGTERM.
pub async fn serve(listen_addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Cannot bind {listen_addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix. A handler that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c    => tracing::info!("Shutdown signal received (Ctrl-C)"),
        _ = terminate => tracing::info!("Shutdown signal received (SIGTERM)"),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::predict_use_case::trained_predictor;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn loaded_app() -> Router {
        build_router(Arc::new(AppState::with_predictor(trained_predictor())))
    }

    fn empty_app() -> Router {
        build_router(Arc::new(AppState { predictor: None }))
    }

    async fn json_body(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::post("/predict")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn default_payload() -> Value {
        json!({
            "gender": 1, "SeniorCitizen": 0, "Partner": 1, "Dependents": 0,
            "tenure": 12, "PhoneService": 1, "PaperlessBilling": 1,
            "MonthlyCharges": 70.5, "TotalCharges": 850.0
        })
    }

    /// One-month senior customer with high charges; optional fields defaulted.
    fn short_tenure_payload() -> Value {
        json!({
            "gender": 1, "SeniorCitizen": 1, "Partner": 1, "Dependents": 0,
            "tenure": 1, "PhoneService": 1, "PaperlessBilling": 1,
            "MonthlyCharges": 100.0, "TotalCharges": 100.0
        })
    }

    fn high_risk_payload() -> Value {
        json!({
            "gender": 0, "SeniorCitizen": 1, "Partner": 0, "Dependents": 0,
            "tenure": 1, "PhoneService": 1, "PaperlessBilling": 1,
            "MonthlyCharges": 95.0, "TotalCharges": 95.0,
            "MultipleLines": "Yes", "InternetService": "Fiber optic",
            "OnlineSecurity": "No", "OnlineBackup": "No",
            "DeviceProtection": "No", "TechSupport": "No",
            "StreamingTV": "Yes", "StreamingMovies": "Yes",
            "Contract": "Month-to-month", "PaymentMethod": "Electronic check"
        })
    }

    fn assert_valid_prediction(body: &Value) {
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 3);

        let label = body["churn_prediction"].as_u64().unwrap();
        let p     = body["churn_probability"].as_f64().unwrap();
        let risk  = body["risk_level"].as_str().unwrap();

        assert!(label == 0 || label == 1);
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(label, u64::from(p > 0.5));
        let expected = if p > 0.7 { "High" } else if p > 0.4 { "Medium" } else { "Low" };
        assert_eq!(risk, expected);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let resp = empty_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["message"], "Churn Prediction API");
        assert_eq!(body["status"], "running");
        assert_eq!(body["version"], "1.0");
    }

    #[tokio::test]
    async fn test_health_without_model() {
        let resp = empty_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["model_loaded"], false);
        assert_eq!(body["status"], "degraded");
    }

    #[tokio::test]
    async fn test_health_with_model() {
        let resp = loaded_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(resp).await;
        assert_eq!(body, json!({ "status": "healthy", "model_loaded": true }));
    }

    #[tokio::test]
    async fn test_predict_without_model_is_503() {
        let resp = empty_app().oneshot(post_json(&default_payload())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(resp).await, json!({ "detail": "Model not loaded" }));
    }

    #[tokio::test]
    async fn test_predict_with_defaults() {
        let resp = loaded_app().oneshot(post_json(&default_payload())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_valid_prediction(&json_body(resp).await);
    }

    #[tokio::test]
    async fn test_predict_high_risk_profile() {
        let resp = loaded_app().oneshot(post_json(&high_risk_payload())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_valid_prediction(&json_body(resp).await);
    }

    #[tokio::test]
    async fn test_short_tenure_scores_above_twelve_month_customer() {
        let app = loaded_app();

        let resp = app.clone().oneshot(post_json(&short_tenure_payload())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let short = json_body(resp).await;
        assert_valid_prediction(&short);

        let resp = app.oneshot(post_json(&default_payload())).await.unwrap();
        let twelve = json_body(resp).await;

        let p_short  = short["churn_probability"].as_f64().unwrap();
        let p_twelve = twelve["churn_probability"].as_f64().unwrap();
        assert!(p_short > p_twelve, "1 month {p_short} vs 12 months {p_twelve}");
    }

    #[tokio::test]
    async fn test_predict_is_deterministic() {
        let app = loaded_app();
        let first  = json_body(app.clone().oneshot(post_json(&high_risk_payload())).await.unwrap()).await;
        let second = json_body(app.oneshot(post_json(&high_risk_payload())).await.unwrap()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_required_field_is_422() {
        let mut payload = default_payload();
        payload.as_object_mut().unwrap().remove("tenure");
        let resp = loaded_app().oneshot(post_json(&payload)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("tenure"));
    }

    #[tokio::test]
    async fn test_wrong_type_is_422() {
        let mut payload = default_payload();
        payload["MonthlyCharges"] = json!("a lot");
        let resp = loaded_app().oneshot(post_json(&payload)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let req = Request::post("/predict")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = empty_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let req = Request::post("/predict")
            .body(Body::from(default_payload().to_string()))
            .unwrap();
        let resp = loaded_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
