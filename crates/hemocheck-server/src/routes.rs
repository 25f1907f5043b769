//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hemocheck_core::{ClassificationResult, Error, ModelInfo, Sample};
use serde_json::json;
use std::time::Instant;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, error, warn};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    let api = Router::new()
        .route("/anemia", post(classify_anemia))
        .route("/anemia/feature-importance", get(feature_importance))
        .route("/anemia/model-info", get(model_info))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api/v1", api)
        .route("/metrics", get(metrics))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Classify one blood-test sample
async fn classify_anemia(
    State(state): State<AppState>,
    payload: Result<Json<Sample>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    metrics::counter!("hemocheck_requests_total", "endpoint" => "classify").increment(1);

    let Json(sample) = payload?;
    sample
        .validate()
        .map_err(|e| AppError::from_engine("Invalid sample", e))?;

    let engine = state
        .engine
        .engine()
        .map_err(|e| AppError::from_engine("Classification error", e))?;

    // k-NN cost grows with the stored points; keep it off the async workers
    let (result, elapsed) = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        let result = engine.classify(&sample);
        (result, started.elapsed())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Classification error: {}", e)))?;
    let result = result.map_err(|e| AppError::from_engine("Classification error", e))?;

    metrics::histogram!("hemocheck_inference_latency_us").record(elapsed.as_micros() as f64);
    metrics::counter!(
        "hemocheck_classifications_total",
        "model" => result.model_used.as_str(),
        "confidence" => result.confidence.as_str()
    )
    .increment(1);

    debug!(
        model = %result.model_used,
        prediction = result.prediction,
        probability = result.probability,
        "Classification served"
    );

    Ok(Json(result))
}

/// Feature importance of the active model
async fn feature_importance(State(state): State<AppState>) -> Result<Response, AppError> {
    metrics::counter!("hemocheck_requests_total", "endpoint" => "feature_importance").increment(1);

    let engine = state
        .engine
        .engine()
        .map_err(|e| AppError::from_engine("Error retrieving feature importance", e))?;

    match engine.feature_importance() {
        Ok(Some(importance)) => {
            Ok(Json(json!({ "feature_importance": importance })).into_response())
        }
        Ok(None) => Err(AppError::NotFound(
            "Feature importance not available for this model type".to_string(),
        )),
        Err(e) => Err(AppError::from_engine("Error retrieving feature importance", e)),
    }
}

/// Metadata about the active model
async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfo>, AppError> {
    metrics::counter!("hemocheck_requests_total", "endpoint" => "model_info").increment(1);

    let engine = state
        .engine
        .engine()
        .map_err(|e| AppError::from_engine("Error retrieving model info", e))?;
    Ok(Json(engine.model_info()))
}

/// Liveness plus whether a model is being served
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "anemia-classification",
        "models_available": state.engine.is_ready(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

async fn fallback() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Anemia classification service unavailable")]
    Unavailable,

    #[error("{1}")]
    InvalidRequest(StatusCode, String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Map an engine error, prefixing internal failures with `context`
    pub fn from_engine(context: &str, err: Error) -> Self {
        match err {
            Error::ServiceUnavailable { reason } => {
                warn!(reason = %reason, "Request rejected: no engine available");
                Self::Unavailable
            }
            Error::InvalidSample(msg) => Self::InvalidRequest(StatusCode::UNPROCESSABLE_ENTITY, msg),
            other => {
                error!(kind = other.kind(), error = %other, "{}", context);
                Self::Internal(format!("{}: {}", context, other))
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest(status, _) => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::InvalidRequest(..) => "invalid_request",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Malformed JSON is reported like any other invalid body
        let status = match &rejection {
            JsonRejection::JsonSyntaxError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => rejection.status(),
        };
        Self::InvalidRequest(status, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        metrics::counter!("hemocheck_errors_total", "kind" => self.kind()).increment(1);

        let body = json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
