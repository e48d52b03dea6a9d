//! Health and readiness probes.

use crate::startup::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Liveness probe. Always 200 while the process serves traffic; reports
/// whether the model provider was initialized.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "postgen-service",
            "version": env!("CARGO_PKG_VERSION"),
            "model_ready": state.text_provider.is_some(),
        })),
    )
}

/// Readiness probe. 503 until the provider is initialized and healthy.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match &state.text_provider {
        Some(provider) => match provider.health_check().await {
            Ok(_) => StatusCode::OK,
            Err(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}
