//! The POST /generate endpoint.
//!
//! Validates the caller's key, checks provider readiness, builds the prompt
//! and passes the model's JSON reply through to the caller unchanged.

use crate::error::AppError;
use crate::models::TopicRequest;
use crate::services::providers::GenerationParams;
use crate::startup::AppState;
use axum::{Json, extract::State, http::HeaderMap};

/// Build the instructional prompt for a topic. The topic is embedded
/// verbatim; no sanitization is applied.
fn build_prompt(topic: &str) -> String {
    format!(
        "Act as a pedagogical expert.\n\
         Create an educational blog post about: \"{topic}\".\n\
         \n\
         Return ONLY valid JSON in this format:\n\
         {{\n\
         \x20   \"title\": \"Creative Title\",\n\
         \x20   \"content\": \"Didactic content in basic HTML (may use <p>, <b>, <ul>)\",\n\
         \x20   \"tags\": [\"tag1\", \"tag2\"]\n\
         }}"
    )
}

#[tracing::instrument(skip(state, headers, request), fields(topic_len = request.topic.len()))]
pub async fn generate_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TopicRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let supplied_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    if supplied_key != Some(state.config.auth.internal_api_key.as_str()) {
        return Err(AppError::Forbidden);
    }

    let provider = state
        .text_provider
        .as_ref()
        .ok_or(AppError::ServiceUnavailable)?;

    let prompt = build_prompt(&request.topic);
    let params = GenerationParams {
        response_mime_type: Some("application/json".to_string()),
    };

    let response = provider
        .generate(&prompt, &params)
        .await
        .map_err(|e| AppError::GenerationError(anyhow::anyhow!(e)))?;

    let text = response
        .text
        .ok_or_else(|| AppError::GenerationError(anyhow::anyhow!("Model returned no text")))?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Generated post"
    );

    let post: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| AppError::GenerationError(anyhow::anyhow!("Malformed model output: {}", e)))?;

    Ok(Json(post))
}
