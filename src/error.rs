use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Every failure the request path can produce. The mapping to status codes
/// is total: one variant, one status, one fixed message. Upstream detail is
/// carried for server-side logging and never serialized into the body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("access denied")]
    Forbidden,

    #[error("AI service not initialized")]
    ServiceUnavailable,

    #[error("generation error: {0}")]
    GenerationError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, error_message) = match self {
            AppError::Forbidden => (StatusCode::FORBIDDEN, "access denied".to_string()),
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI service not initialized".to_string(),
            ),
            AppError::GenerationError(err) => {
                tracing::error!(error = %err, "Post generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "generation error".to_string(),
                )
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn forbidden_maps_to_403() {
        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unavailable_maps_to_503() {
        let response = AppError::ServiceUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn generation_error_maps_to_500() {
        let response =
            AppError::GenerationError(anyhow::anyhow!("upstream exploded")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
