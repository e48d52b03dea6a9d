//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// Canned outcome produced by the mock on every call.
enum Outcome {
    Text(String),
    NetworkError(String),
    ApiError(String),
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    outcome: Outcome,
}

impl MockTextProvider {
    /// Mock that returns the given text for every prompt.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Text(text.into()),
        }
    }

    /// Mock that fails every call with a network-level error.
    pub fn failing_with_network_error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::NetworkError(message.into()),
        }
    }

    /// Mock that fails every call with a provider API error.
    pub fn failing_with_api_error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::ApiError(message.into()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        match &self.outcome {
            Outcome::Text(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            Outcome::NetworkError(msg) => Err(ProviderError::NetworkError(msg.clone())),
            Outcome::ApiError(msg) => Err(ProviderError::ApiError(msg.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
