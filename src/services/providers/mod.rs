//! AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the generation
//! backend, allowing the Vertex AI provider to be swapped for a mock.

pub mod mock;
pub mod vertex;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider response.
pub struct ProviderResponse {
    /// Raw text returned by the model.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// MIME type the model should respond with (e.g. application/json).
    pub response_mime_type: Option<String>,
}

/// Trait for text generation providers (e.g., Vertex AI).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for the given prompt.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
