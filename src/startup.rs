//! Application startup and lifecycle management.
//!
//! The provider handle is constructed once here and read-only afterwards;
//! a failed initialization leaves the service running in a degraded state
//! where every generation request answers 503.

use crate::config::PostgenConfig;
use crate::error::AppError;
use crate::handlers::generate::generate_post;
use crate::handlers::health::{health_check, readiness_check};
use crate::services::CredentialStore;
use crate::services::providers::TextProvider;
use crate::services::providers::vertex::{VertexConfig, VertexTextProvider};
use axum::{Router, routing::get, routing::post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Built once at startup, cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PostgenConfig>,
    pub text_provider: Option<Arc<dyn TextProvider>>,
}

/// Initialize the Vertex provider from credentials and configuration.
/// Returns None (after logging) when either is missing; the process keeps
/// serving without a usable model.
fn init_text_provider(config: &PostgenConfig) -> Option<Arc<dyn TextProvider>> {
    let store = CredentialStore::new();
    let key = match store.load(&config.google.credentials_file) {
        Some(key) => key.clone(),
        None => {
            tracing::warn!(
                path = %config.google.credentials_file,
                "Could not initialize Vertex AI: credentials missing"
            );
            return None;
        }
    };

    if config.google.project_id.is_empty() {
        tracing::warn!("Could not initialize Vertex AI: project id missing");
        return None;
    }

    let vertex_config = VertexConfig {
        project_id: config.google.project_id.clone(),
        location: config.google.location.clone(),
        model: config.google.text_model.clone(),
    };

    tracing::info!(
        model = %vertex_config.model,
        location = %vertex_config.location,
        "Initialized Vertex AI text provider"
    );

    Some(Arc::new(VertexTextProvider::new(vertex_config, key)))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_post))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration. Provider
    /// initialization is best-effort; only the listener bind can fail.
    pub async fn build(config: PostgenConfig) -> Result<Self, AppError> {
        let text_provider = init_text_provider(&config);
        Self::with_provider(config, text_provider).await
    }

    /// Build the application with an explicit provider handle. Used by
    /// tests to inject mocks or force the degraded state.
    pub async fn with_provider(
        config: PostgenConfig,
        text_provider: Option<Arc<dyn TextProvider>>,
    ) -> Result<Self, AppError> {
        if text_provider.is_none() {
            tracing::warn!("Starting without a model provider; /generate will answer 503");
        }

        let state = AppState {
            config: Arc::new(config),
            text_provider,
        };

        // Port 0 binds a random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("postgen-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped or a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
