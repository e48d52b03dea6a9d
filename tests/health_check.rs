//! Integration tests for the health and readiness probes.

use postgen_service::config::{AuthConfig, GoogleConfig, PostgenConfig, ServerConfig};
use postgen_service::services::providers::TextProvider;
use postgen_service::services::providers::mock::MockTextProvider;
use postgen_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> PostgenConfig {
    PostgenConfig {
        server: ServerConfig { port: 0 },
        auth: AuthConfig {
            internal_api_key: "test-internal-key".to_string(),
        },
        google: GoogleConfig {
            project_id: "demo-project".to_string(),
            credentials_file: "google_credentials.json".to_string(),
            location: "us-central1".to_string(),
            text_model: "gemini-2.5-flash-lite".to_string(),
        },
    }
}

async fn spawn_app(provider: Option<Arc<dyn TextProvider>>) -> String {
    let app = Application::with_provider(test_config(), provider)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://localhost:{}", port)
}

#[tokio::test]
async fn health_check_returns_ok() {
    let mock = MockTextProvider::with_response("{}");
    let base = spawn_app(Some(Arc::new(mock))).await;

    let response = Client::new()
        .get(format!("{}/health", base))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "postgen-service");
    assert_eq!(body["model_ready"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_model_state() {
    let base = spawn_app(None).await;

    let response = Client::new()
        .get(format!("{}/health", base))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    // Liveness stays 200; only readiness flips.
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["model_ready"], false);
}

#[tokio::test]
async fn readiness_check_returns_ok_with_provider() {
    let mock = MockTextProvider::with_response("{}");
    let base = spawn_app(Some(Arc::new(mock))).await;

    let response = Client::new()
        .get(format!("{}/ready", base))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn readiness_check_returns_503_without_provider() {
    let base = spawn_app(None).await;

    let response = Client::new()
        .get(format!("{}/ready", base))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 503);
}
