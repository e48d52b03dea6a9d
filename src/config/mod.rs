use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Default service-account key file, relative to the working directory.
const DEFAULT_CREDENTIALS_FILE: &str = "google_credentials.json";

/// Default Vertex AI region.
const DEFAULT_LOCATION: &str = "us-central1";

/// Default generation model.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash-lite";

#[derive(Debug, Clone, Deserialize)]
pub struct PostgenConfig {
    #[serde(flatten)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret checked against the x-api-key header on every request.
    pub internal_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Google Cloud project id. May be empty; generation stays unavailable
    /// until an operator provides one.
    pub project_id: String,
    /// Path to the service-account key file.
    pub credentials_file: String,
    /// Vertex AI region.
    pub location: String,
    /// Model for post generation.
    pub text_model: String,
}

impl PostgenConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let server = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(PostgenConfig {
            server,
            auth: AuthConfig {
                internal_api_key: get_env("INTERNAL_API_KEY", None, is_prod)?,
            },
            google: GoogleConfig {
                project_id: get_env("GCP_PROJECT_ID", Some(""), is_prod)?,
                credentials_file: get_env(
                    "GCP_CREDENTIALS_FILE",
                    Some(DEFAULT_CREDENTIALS_FILE),
                    is_prod,
                )?,
                location: get_env("GCP_LOCATION", Some(DEFAULT_LOCATION), is_prod)?,
                text_model: get_env("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
