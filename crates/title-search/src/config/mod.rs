use std::env;

/// Top-level configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api: ApiConfig::new(base_url)?,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for reaching the title search API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl { value: raw });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL must carry an http:// or https:// scheme, got '{value}'")]
    InvalidBaseUrl { value: String },
}
