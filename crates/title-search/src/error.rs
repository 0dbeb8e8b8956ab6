use crate::config::ConfigError;
use crate::search::form::ValidationErrors;
use crate::search::gateway::SearchFailure;
use crate::telemetry::TelemetryError;

/// Top-level error for the command line front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("title search failed: {0}")]
    Search(#[from] SearchFailure),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
