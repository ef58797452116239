use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for the dashboard hub.
///
/// Data-level problems never reach a response: extractors turn them into
/// absent sections. What remains is startup configuration and infrastructure.
#[derive(Debug)]
pub enum HubError {
    Io(String),
    Csv(String),
    Config(String),
    Internal(String),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io_error: {msg}"),
            Self::Csv(msg) => write!(f, "csv_error: {msg}"),
            Self::Config(msg) => write!(f, "config_error: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for HubError {}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Io(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("io_error:{msg}")),
            Self::Csv(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("csv_error:{msg}")),
            Self::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("config_error:{msg}")),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for HubError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

impl From<serde_yaml::Error> for HubError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(format!("invalid YAML: {e}"))
    }
}

impl From<tokio::task::JoinError> for HubError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(format!("payload task failed: {e}"))
    }
}
