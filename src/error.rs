use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors raised by the cost model and the price catalog
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// Rejected input value
    InvalidArgument(String),
    /// Model is not in the price catalog
    ModelNotFound(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::ModelNotFound(msg) => write!(f, "Model not found: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::ModelNotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::InvalidArgument(_) => "invalid_argument",
        AppError::ModelNotFound(_) => "model_not_found",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<CostError> for AppError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            CostError::UnknownModel(name) => Self::ModelNotFound(name),
            CostError::InvalidCatalog(msg) => Self::ConfigError(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgument(format!("JSON error: {}", err))
    }
}
