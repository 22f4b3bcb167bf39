//! Error types for the aggregation core and the HTTP surface.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

/// Errors raised by the summary pipeline.
///
/// Per-record problems never show up here; they are skipped and counted.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SummaryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("UTC offset out of range: {0} minutes")]
    OffsetOutOfRange(i32),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No running activities found")]
    NoRuns { skipped: usize },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::NoRuns { .. } => "no_runs",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Summary(SummaryError::InvalidInput(_)) => "invalid_input",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoRuns { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Summary(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            ApiError::NoRuns { skipped: 0 } => None,
            ApiError::NoRuns { skipped } => Some(format!("{} malformed records skipped", skipped)),
            ApiError::BadRequest(msg) => Some(msg.clone()),
            ApiError::Summary(SummaryError::InvalidInput(msg)) => Some(msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            details,
        })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(error: ConfigError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}
