//! Error types for the server and CLI

use hookcheck_core::ValidatorError;
use hookcheck_generation::{GenerationError, WorkflowError};
use hookcheck_policy::PolicyError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use warp::http::StatusCode;

/// Startup and configuration errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid bind address: {0}")]
    InvalidBind(String),

    #[error("failed to bind: {0}")]
    Bind(#[from] warp::Error),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ServerError {
    /// Create an IO error for `path`
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for startup
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors surfaced to HTTP callers as `{ "error": ... }`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("generation backend is not configured")]
    GenerationUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validator(_) | Self::MalformedJson(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Workflow(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Workflow(_) => StatusCode::BAD_GATEWAY,
            Self::GenerationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::from(ValidatorError::invalid_input("hook is required")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidatorError::UnsupportedAction("publish".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(WorkflowError::GenerationFailed(GenerationError::EmptyCompletion))
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(WorkflowError::InvalidInput("prompt is empty".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MalformedJson("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::GenerationUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn unsupported_action_message() {
        let err = ApiError::from(ValidatorError::UnsupportedAction("publish".into()));
        assert_eq!(err.to_string(), "unsupported action: 'publish'");
    }
}
