//! Error types for generation

use crate::workflow::GeneratedContent;
use thiserror::Error;

/// Errors from a single call to the generation backend
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("backend returned an empty completion")]
    EmptyCompletion,

    #[error("API key not set: environment variable {var} is missing or empty")]
    MissingApiKey { var: String },
}

impl GenerationError {
    /// Whether another attempt may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::MalformedResponse(_) | Self::EmptyCompletion => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingApiKey { .. } => false,
        }
    }
}

/// Errors from the generate-validate workflow
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("generation failed: {0}")]
    GenerationFailed(#[from] GenerationError),

    #[error(
        "no candidate reached the acceptance score; best scored {score} after {attempts} attempts",
        score = .best.report.total_score,
        attempts = .best.attempts
    )]
    ValidationFailed { best: Box<GeneratedContent> },
}

impl WorkflowError {
    /// Best candidate produced before giving up, if any
    #[must_use]
    pub fn best(&self) -> Option<&GeneratedContent> {
        match self {
            Self::ValidationFailed { best } => Some(best),
            _ => None,
        }
    }

    /// Caller error rather than a backend or quality failure
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type for workflow runs
pub type WorkflowResult<T> = Result<T, WorkflowError>;
