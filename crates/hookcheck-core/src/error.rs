//! Error types for hookcheck Core
//!
//! Validation itself is infallible: empty or odd text is just content to
//! score. Errors only arise where untyped input enters (JSON request bodies).

/// Main validator error type
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// Input was missing, null, or not a string
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Request named an action other than `validate` / `correct`
    #[error("unsupported action: '{0}'")]
    UnsupportedAction(String),
}

impl ValidatorError {
    /// Create invalid input error
    #[inline]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the caller sent a bad request (as opposed to a server fault)
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::UnsupportedAction(_))
    }
}

/// Result type alias for validator operations
pub type ValidatorResult<T> = Result<T, ValidatorError>;
