//! Error and warning types for policy loading
//!
//! Hard failures (unreadable file, parse error, empty term) are
//! [`PolicyError`]s. Configurations that load but leave some content state
//! unreachable-as-valid are reported as [`PolicyWarning`]s instead.

use std::path::PathBuf;

/// Errors while loading or compiling a policy
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// IO error reading a policy file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Policy file extension is not one of toml/yaml/yml/json
    #[error("unsupported policy format: '{0}'")]
    UnsupportedFormat(String),

    /// TOML parse error
    #[error("invalid toml policy: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("cannot render policy as toml: {0}")]
    TomlRender(#[from] toml::ser::Error),

    /// YAML parse error
    #[error("invalid yaml policy: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error
    #[error("invalid json policy: {0}")]
    Json(#[from] serde_json::Error),

    /// A term or phrase is empty after normalization
    #[error("empty entry in {field}")]
    EmptyTerm { field: &'static str },

    /// Matcher pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl PolicyError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Non-fatal policy misconfiguration, logged once at load time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyWarning {
    /// No script length can satisfy both bounds
    #[error("minScriptWords ({min}) is greater than maxScriptWords ({max})")]
    ScriptLengthBandInverted { min: usize, max: usize },

    /// Auto-correction would reintroduce a banned term
    #[error("replacement '{replacement}' for '{term}' contains banned term '{banned}'")]
    ReplacementContainsBannedTerm {
        term: String,
        replacement: String,
        banned: String,
    },

    /// A replacement is configured for a term that is never flagged
    #[error("replacement configured for '{term}', which is not a banned term")]
    ReplacementForUnbannedTerm { term: String },

    /// Emoji present in both emoji lists
    #[error("emoji '{emoji}' is both allowed and disallowed")]
    EmojiBothAllowedAndDisallowed { emoji: String },

    /// Disallowed emojis exist but auto-correction has nothing to swap in
    #[error("disallowed emojis are configured but allowedEmojis is empty")]
    NoFallbackEmoji,

    /// The CTA substituted by auto-correction is itself generic
    #[error("ctaReplacement contains generic phrase '{phrase}'")]
    CtaReplacementIsGeneric { phrase: String },

    /// The CTA substituted by auto-correction would not satisfy the CTA check
    #[error("ctaReplacement '{replacement}' contains none of requiredCtaPhrases")]
    CtaReplacementNotRequired { replacement: String },
}

/// Result type alias for policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;
