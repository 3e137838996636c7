//! Policy file loading (TOML, YAML, JSON)

use crate::config::PolicyConfig;
use crate::error::{PolicyError, PolicyResult};
use crate::policy::ValidationPolicy;
use std::path::Path;

/// Supported policy file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl PolicyFormat {
    /// Detect format from file extension
    ///
    /// # Errors
    /// `PolicyError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> PolicyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(PolicyError::UnsupportedFormat(ext)),
        }
    }
}

impl PolicyConfig {
    /// Parse configuration text in the given format
    ///
    /// # Errors
    /// Format-specific parse errors.
    pub fn parse(source: &str, format: PolicyFormat) -> PolicyResult<Self> {
        let config = match format {
            PolicyFormat::Toml => toml::from_str(source)?,
            PolicyFormat::Yaml => serde_yaml::from_str(source)?,
            PolicyFormat::Json => serde_json::from_str(source)?,
        };
        Ok(config)
    }

    /// Read configuration from a file, format chosen by extension
    ///
    /// # Errors
    /// IO, format or parse errors.
    pub fn load(path: impl AsRef<Path>) -> PolicyResult<Self> {
        let path = path.as_ref();
        let format = PolicyFormat::from_path(path)?;
        let source =
            std::fs::read_to_string(path).map_err(|e| PolicyError::io_error(path, e))?;
        Self::parse(&source, format)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// `PolicyError::TomlRender` if serialization fails.
    pub fn to_toml(&self) -> PolicyResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl ValidationPolicy {
    /// Load and compile a policy file
    ///
    /// # Errors
    /// See [`PolicyConfig::load`] and [`ValidationPolicy::from_config`].
    pub fn load(path: impl AsRef<Path>) -> PolicyResult<Self> {
        let path = path.as_ref();
        let policy = Self::from_config(PolicyConfig::load(path)?)?;
        tracing::info!(
            path = %path.display(),
            version = policy.version(),
            warnings = policy.warnings().len(),
            "loaded validation policy"
        );
        Ok(policy)
    }
}
