//! Application configuration (`hookcheck.toml`)
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! max_body_bytes = 65536
//!
//! [policy]
//! path = "config/policy.toml"
//!
//! [generation]
//! enabled = true
//! model = "gpt-4o-mini"
//! api_key_env = "HOOKCHECK_API_KEY"
//! ```

use crate::error::{ServerError, ServerResult};
use hookcheck_generation::GenerationConfig;
use hookcheck_policy::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default request body limit
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024;

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// `[policy]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySource {
    /// Policy file; the built-in policy when unset
    pub path: Option<PathBuf>,
}

/// `[generation]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    /// Expose `/api/content/generate`
    pub enabled: bool,
    #[serde(flatten)]
    pub client: GenerationConfig,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            enabled: true,
            client: GenerationConfig::default(),
        }
    }
}

/// Top-level application config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub policy: PolicySource,
    pub generation: GenerationSection,
}

impl AppConfig {
    /// Create with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With listen address
    #[must_use]
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.server.bind = bind.into();
        self
    }

    /// With policy file
    #[must_use]
    pub fn with_policy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy.path = Some(path.into());
        self
    }

    /// With generation settings
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation.client = generation;
        self
    }

    /// With generation endpoint switched on or off
    #[must_use]
    pub fn with_generation_enabled(mut self, enabled: bool) -> Self {
        self.generation.enabled = enabled;
        self
    }

    /// Load from a TOML file.
    ///
    /// A relative `[policy] path` is resolved against the config file's
    /// directory.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Config` if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ServerError::io_error(path, e))?;
        let mut config: Self = toml::from_str(&source)?;

        if let (Some(policy), Some(dir)) = (config.policy.path.as_mut(), path.parent()) {
            if policy.is_relative() {
                *policy = dir.join(&*policy);
            }
        }
        tracing::info!(path = %path.display(), "loaded app config");
        Ok(config)
    }

    /// Parsed listen address.
    ///
    /// # Errors
    /// `InvalidBind` if `bind` is not `host:port`.
    pub fn bind_addr(&self) -> ServerResult<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|_| ServerError::InvalidBind(self.server.bind.clone()))
    }

    /// Load the configured policy, or the built-in one.
    ///
    /// # Errors
    /// `Policy` if the policy file cannot be loaded.
    pub fn load_policy(&self) -> ServerResult<ValidationPolicy> {
        match &self.policy.path {
            Some(path) => Ok(ValidationPolicy::load(path)?),
            None => Ok(ValidationPolicy::lima_real_estate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_file_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn sections_override_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:9000"

            [generation]
            enabled = false
            model = "local"
            max_attempts = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!config.generation.enabled);
        assert_eq!(config.generation.client.model, "local");
        assert_eq!(config.generation.client.max_attempts, 5);
        assert_eq!(config.generation.client.accept_score, 85);
    }

    #[test]
    fn relative_policy_path_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookcheck.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[policy]\npath = \"policy.toml\"").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.policy.path, Some(dir.path().join("policy.toml")));
    }

    #[test]
    fn bad_bind_rejected() {
        let err = AppConfig::new().with_bind("localhost").bind_addr().unwrap_err();
        assert!(matches!(err, ServerError::InvalidBind(b) if b == "localhost"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load("/nonexistent/hookcheck.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io { .. }));
    }

    #[test]
    fn default_policy_is_builtin() {
        let policy = AppConfig::new().load_policy().unwrap();
        assert_eq!(policy.config(), ValidationPolicy::lima_real_estate().config());
    }
}
