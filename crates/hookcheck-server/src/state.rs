//! Shared handler state

use crate::config::AppConfig;
use crate::error::ServerResult;
use hookcheck_core::ContentValidator;
use hookcheck_generation::{GenerationError, GenerationWorkflow, HttpGenerationClient};
use hookcheck_policy::ValidationPolicy;
use std::sync::Arc;
use tracing::{info, warn};

/// Validator plus optional generation workflow, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    validator: ContentValidator,
    workflow: Option<Arc<GenerationWorkflow>>,
}

impl AppState {
    /// State without a generation backend
    #[must_use]
    pub fn new(validator: ContentValidator) -> Self {
        Self {
            validator,
            workflow: None,
        }
    }

    /// With generation workflow
    #[must_use]
    pub fn with_workflow(mut self, workflow: GenerationWorkflow) -> Self {
        self.workflow = Some(Arc::new(workflow));
        self
    }

    /// Build from app config.
    ///
    /// A missing API key disables generation with a warning instead of
    /// failing startup.
    ///
    /// # Errors
    /// Policy load failures and HTTP client construction failures.
    pub fn from_config(config: &AppConfig) -> ServerResult<Self> {
        let policy = Arc::new(config.load_policy()?);
        let generation = &config.generation.client;
        let validator = ContentValidator::new(policy).with_accept_score(generation.accept_score);
        let state = Self::new(validator.clone());

        if !config.generation.enabled {
            info!("generation disabled in config");
            return Ok(state);
        }
        match HttpGenerationClient::from_config(generation) {
            Ok(client) => {
                info!(endpoint = client.endpoint(), model = %generation.model, "generation enabled");
                let workflow =
                    GenerationWorkflow::new(Arc::new(client), validator).with_config(generation);
                Ok(state.with_workflow(workflow))
            }
            Err(err @ GenerationError::MissingApiKey { .. }) => {
                warn!(error = %err, "generation disabled");
                Ok(state)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Content validator
    #[must_use]
    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    /// Active policy
    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        self.validator.policy()
    }

    /// Generation workflow, when a backend is configured
    #[must_use]
    pub fn workflow(&self) -> Option<&Arc<GenerationWorkflow>> {
        self.workflow.as_ref()
    }
}
