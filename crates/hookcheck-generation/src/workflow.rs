//! Generate → validate → retry
//!
//! The workflow owns no text rules of its own: every candidate goes through
//! the same [`ContentValidator`] the HTTP and CLI surfaces use.

use crate::candidate::parse_candidate;
use crate::client::{GenerationClient, GenerationConfig};
use crate::error::{GenerationError, WorkflowError, WorkflowResult};
use hookcheck_core::{ContentValidator, ValidationReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// A generated candidate with its report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub hook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub report: ValidationReport,
    /// Attempts consumed by the run that produced this candidate
    pub attempts: u32,
    /// Whether the acceptance gate was met
    pub accepted: bool,
}

/// Bounded generate-and-validate loop
#[derive(Clone)]
pub struct GenerationWorkflow {
    client: Arc<dyn GenerationClient>,
    validator: ContentValidator,
    max_attempts: u32,
    accept_score: u8,
    require_valid: bool,
}

impl std::fmt::Debug for GenerationWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationWorkflow")
            .field("max_attempts", &self.max_attempts)
            .field("accept_score", &self.accept_score)
            .field("require_valid", &self.require_valid)
            .finish_non_exhaustive()
    }
}

impl GenerationWorkflow {
    /// Workflow with default bounds (3 attempts, accept at 85)
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>, validator: ContentValidator) -> Self {
        let accept_score = validator.accept_score();
        Self {
            client,
            validator,
            max_attempts: hookcheck_core::DEFAULT_CORRECTION_ROUNDS,
            accept_score,
            require_valid: false,
        }
    }

    /// Apply attempt bound and acceptance gate from config
    #[must_use]
    pub fn with_config(mut self, config: &GenerationConfig) -> Self {
        self.max_attempts = config.max_attempts;
        self.accept_score = config.accept_score;
        self.require_valid = config.require_valid;
        self
    }

    /// With attempt bound
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// With acceptance score
    #[must_use]
    pub fn with_accept_score(mut self, score: u8) -> Self {
        self.accept_score = score;
        self
    }

    /// Also require `is_valid` (no Critical issue) before accepting
    #[must_use]
    pub fn with_require_valid(mut self, require: bool) -> Self {
        self.require_valid = require;
        self
    }

    /// Attempt bound
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Validator used on every candidate
    #[must_use]
    pub fn validator(&self) -> &ContentValidator {
        &self.validator
    }

    fn accepts(&self, report: &ValidationReport) -> bool {
        report.total_score >= self.accept_score && (!self.require_valid || report.is_valid())
    }

    /// Generate until a candidate passes the gate or attempts run out.
    ///
    /// Attempts run one at a time. A backend error that is retryable consumes
    /// an attempt; a non-retryable one ends the run immediately, returning
    /// the best candidate so far if there is one.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank prompt or a zero attempt bound
    /// - `GenerationFailed` when no attempt produced a candidate
    /// - `ValidationFailed` carrying the best candidate when none passed
    #[tracing::instrument(skip_all, fields(max_attempts = self.max_attempts, accept_score = self.accept_score))]
    pub async fn run(&self, prompt: &str) -> WorkflowResult<GeneratedContent> {
        if prompt.trim().is_empty() {
            return Err(WorkflowError::InvalidInput("prompt is empty".into()));
        }
        if self.max_attempts == 0 {
            return Err(WorkflowError::InvalidInput(
                "max_attempts must be at least 1".into(),
            ));
        }

        let mut best: Option<GeneratedContent> = None;
        let mut last_error: Option<GenerationError> = None;

        for attempt in 1..=self.max_attempts {
            let candidate = match self.client.generate(prompt).await.and_then(|raw| parse_candidate(&raw)) {
                Ok(candidate) => candidate,
                Err(err) if err.is_retryable() => {
                    warn!(attempt, error = %err, "generation attempt failed");
                    last_error = Some(err);
                    continue;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "generation aborted");
                    return Err(match best.take() {
                        Some(mut best) => {
                            best.attempts = attempt;
                            WorkflowError::ValidationFailed {
                                best: Box::new(best),
                            }
                        }
                        None => WorkflowError::GenerationFailed(err),
                    });
                }
            };

            let report = self
                .validator
                .validate(&candidate.hook, candidate.script.as_deref());
            let accepted = self.accepts(&report);
            info!(
                attempt,
                score = report.total_score,
                valid = report.is_valid(),
                accepted,
                "candidate validated"
            );

            let content = GeneratedContent {
                hook: candidate.hook,
                script: candidate.script,
                report,
                attempts: attempt,
                accepted,
            };
            if accepted {
                return Ok(content);
            }
            let better = best
                .as_ref()
                .map_or(true, |b| content.report.total_score > b.report.total_score);
            if better {
                best = Some(content);
            }
        }

        match best {
            Some(mut best) => {
                best.attempts = self.max_attempts;
                Err(WorkflowError::ValidationFailed {
                    best: Box::new(best),
                })
            }
            None => Err(WorkflowError::GenerationFailed(
                last_error.unwrap_or(GenerationError::EmptyCompletion),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGenerationClient;
    use hookcheck_test_utils::{script_with_cta, CLEAN_HOOK, HYPE_HOOK, SPECIFIC_CTA};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    fn json_candidate(hook: &str, script: Option<&str>) -> String {
        serde_json::json!({ "hook": hook, "script": script }).to_string()
    }

    fn workflow(mock: MockGenerationClient) -> GenerationWorkflow {
        GenerationWorkflow::new(Arc::new(mock), ContentValidator::default())
    }

    #[tokio::test]
    async fn accepts_first_good_candidate() {
        let script = script_with_cta(200, SPECIFIC_CTA);
        let mut mock = MockGenerationClient::new();
        let raw = json_candidate(CLEAN_HOOK, Some(&script));
        mock.expect_generate()
            .times(1)
            .returning(move |_| Ok(raw.clone()));

        let content = workflow(mock).run("Surco").await.unwrap();
        assert!(content.accepted);
        assert_eq!(content.attempts, 1);
        assert_eq!(content.report.total_score, 100);
        assert_eq!(content.hook, CLEAN_HOOK);
    }

    #[tokio::test]
    async fn retries_until_threshold() {
        let mut seq = Sequence::new();
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HYPE_HOOK.to_string()));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CLEAN_HOOK.to_string()));

        let content = workflow(mock).run("Surco").await.unwrap();
        assert!(content.accepted);
        assert_eq!(content.attempts, 2);
    }

    #[tokio::test]
    async fn exhausted_attempts_carry_best_candidate() {
        let mut seq = Sequence::new();
        let mut mock = MockGenerationClient::new();
        // 65, then 100 - 25 - 25 - 10 = 40, then 65 again
        for raw in [HYPE_HOOK, "Boom garantizado 🔥", HYPE_HOOK] {
            mock.expect_generate()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(raw.to_string()));
        }

        let err = workflow(mock).run("Surco").await.unwrap_err();
        let best = err.best().expect("best candidate");
        assert_eq!(best.hook, HYPE_HOOK);
        assert_eq!(best.report.total_score, 65);
        assert_eq!(best.attempts, 3);
        assert!(!best.accepted);
    }

    #[tokio::test]
    async fn transient_failure_consumes_an_attempt() {
        let mut seq = Sequence::new();
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(GenerationError::EmptyCompletion));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CLEAN_HOOK.to_string()));

        let content = workflow(mock).run("Surco").await.unwrap();
        assert_eq!(content.attempts, 2);
    }

    #[tokio::test]
    async fn all_attempts_failing_is_generation_failure() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().times(3).returning(|_| {
            Err(GenerationError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        });

        let err = workflow(mock).run("Surco").await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::GenerationFailed(GenerationError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn non_retryable_failure_stops_immediately() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().times(1).returning(|_| {
            Err(GenerationError::Status {
                status: 401,
                body: "bad key".into(),
            })
        });

        let err = workflow(mock).run("Surco").await.unwrap_err();
        assert!(matches!(err, WorkflowError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn fatal_failure_after_a_candidate_keeps_the_candidate() {
        let mut seq = Sequence::new();
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HYPE_HOOK.to_string()));
        mock.expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(GenerationError::Status {
                    status: 400,
                    body: "bad".into(),
                })
            });

        let err = workflow(mock).run("Surco").await.unwrap_err();
        let best = err.best().expect("best candidate");
        assert_eq!(best.hook, HYPE_HOOK);
        assert_eq!(best.report.total_score, 65);
        assert_eq!(best.attempts, 2);
        assert!(!best.accepted);
    }

    #[tokio::test]
    async fn require_valid_rejects_high_scoring_critical_content() {
        // Hook 75 (one Critical), script 100: total 88 passes the score gate.
        let script = script_with_cta(200, SPECIFIC_CTA);
        let raw = json_candidate("Lima crece, garantizado 📈", Some(&script));
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(2)
            .returning(move |_| Ok(raw.clone()));

        let lenient = {
            let mut m = MockGenerationClient::new();
            let raw = json_candidate("Lima crece, garantizado 📈", Some(&script));
            m.expect_generate().times(1).returning(move |_| Ok(raw.clone()));
            workflow(m)
        };
        let content = lenient.run("Lima").await.unwrap();
        assert_eq!(content.report.total_score, 88);
        assert!(!content.report.is_valid());

        let strict = workflow(mock)
            .with_max_attempts(2)
            .with_require_valid(true);
        let err = strict.run("Lima").await.unwrap_err();
        assert_eq!(err.best().map(|b| b.report.total_score), Some(88));
    }

    #[tokio::test]
    async fn blank_prompt_rejected_without_calling_backend() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().never();
        let err = workflow(mock).run("   ").await.unwrap_err();
        assert!(err.is_client_error());
    }
}
