//! Content validator service
//!
//! A small stateless object holding the shared policy. Every call site (CLI,
//! HTTP handlers, the generation workflow) goes through this type, so they
//! all apply the same rules.

use crate::correct::auto_correct;
use crate::hook::validate_hook;
use crate::issue::ValidationResult;
use crate::report::{build_report, ValidationReport};
use crate::request::{Action, ContentRequest, ContentResponse, CorrectionResponse};
use crate::script::validate_script;
use hookcheck_policy::ValidationPolicy;
use std::sync::Arc;

/// Default bound on correct-and-revalidate rounds
pub const DEFAULT_CORRECTION_ROUNDS: u32 = 3;

/// Default total score at which content is accepted without further work
pub const DEFAULT_ACCEPT_SCORE: u8 = 85;

/// Outcome of the bounded correction loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Best-scoring hook seen
    pub hook: String,
    /// Best-scoring script seen
    pub script: Option<String>,
    /// Report for the returned text
    pub report: ValidationReport,
    /// Correction rounds that changed the text
    pub rounds: u32,
}

/// Policy-holding validator
#[derive(Debug, Clone)]
pub struct ContentValidator {
    policy: Arc<ValidationPolicy>,
    max_correction_rounds: u32,
    accept_score: u8,
}

impl ContentValidator {
    /// Create validator over a shared policy
    #[inline]
    #[must_use]
    pub fn new(policy: Arc<ValidationPolicy>) -> Self {
        Self {
            policy,
            max_correction_rounds: DEFAULT_CORRECTION_ROUNDS,
            accept_score: DEFAULT_ACCEPT_SCORE,
        }
    }

    /// With correction round bound
    #[inline]
    #[must_use]
    pub fn with_max_correction_rounds(mut self, rounds: u32) -> Self {
        self.max_correction_rounds = rounds;
        self
    }

    /// With acceptance score
    #[inline]
    #[must_use]
    pub fn with_accept_score(mut self, score: u8) -> Self {
        self.accept_score = score;
        self
    }

    /// The shared policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &Arc<ValidationPolicy> {
        &self.policy
    }

    /// Acceptance score
    #[inline]
    #[must_use]
    pub fn accept_score(&self) -> u8 {
        self.accept_score
    }

    /// Validate a hook
    #[inline]
    #[must_use]
    pub fn validate_hook(&self, text: &str) -> ValidationResult {
        validate_hook(text, &self.policy)
    }

    /// Validate a script
    #[inline]
    #[must_use]
    pub fn validate_script(&self, text: &str) -> ValidationResult {
        validate_script(text, &self.policy)
    }

    /// Validate hook and optional script into a report
    #[must_use]
    pub fn validate(&self, hook: &str, script: Option<&str>) -> ValidationReport {
        let report = build_report(
            self.validate_hook(hook),
            script.map(|s| self.validate_script(s)),
        );
        tracing::debug!(
            total_score = report.total_score,
            valid = report.is_valid(),
            issues = report.issue_count(),
            "validated content"
        );
        report
    }

    /// Single auto-correction pass
    #[inline]
    #[must_use]
    pub fn auto_correct(&self, text: &str) -> String {
        auto_correct(text, &self.policy)
    }

    /// Correct, re-validate, and repeat.
    ///
    /// At least one rewrite is attempted. Stops after the configured number
    /// of rounds, when a round changes nothing, or once a corrected report
    /// reaches the acceptance score. Returns the best-scoring candidate seen;
    /// ties go to the more corrected text.
    #[must_use]
    pub fn correct(&self, hook: &str, script: Option<&str>) -> Correction {
        let mut best = Correction {
            hook: hook.to_string(),
            script: script.map(str::to_string),
            report: self.validate(hook, script),
            rounds: 0,
        };
        let mut current_hook = best.hook.clone();
        let mut current_script = best.script.clone();

        for round in 1..=self.max_correction_rounds {
            // The first rewrite always runs; the gate only ends later rounds.
            if round > 1
                && best.report.total_score >= self.accept_score
                && best.report.is_valid()
            {
                break;
            }
            let next_hook = self.auto_correct(&current_hook);
            let next_script = current_script.as_deref().map(|s| self.auto_correct(s));
            if next_hook == current_hook && next_script == current_script {
                break;
            }
            current_hook = next_hook;
            current_script = next_script;

            let report = self.validate(&current_hook, current_script.as_deref());
            tracing::debug!(round, total_score = report.total_score, "correction round");
            if report.total_score >= best.report.total_score {
                best = Correction {
                    hook: current_hook.clone(),
                    script: current_script.clone(),
                    report,
                    rounds: round,
                };
            }
        }

        best
    }

    /// Serve a parsed request
    #[must_use]
    pub fn handle(&self, request: &ContentRequest) -> ContentResponse {
        let script = request.script.as_deref();
        match request.action {
            Action::Validate => ContentResponse::Report(self.validate(&request.hook, script)),
            Action::Correct => {
                let correction = self.correct(&request.hook, script);
                ContentResponse::Corrected(CorrectionResponse {
                    corrected_hook: correction.hook,
                    corrected_script: correction.script,
                    report: correction.report,
                })
            }
        }
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new(Arc::new(ValidationPolicy::lima_real_estate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueKind;
    use crate::report::QualityTier;
    use pretty_assertions::assert_eq;

    #[test]
    fn validate_hook_only() {
        let validator = ContentValidator::default();
        let report = validator.validate("3 distritos de Lima se revalorizarán 15% en 2025 📈", None);
        assert_eq!(report.total_score, 100);
        assert_eq!(report.quality_tier, QualityTier::Excellent);
        assert!(report.script_result.is_none());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn correct_fixes_mapped_terms_in_one_round() {
        let validator = ContentValidator::default();
        let correction = validator.correct("El boom de Surco 🔥", None);
        assert_eq!(correction.hook, "El auge de Surco 📈");
        assert_eq!(correction.rounds, 1);
        assert_eq!(correction.report.total_score, 100);
    }

    #[test]
    fn correct_leaves_clean_text_alone() {
        let validator = ContentValidator::default();
        let correction = validator.correct("Lima crece 📈", None);
        assert_eq!(correction.rounds, 0);
        assert_eq!(correction.hook, "Lima crece 📈");
    }

    #[test]
    fn correct_reports_remaining_critical_issues() {
        let validator = ContentValidator::default();
        let correction = validator.correct("Boom: hazte millonario", None);
        assert_eq!(correction.hook, "Auge: hazte millonario");
        assert!(!correction.report.is_valid());
        assert!(correction.report.has(IssueKind::BannedWord));
    }

    #[test]
    fn correct_follows_replacement_chains() {
        let config = hookcheck_policy::PolicyConfig::new()
            .with_banned_terms(&["ganga", "barato"])
            .with_banned_term("ganga", Some("barato"))
            .with_banned_term("barato", Some("accesible"));
        let policy = ValidationPolicy::from_config(config).unwrap();
        let validator = ContentValidator::new(Arc::new(policy));
        let correction = validator.correct("Una ganga en Lince", None);
        // "barato" is applied after "ganga" in the same pass
        assert_eq!(correction.hook, "Una accesible en Lince");
        assert_eq!(correction.rounds, 1);
    }

    #[test]
    fn passing_hook_still_gets_emoji_rewritten() {
        let validator = ContentValidator::default();
        assert_eq!(validator.validate("Lima crece 🔥", None).total_score, 90);

        let correction = validator.correct("Lima crece 🔥", None);
        assert_eq!(correction.hook, "Lima crece 📈");
        assert_eq!(correction.rounds, 1);
        assert!(!correction.report.has(IssueKind::InappropriateEmoji));
    }

    #[test]
    fn passing_script_still_gets_generic_cta_rewritten() {
        let validator = ContentValidator::default();
        let hook = "Lima crece 📈";
        let script = "Escríbeme y agenda una asesoría conmigo. Antes de decidir, consulta con un profesional.";
        let before = validator.validate(hook, Some(script));
        assert!(before.total_score >= DEFAULT_ACCEPT_SCORE);
        assert!(before.is_valid());
        assert!(before.has(IssueKind::GenericCta));

        let correction = validator.correct(hook, Some(script));
        assert_eq!(correction.rounds, 1);
        assert_eq!(
            correction.script.as_deref(),
            Some("Escríbeme y agenda una asesoría conmigo. Antes de decidir, agenda una asesoría conmigo.")
        );
        assert!(!correction.report.has(IssueKind::GenericCta));
    }

    #[test]
    fn zero_rounds_returns_original() {
        let validator = ContentValidator::default().with_max_correction_rounds(0);
        let correction = validator.correct("El boom", None);
        assert_eq!(correction.hook, "El boom");
        assert_eq!(correction.rounds, 0);
    }
}
