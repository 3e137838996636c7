//! Hook validation
//!
//! A hook is the one- or two-sentence opener of a post. Every check runs
//! regardless of earlier findings.

use crate::issue::{IssueKind, Severity, ValidationIssue, ValidationResult};
use crate::rules;
use hookcheck_policy::{word_count, FoldedText, ValidationPolicy};

/// Validate a hook against the policy
///
/// Checks, in order: word count, banned terms, disallowed emojis,
/// exclamation marks. Empty text is valid input.
#[must_use]
pub fn validate_hook(text: &str, policy: &ValidationPolicy) -> ValidationResult {
    let mut issues = Vec::new();
    let folded = FoldedText::new(text);

    let words = word_count(text);
    let max = policy.max_hook_words();
    if words > max {
        issues.push(
            ValidationIssue::new(
                IssueKind::Length,
                Severity::High,
                format!("El hook tiene {words} palabras (máximo {max})"),
            )
            .with_suggestion(format!("Acorta el hook a {max} palabras o menos")),
        );
    }

    rules::banned_terms(&folded, policy, &mut issues);
    rules::disallowed_emojis(text, policy, &mut issues);

    let exclamations = text.matches('!').count();
    let max = policy.max_exclamation_marks();
    if exclamations > max {
        issues.push(
            ValidationIssue::new(
                IssueKind::ExcessiveExclamation,
                Severity::Low,
                format!("{exclamations} signos de exclamación (máximo {max})"),
            )
            .with_suggestion(format!("Deja como máximo {max}")),
        );
    }

    ValidationResult::from_issues(issues)
}
