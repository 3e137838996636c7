//! Checks shared by the hook and script validators

use crate::issue::{IssueKind, Severity, ValidationIssue};
use hookcheck_policy::{FoldedText, ValidationPolicy};

/// One Critical issue per distinct banned term found (not per occurrence)
pub(crate) fn banned_terms(
    text: &FoldedText<'_>,
    policy: &ValidationPolicy,
    issues: &mut Vec<ValidationIssue>,
) {
    for matcher in policy.banned_terms() {
        if !matcher.is_match(text) {
            continue;
        }
        let suggestion = policy
            .replacement_for(matcher.term())
            .map(str::to_string)
            .or_else(|| vocabulary_hint(policy));
        tracing::debug!(term = matcher.term(), "banned term found");
        issues.push(
            ValidationIssue::new(
                IssueKind::BannedWord,
                Severity::Critical,
                format!("Término prohibido: \"{}\"", matcher.term()),
            )
            .with_optional_suggestion(suggestion),
        );
    }
}

fn vocabulary_hint(policy: &ValidationPolicy) -> Option<String> {
    let vocabulary = policy.approved_vocabulary();
    if vocabulary.is_empty() {
        return None;
    }
    let list: Vec<&str> = vocabulary.iter().map(String::as_str).collect();
    Some(format!("Usa vocabulario aprobado: {}", list.join(", ")))
}

/// One Medium issue per distinct disallowed emoji found
pub(crate) fn disallowed_emojis(
    text: &str,
    policy: &ValidationPolicy,
    issues: &mut Vec<ValidationIssue>,
) {
    for emoji in policy.disallowed_emojis() {
        if !text.contains(emoji.as_str()) {
            continue;
        }
        issues.push(
            ValidationIssue::new(
                IssueKind::InappropriateEmoji,
                Severity::Medium,
                format!("Emoji no permitido: {emoji}"),
            )
            .with_optional_suggestion(
                policy
                    .fallback_emoji()
                    .map(|e| format!("Usa {e} u otro emoji aprobado")),
            ),
        );
    }
}
