//! Script validation
//!
//! The script is the body that follows the hook. Checks are independent:
//! length band, paragraph count, banned terms, and the two-part CTA policy.

use crate::issue::{IssueKind, Severity, ValidationIssue, ValidationResult};
use crate::rules;
use hookcheck_policy::{word_count, FoldedText, ValidationPolicy};
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("static pattern compiles"));

/// Number of non-empty blocks separated by blank lines
#[must_use]
pub fn paragraph_count(text: &str) -> usize {
    BLANK_LINE
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
}

/// Validate a script against the policy
#[must_use]
pub fn validate_script(text: &str, policy: &ValidationPolicy) -> ValidationResult {
    let mut issues = Vec::new();
    let folded = FoldedText::new(text);

    let words = word_count(text);
    let (min, max) = (policy.min_script_words(), policy.max_script_words());
    if words > max {
        issues.push(
            ValidationIssue::new(
                IssueKind::Length,
                Severity::High,
                format!("Guion demasiado largo: {words} palabras (máximo {max})"),
            )
            .with_suggestion(format!("Recorta el guion a {max} palabras o menos")),
        );
    }
    if words < min {
        issues.push(
            ValidationIssue::new(
                IssueKind::Length,
                Severity::Medium,
                format!("Guion demasiado corto: {words} palabras (mínimo {min})"),
            )
            .with_suggestion(format!("Desarrolla el guion hasta al menos {min} palabras")),
        );
    }

    let paragraphs = paragraph_count(text);
    let max = policy.max_paragraphs();
    if paragraphs > max {
        issues.push(
            ValidationIssue::new(
                IssueKind::TooManyParagraphs,
                Severity::Medium,
                format!("El guion tiene {paragraphs} párrafos (máximo {max})"),
            )
            .with_suggestion(format!("Agrupa el contenido en {max} párrafos o menos")),
        );
    }

    rules::banned_terms(&folded, policy, &mut issues);
    cta(&folded, policy, &mut issues);

    ValidationResult::from_issues(issues)
}

/// Generic phrasing and missing specific phrasing are judged separately;
/// both can fire on the same text.
fn cta(text: &FoldedText<'_>, policy: &ValidationPolicy, issues: &mut Vec<ValidationIssue>) {
    if let Some(generic) = policy.generic_cta().iter().find(|m| m.is_match(text)) {
        issues.push(
            ValidationIssue::new(
                IssueKind::GenericCta,
                Severity::High,
                format!(
                    "CTA genérica: \"{}\" envía al lector a buscar ayuda en otra parte",
                    generic.term()
                ),
            )
            .with_suggestion(format!("Cámbiala por \"{}\"", policy.cta_replacement())),
        );
    }

    if !policy.required_cta().iter().any(|m| m.is_match(text)) {
        let example = policy
            .required_cta()
            .first()
            .map(|m| format!("Incluye una CTA directa, por ejemplo \"{}\"", m.term()));
        issues.push(
            ValidationIssue::new(
                IssueKind::MissingCta,
                Severity::High,
                "Falta una llamada a la acción específica hacia el negocio",
            )
            .with_optional_suggestion(example),
        );
    }
}
