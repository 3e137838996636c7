//! Issues and per-segment results

use crate::scoring::score;
use serde::{Deserialize, Serialize};

/// Kind of policy violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Banned term present
    BannedWord,
    /// Word count outside limits
    Length,
    /// Script has too many paragraphs
    TooManyParagraphs,
    /// Disallowed emoji present
    InappropriateEmoji,
    /// Too many `!`
    ExcessiveExclamation,
    /// CTA defers the reader to someone else
    GenericCta,
    /// No specific CTA present
    MissingCta,
}

impl IssueKind {
    /// Order in which report recommendations are emitted
    pub const PRIORITY: [IssueKind; 7] = [
        IssueKind::BannedWord,
        IssueKind::Length,
        IssueKind::TooManyParagraphs,
        IssueKind::MissingCta,
        IssueKind::GenericCta,
        IssueKind::InappropriateEmoji,
        IssueKind::ExcessiveExclamation,
    ];

    /// Report-level recommendation for this kind
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::BannedWord => {
                "Reemplaza los términos prohibidos antes de publicar: el contenido no es válido mientras los contenga."
            }
            Self::Length => {
                "Ajusta la extensión: un hook breve y un guion dentro del rango de palabras."
            }
            Self::TooManyParagraphs => "Agrupa el guion en menos párrafos para mantener el ritmo.",
            Self::MissingCta => {
                "Cierra con una llamada a la acción específica que lleve al lector hacia ti."
            }
            Self::GenericCta => "No derives al lector a terceros; invítalo a contactarte directamente.",
            Self::InappropriateEmoji => "Usa solo emojis aprobados y de tono profesional.",
            Self::ExcessiveExclamation => "Reduce los signos de exclamación para un tono más confiable.",
        }
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Makes content invalid regardless of score
    Critical,
    /// Large deduction
    High,
    /// Moderate deduction
    Medium,
    /// Small deduction
    Low,
}

impl Severity {
    /// Score deduction per issue instance
    #[inline]
    #[must_use]
    pub fn penalty(self) -> u8 {
        match self {
            Self::Critical => 25,
            Self::High => 15,
            Self::Medium => 10,
            Self::Low => 5,
        }
    }
}

/// One policy violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl ValidationIssue {
    /// Create issue without suggestion
    #[inline]
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            severity,
        }
    }

    /// With suggestion
    #[inline]
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// With optional suggestion
    #[inline]
    #[must_use]
    pub fn with_optional_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}

/// Validation outcome for one segment (hook or script)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
    /// Continuous quality signal, 0..=100
    pub score: u8,
    /// Policy gate: true iff no Critical issue
    pub is_valid: bool,
}

impl ValidationResult {
    /// Build result from issues, deriving score and validity
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let score = score(&issues);
        let is_valid = !issues.iter().any(|i| i.severity == Severity::Critical);
        Self {
            issues,
            score,
            is_valid,
        }
    }

    /// Whether any issue of `kind` is present
    #[inline]
    #[must_use]
    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    /// Number of issues of `kind`
    #[inline]
    #[must_use]
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_issue_invalidates() {
        let result = ValidationResult::from_issues(vec![ValidationIssue::new(
            IssueKind::BannedWord,
            Severity::Critical,
            "x",
        )]);
        assert!(!result.is_valid);
        assert_eq!(result.score, 75);
    }

    #[test]
    fn low_score_can_still_be_valid() {
        let issues = vec![
            ValidationIssue::new(IssueKind::MissingCta, Severity::High, "a"),
            ValidationIssue::new(IssueKind::GenericCta, Severity::High, "b"),
        ];
        let result = ValidationResult::from_issues(issues);
        assert!(result.is_valid);
        assert_eq!(result.score, 70);
    }

    #[test]
    fn issue_serializes_camel_case() {
        let issue = ValidationIssue::new(IssueKind::MissingCta, Severity::High, "falta CTA")
            .with_suggestion("escríbeme");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "missing_cta");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["suggestion"], "escríbeme");
    }

    #[test]
    fn priority_covers_every_kind_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in IssueKind::PRIORITY {
            assert!(seen.insert(kind));
        }
        assert_eq!(seen.len(), 7);
    }
}
