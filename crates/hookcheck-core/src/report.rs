//! Report aggregation over hook + script

use crate::issue::{IssueKind, ValidationResult};
use serde::{Deserialize, Serialize};

/// Upper bound on report recommendations
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Report-level quality band, derived from `total_score` only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// 80 and above
    Excellent,
    /// 60 to 79
    Good,
    /// Below 60
    NeedsImprovement,
}

impl QualityTier {
    /// Tier for a total score
    #[inline]
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }
}

/// Aggregate validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub hook_result: ValidationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_result: Option<ValidationResult>,
    pub total_score: u8,
    pub quality_tier: QualityTier,
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    /// Both segments pass the policy gate (no Critical issues)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.hook_result.is_valid && self.script_result.as_ref().map_or(true, |s| s.is_valid)
    }

    /// Issue count across both segments
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.hook_result.issues.len() + self.script_result.as_ref().map_or(0, |s| s.issues.len())
    }

    /// Whether any segment has an issue of `kind`
    #[must_use]
    pub fn has(&self, kind: IssueKind) -> bool {
        self.hook_result.has(kind) || self.script_result.as_ref().is_some_and(|s| s.has(kind))
    }
}

/// Combine segment results into a report.
///
/// `total_score` is the rounded mean of both scores, or the hook score alone
/// when there is no script. Recommendations are one per distinct issue kind,
/// in priority order, capped at [`MAX_RECOMMENDATIONS`].
#[must_use]
pub fn build_report(
    hook_result: ValidationResult,
    script_result: Option<ValidationResult>,
) -> ValidationReport {
    let total_score = match &script_result {
        Some(script) => {
            let sum = u16::from(hook_result.score) + u16::from(script.score);
            u8::try_from((sum + 1) / 2).unwrap_or(u8::MAX)
        }
        None => hook_result.score,
    };

    let present = |kind: IssueKind| {
        hook_result.has(kind) || script_result.as_ref().is_some_and(|s| s.has(kind))
    };
    let recommendations = IssueKind::PRIORITY
        .into_iter()
        .filter(|k| present(*k))
        .take(MAX_RECOMMENDATIONS)
        .map(|k| k.recommendation().to_string())
        .collect();

    ValidationReport {
        quality_tier: QualityTier::from_score(total_score),
        hook_result,
        script_result,
        total_score,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Severity, ValidationIssue};
    use pretty_assertions::assert_eq;

    fn result_with_score(score: u8) -> ValidationResult {
        ValidationResult {
            issues: Vec::new(),
            score,
            is_valid: true,
        }
    }

    fn result_with(kinds: &[(IssueKind, Severity)]) -> ValidationResult {
        ValidationResult::from_issues(
            kinds
                .iter()
                .map(|(k, s)| ValidationIssue::new(*k, *s, "x"))
                .collect(),
        )
    }

    #[test]
    fn mean_of_90_and_70_is_excellent() {
        let report = build_report(result_with_score(90), Some(result_with_score(70)));
        assert_eq!(report.total_score, 80);
        assert_eq!(report.quality_tier, QualityTier::Excellent);
    }

    #[test]
    fn mean_rounds_half_up() {
        let report = build_report(result_with_score(65), Some(result_with_score(90)));
        assert_eq!(report.total_score, 78);
        assert_eq!(report.quality_tier, QualityTier::Good);
    }

    #[test]
    fn hook_only_uses_hook_score() {
        let report = build_report(result_with_score(59), None);
        assert_eq!(report.total_score, 59);
        assert_eq!(report.quality_tier, QualityTier::NeedsImprovement);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(QualityTier::from_score(100), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(80), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(79), QualityTier::Good);
        assert_eq!(QualityTier::from_score(60), QualityTier::Good);
        assert_eq!(QualityTier::from_score(59), QualityTier::NeedsImprovement);
        assert_eq!(QualityTier::from_score(0), QualityTier::NeedsImprovement);
    }

    #[test]
    fn tier_is_independent_of_validity() {
        let hook = result_with(&[(IssueKind::BannedWord, Severity::Critical)]);
        let report = build_report(hook, Some(result_with_score(100)));
        assert_eq!(report.total_score, 88);
        assert_eq!(report.quality_tier, QualityTier::Excellent);
        assert!(!report.is_valid());
    }

    #[test]
    fn recommendations_one_per_kind_in_priority_order() {
        let hook = result_with(&[
            (IssueKind::InappropriateEmoji, Severity::Medium),
            (IssueKind::BannedWord, Severity::Critical),
            (IssueKind::BannedWord, Severity::Critical),
        ]);
        let script = result_with(&[
            (IssueKind::MissingCta, Severity::High),
            (IssueKind::BannedWord, Severity::Critical),
        ]);
        let report = build_report(hook, Some(script));
        assert_eq!(
            report.recommendations,
            vec![
                IssueKind::BannedWord.recommendation().to_string(),
                IssueKind::MissingCta.recommendation().to_string(),
                IssueKind::InappropriateEmoji.recommendation().to_string(),
            ]
        );
    }

    #[test]
    fn recommendations_capped_at_five() {
        let hook = result_with(&[
            (IssueKind::BannedWord, Severity::Critical),
            (IssueKind::Length, Severity::High),
            (IssueKind::InappropriateEmoji, Severity::Medium),
            (IssueKind::ExcessiveExclamation, Severity::Low),
        ]);
        let script = result_with(&[
            (IssueKind::TooManyParagraphs, Severity::Medium),
            (IssueKind::GenericCta, Severity::High),
            (IssueKind::MissingCta, Severity::High),
        ]);
        let report = build_report(hook, Some(script));
        assert_eq!(report.recommendations.len(), MAX_RECOMMENDATIONS);
        assert_eq!(
            report.recommendations.last().map(String::as_str),
            Some(IssueKind::GenericCta.recommendation())
        );
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = build_report(result_with_score(100), None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalScore"], 100);
        assert_eq!(json["qualityTier"], "excellent");
        assert_eq!(json["hookResult"]["isValid"], true);
        assert!(json.get("scriptResult").is_none());
    }
}
