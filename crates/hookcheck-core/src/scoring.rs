//! Severity-weighted scoring

use crate::issue::ValidationIssue;

/// Starting score before deductions
pub const MAX_SCORE: u8 = 100;

/// Score a list of issues: 100 minus one penalty per issue instance, floored at 0.
///
/// Two distinct banned terms cost two Critical penalties, so callers must
/// pass every issue, not one per kind.
#[must_use]
pub fn score(issues: &[ValidationIssue]) -> u8 {
    let penalty: u32 = issues
        .iter()
        .map(|i| u32::from(i.severity.penalty()))
        .sum();
    MAX_SCORE.saturating_sub(u8::try_from(penalty).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueKind, Severity};
    use proptest::prelude::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue::new(IssueKind::BannedWord, severity, "")
    }

    #[test]
    fn no_issues_is_perfect() {
        assert_eq!(score(&[]), 100);
    }

    #[test]
    fn penalties_by_severity() {
        assert_eq!(score(&[issue(Severity::Critical)]), 75);
        assert_eq!(score(&[issue(Severity::High)]), 85);
        assert_eq!(score(&[issue(Severity::Medium)]), 90);
        assert_eq!(score(&[issue(Severity::Low)]), 95);
    }

    #[test]
    fn penalties_are_per_instance() {
        let issues = vec![issue(Severity::Critical), issue(Severity::Critical)];
        assert_eq!(score(&issues), 50);
    }

    #[test]
    fn four_criticals_clamp_to_zero() {
        let issues = vec![issue(Severity::Critical); 4];
        assert_eq!(score(&issues), 0);
        let issues = vec![issue(Severity::Critical); 12];
        assert_eq!(score(&issues), 0);
    }

    proptest! {
        #[test]
        fn score_stays_in_range(severities in prop::collection::vec(
            prop_oneof![
                Just(Severity::Critical),
                Just(Severity::High),
                Just(Severity::Medium),
                Just(Severity::Low),
            ],
            0..40,
        )) {
            let issues: Vec<_> = severities.into_iter().map(issue).collect();
            let s = score(&issues);
            prop_assert!(s <= 100);
            let expected = 100i64
                - issues.iter().map(|i| i64::from(i.severity.penalty())).sum::<i64>();
            prop_assert_eq!(i64::from(s), expected.max(0));
        }
    }
}
