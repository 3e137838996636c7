//! Compiled validation policy
//!
//! Immutable after construction. Shared behind an `Arc` by every caller.

use crate::config::PolicyConfig;
use crate::error::{PolicyResult, PolicyWarning};
use crate::text::{fold, FoldedText, TermMatcher};
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use std::cmp::Reverse;

static LIMA_REAL_ESTATE: Lazy<ValidationPolicy> = Lazy::new(|| {
    ValidationPolicy::from_config(PolicyConfig::default())
        .expect("built-in policy terms are non-empty")
});

/// Validation policy with pre-compiled matchers
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    config: PolicyConfig,
    banned: Vec<TermMatcher>,
    replacements: Vec<(TermMatcher, String)>,
    /// Folded banned term -> replacement
    replacement_index: IndexMap<String, String>,
    /// Longest phrase first so corrections rewrite the widest fragment
    generic_cta: Vec<TermMatcher>,
    required_cta: Vec<TermMatcher>,
    warnings: Vec<PolicyWarning>,
}

impl ValidationPolicy {
    /// Compile a policy from its configuration.
    ///
    /// Misconfigurations are collected as warnings and logged; they do not
    /// fail the load.
    ///
    /// # Errors
    /// `PolicyError::EmptyTerm` if any term or phrase is blank.
    pub fn from_config(config: PolicyConfig) -> PolicyResult<Self> {
        let banned = config
            .banned_terms
            .iter()
            .map(|t| TermMatcher::whole_word(t, "bannedTerms"))
            .collect::<PolicyResult<Vec<_>>>()?;

        let replacements = config
            .term_replacements
            .iter()
            .map(|(term, replacement)| {
                TermMatcher::whole_word(term, "termReplacements")
                    .map(|m| (m, replacement.clone()))
            })
            .collect::<PolicyResult<Vec<_>>>()?;

        let replacement_index = replacements
            .iter()
            .map(|(m, r)| (m.folded().to_string(), r.clone()))
            .collect();

        let mut generic_cta = config
            .generic_cta_phrases
            .iter()
            .map(|p| TermMatcher::substring(p, "genericCtaPhrases"))
            .collect::<PolicyResult<Vec<_>>>()?;
        generic_cta.sort_by_key(|m| Reverse(m.folded().chars().count()));

        let required_cta = config
            .required_cta_phrases
            .iter()
            .map(|p| TermMatcher::substring(p, "requiredCtaPhrases"))
            .collect::<PolicyResult<Vec<_>>>()?;

        let mut policy = Self {
            config,
            banned,
            replacements,
            replacement_index,
            generic_cta,
            required_cta,
            warnings: Vec::new(),
        };
        policy.warnings = policy.check();

        for warning in &policy.warnings {
            tracing::warn!(version = policy.config.version, %warning, "policy misconfiguration");
        }
        tracing::debug!(
            version = policy.config.version,
            banned_terms = policy.banned.len(),
            replacements = policy.replacements.len(),
            "compiled validation policy"
        );

        Ok(policy)
    }

    /// The built-in Lima real-estate policy
    #[must_use]
    pub fn lima_real_estate() -> Self {
        LIMA_REAL_ESTATE.clone()
    }

    fn check(&self) -> Vec<PolicyWarning> {
        let c = &self.config;
        let mut warnings = Vec::new();

        if c.min_script_words > c.max_script_words {
            warnings.push(PolicyWarning::ScriptLengthBandInverted {
                min: c.min_script_words,
                max: c.max_script_words,
            });
        }

        for (matcher, replacement) in &self.replacements {
            let folded = FoldedText::new(replacement);
            if let Some(banned) = self.banned.iter().find(|b| b.is_match(&folded)) {
                warnings.push(PolicyWarning::ReplacementContainsBannedTerm {
                    term: matcher.term().to_string(),
                    replacement: replacement.clone(),
                    banned: banned.term().to_string(),
                });
            }
            if !self.banned.iter().any(|b| b.folded() == matcher.folded()) {
                warnings.push(PolicyWarning::ReplacementForUnbannedTerm {
                    term: matcher.term().to_string(),
                });
            }
        }

        for emoji in c.disallowed_emojis.intersection(&c.allowed_emojis) {
            warnings.push(PolicyWarning::EmojiBothAllowedAndDisallowed {
                emoji: emoji.clone(),
            });
        }
        if !c.disallowed_emojis.is_empty() && c.allowed_emojis.is_empty() {
            warnings.push(PolicyWarning::NoFallbackEmoji);
        }

        let cta = FoldedText::new(&c.cta_replacement);
        if let Some(generic) = self.generic_cta.iter().find(|g| g.is_match(&cta)) {
            warnings.push(PolicyWarning::CtaReplacementIsGeneric {
                phrase: generic.term().to_string(),
            });
        }
        if !self.generic_cta.is_empty() && !self.required_cta.iter().any(|r| r.is_match(&cta)) {
            warnings.push(PolicyWarning::CtaReplacementNotRequired {
                replacement: c.cta_replacement.clone(),
            });
        }

        warnings
    }

    /// The source configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Policy version
    #[inline]
    #[must_use]
    pub fn version(&self) -> u32 {
        self.config.version
    }

    /// Hook word limit
    #[inline]
    #[must_use]
    pub fn max_hook_words(&self) -> usize {
        self.config.max_hook_words
    }

    /// Script lower word bound
    #[inline]
    #[must_use]
    pub fn min_script_words(&self) -> usize {
        self.config.min_script_words
    }

    /// Script upper word bound
    #[inline]
    #[must_use]
    pub fn max_script_words(&self) -> usize {
        self.config.max_script_words
    }

    /// Script paragraph limit
    #[inline]
    #[must_use]
    pub fn max_paragraphs(&self) -> usize {
        self.config.max_paragraphs
    }

    /// Hook exclamation limit
    #[inline]
    #[must_use]
    pub fn max_exclamation_marks(&self) -> usize {
        self.config.max_exclamation_marks
    }

    /// Banned-term matchers, in policy order
    #[inline]
    #[must_use]
    pub fn banned_terms(&self) -> &[TermMatcher] {
        &self.banned
    }

    /// Replacement for a banned term, if one is mapped
    #[must_use]
    pub fn replacement_for(&self, term: &str) -> Option<&str> {
        self.replacement_index.get(&fold(term)).map(String::as_str)
    }

    /// Mapped terms and their replacements, in policy order
    pub fn replacements(&self) -> impl Iterator<Item = (&TermMatcher, &str)> {
        self.replacements.iter().map(|(m, r)| (m, r.as_str()))
    }

    /// Generic CTA matchers, longest phrase first
    #[inline]
    #[must_use]
    pub fn generic_cta(&self) -> &[TermMatcher] {
        &self.generic_cta
    }

    /// Required CTA matchers
    #[inline]
    #[must_use]
    pub fn required_cta(&self) -> &[TermMatcher] {
        &self.required_cta
    }

    /// Specific CTA used by auto-correction
    #[inline]
    #[must_use]
    pub fn cta_replacement(&self) -> &str {
        &self.config.cta_replacement
    }

    /// Allowed emojis
    #[inline]
    #[must_use]
    pub fn allowed_emojis(&self) -> &IndexSet<String> {
        &self.config.allowed_emojis
    }

    /// Disallowed emojis
    #[inline]
    #[must_use]
    pub fn disallowed_emojis(&self) -> &IndexSet<String> {
        &self.config.disallowed_emojis
    }

    /// Canonical allowed emoji
    #[inline]
    #[must_use]
    pub fn fallback_emoji(&self) -> Option<&str> {
        self.config.allowed_emojis.first().map(String::as_str)
    }

    /// Approved vocabulary
    #[inline]
    #[must_use]
    pub fn approved_vocabulary(&self) -> &IndexSet<String> {
        &self.config.approved_vocabulary
    }

    /// Misconfigurations found at load time
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[PolicyWarning] {
        &self.warnings
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::lima_real_estate()
    }
}
