//! Auto-correction
//!
//! Rewrites only the patterns the policy has a replacement for. The output is
//! not guaranteed to be valid: unmapped banned terms survive, so callers must
//! validate the corrected text again.

use hookcheck_policy::ValidationPolicy;

/// Rewrite `text` in three ordered passes:
/// 1. mapped banned terms → their replacement (whole word, accent-insensitive)
/// 2. disallowed emojis → the canonical allowed emoji
/// 3. generic CTA phrases → the policy's specific CTA
#[must_use]
pub fn auto_correct(text: &str, policy: &ValidationPolicy) -> String {
    let mut out = text.to_string();

    for (matcher, replacement) in policy.replacements() {
        out = matcher.replace_all(&out, replacement);
    }

    // No fallback configured: strip the emoji instead.
    let fallback = policy.fallback_emoji().unwrap_or("");
    for emoji in policy.disallowed_emojis() {
        if out.contains(emoji.as_str()) {
            out = out.replace(emoji.as_str(), fallback);
        }
    }

    for matcher in policy.generic_cta() {
        out = matcher.replace_all(&out, policy.cta_replacement());
    }

    out
}
