//! Testing utilities for hookcheck workspace
//!
//! Shared policies, sample copy and text builders.

#![allow(missing_docs)]

use hookcheck_policy::{PolicyConfig, ValidationPolicy};

/// Clean hook: no banned terms, allowed emoji, under the word limit
pub const CLEAN_HOOK: &str = "3 distritos de Lima se revalorizarán 15% en 2025 📈";

/// Hook with one banned term and one disallowed emoji
pub const HYPE_HOOK: &str = "¡Tu primer ahorro en Lima? ¡Estos 3 distritos explotarán en 2025! 🤯";

/// Specific CTA from the built-in policy
pub const SPECIFIC_CTA: &str = "Escríbeme y agenda una asesoría conmigo.";

/// Generic CTA from the built-in policy
pub const GENERIC_CTA: &str = "Antes de decidir, consulta con un profesional.";

const FILLER: &[&str] = &[
    "Surco", "mantiene", "demanda", "estable", "de", "departamentos", "familiares", "cerca",
    "de", "parques", "y", "colegios", "con", "precios", "por", "metro", "cuadrado", "que",
    "siguen", "subiendo",
];

pub fn lima_policy() -> ValidationPolicy {
    ValidationPolicy::lima_real_estate()
}

/// Built-in policy with a script band small enough for hand-written tests
pub fn compact_policy() -> ValidationPolicy {
    ValidationPolicy::from_config(PolicyConfig::new().with_script_words(5, 60)).unwrap()
}

/// `n` filler words without banned terms, CTAs or emojis
pub fn filler_words(n: usize) -> String {
    FILLER
        .iter()
        .cycle()
        .take(n)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Script of exactly `total` words whose last words are `cta`
pub fn script_with_cta(total: usize, cta: &str) -> String {
    let cta_words = cta.split_whitespace().count();
    let body = filler_words(total.saturating_sub(cta_words));
    if body.is_empty() {
        cta.to_string()
    } else {
        format!("{body}. {cta}")
    }
}

/// Text containing every banned term of `policy` exactly once
pub fn every_banned_term(policy: &ValidationPolicy) -> String {
    policy
        .banned_terms()
        .iter()
        .map(|m| m.term().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
