//! Policy configuration (the on-disk and on-the-wire format)
//!
//! `PolicyConfig` is plain data. It is compiled into a
//! [`ValidationPolicy`](crate::ValidationPolicy) once at startup; every
//! consumer (CLI, HTTP server, generation workflow) reads the same compiled
//! value. Field names are camelCase in every format so the browser client and
//! the policy files share one vocabulary.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Current version of the built-in policy
pub const DEFAULT_POLICY_VERSION: u32 = 1;

/// Validation policy data
///
/// Missing fields in a policy file fall back to the built-in Lima
/// real-estate defaults; a list given in a file replaces the default list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// Policy version, bumped whenever the rules change
    pub version: u32,
    /// Upper bound on hook word count
    pub max_hook_words: usize,
    /// Lower bound on script word count
    pub min_script_words: usize,
    /// Upper bound on script word count
    pub max_script_words: usize,
    /// Upper bound on script paragraphs
    pub max_paragraphs: usize,
    /// Upper bound on `!` characters in a hook
    pub max_exclamation_marks: usize,
    /// Terms disallowed anywhere (whole word, case and accent insensitive)
    pub banned_terms: IndexSet<String>,
    /// Informational vocabulary surfaced in recommendations
    pub approved_vocabulary: IndexSet<String>,
    /// Allowed emojis; the first entry is the auto-correction fallback
    pub allowed_emojis: IndexSet<String>,
    /// Disallowed emojis
    pub disallowed_emojis: IndexSet<String>,
    /// CTA phrasing that defers the reader to someone else
    pub generic_cta_phrases: IndexSet<String>,
    /// CTA phrasing that routes the reader back to the business
    pub required_cta_phrases: IndexSet<String>,
    /// Specific CTA substituted for generic phrasing by auto-correction
    pub cta_replacement: String,
    /// Banned term -> replacement used by auto-correction
    pub term_replacements: IndexMap<String, String>,
}

fn set(items: &[&str]) -> IndexSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl PolicyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With hook word limit
    #[inline]
    #[must_use]
    pub fn with_max_hook_words(mut self, max: usize) -> Self {
        self.max_hook_words = max;
        self
    }

    /// With script length band
    #[inline]
    #[must_use]
    pub fn with_script_words(mut self, min: usize, max: usize) -> Self {
        self.min_script_words = min;
        self.max_script_words = max;
        self
    }

    /// With paragraph limit
    #[inline]
    #[must_use]
    pub fn with_max_paragraphs(mut self, max: usize) -> Self {
        self.max_paragraphs = max;
        self
    }

    /// With exclamation limit
    #[inline]
    #[must_use]
    pub fn with_max_exclamation_marks(mut self, max: usize) -> Self {
        self.max_exclamation_marks = max;
        self
    }

    /// With an additional banned term and optional replacement
    #[must_use]
    pub fn with_banned_term(mut self, term: &str, replacement: Option<&str>) -> Self {
        self.banned_terms.insert(term.to_string());
        if let Some(replacement) = replacement {
            self.term_replacements
                .insert(term.to_string(), replacement.to_string());
        }
        self
    }

    /// With banned terms replaced wholesale (replacement map cleared)
    #[must_use]
    pub fn with_banned_terms(mut self, terms: &[&str]) -> Self {
        self.banned_terms = set(terms);
        self.term_replacements.clear();
        self
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION,
            max_hook_words: 15,
            min_script_words: 150,
            max_script_words: 300,
            max_paragraphs: 5,
            max_exclamation_marks: 2,
            banned_terms: set(&[
                "boom",
                "explotarán",
                "explotar",
                "garantizado",
                "garantizada",
                "sin riesgo",
                "dinero fácil",
                "hazte rico",
                "millonario",
                "oportunidad única",
                "último momento",
                "urgente",
            ]),
            approved_vocabulary: set(&[
                "plusvalía",
                "revalorización",
                "rentabilidad",
                "proyección",
                "patrimonio",
                "flujo de alquiler",
                "inversión inteligente",
                "auge",
            ]),
            allowed_emojis: set(&["📈", "🏠", "🏡", "🔑", "📍", "💡", "✅", "👉", "📊", "🏢"]),
            disallowed_emojis: set(&["🤯", "🚀", "🔥", "💰", "🤑", "💸", "😱", "💣", "💥"]),
            generic_cta_phrases: set(&[
                "busca asesoría profesional",
                "consulta con un profesional",
                "consulta con un experto",
                "asesórate con un especialista",
                "habla con un asesor",
                "pregunta a tu banco",
                "investiga por tu cuenta",
                "busca asesoría",
            ]),
            required_cta_phrases: set(&[
                "escríbeme",
                "agenda una asesoría conmigo",
                "agenda tu asesoría",
                "envíame un mensaje",
                "mándame un mensaje",
                "contáctame",
                "llámame",
                "comenta",
                "link en mi bio",
            ]),
            cta_replacement: "agenda una asesoría conmigo".to_string(),
            term_replacements: [
                ("boom", "auge"),
                ("explotarán", "se revalorizarán"),
                ("explotar", "revalorizarse"),
                ("garantizado", "proyectado"),
                ("garantizada", "proyectada"),
                ("sin riesgo", "con respaldo legal"),
                ("dinero fácil", "rentabilidad sostenida"),
                ("hazte rico", "haz crecer tu patrimonio"),
                ("oportunidad única", "oportunidad destacada"),
                ("urgente", "oportuno"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_unmapped_banned_terms() {
        let config = PolicyConfig::default();
        let unmapped: Vec<_> = config
            .banned_terms
            .iter()
            .filter(|t| !config.term_replacements.contains_key(*t))
            .collect();
        assert_eq!(unmapped, vec!["millonario", "último momento"]);
    }

    #[test]
    fn default_excludes_ordinary_nouns() {
        let config = PolicyConfig::default();
        assert!(!config.banned_terms.contains("madre"));
    }

    #[test]
    fn builder_overrides() {
        let config = PolicyConfig::new()
            .with_max_hook_words(10)
            .with_script_words(50, 80)
            .with_banned_term("ganga", Some("precio competitivo"));
        assert_eq!(config.max_hook_words, 10);
        assert_eq!(config.min_script_words, 50);
        assert_eq!(config.max_script_words, 80);
        assert!(config.banned_terms.contains("ganga"));
        assert_eq!(
            config.term_replacements.get("ganga").map(String::as_str),
            Some("precio competitivo")
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: PolicyConfig =
            serde_json::from_str(r#"{"version": 7, "maxHookWords": 12}"#).unwrap();
        assert_eq!(config.version, 7);
        assert_eq!(config.max_hook_words, 12);
        assert_eq!(config.min_script_words, 150);
        assert!(config.banned_terms.contains("boom"));
    }

    #[test]
    fn fallback_emoji_is_first_allowed() {
        let config = PolicyConfig::default();
        assert_eq!(config.allowed_emojis.first().map(String::as_str), Some("📈"));
    }
}
