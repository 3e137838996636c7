//! Parsing raw completions into hook + script

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

/// Content proposed by the backend, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub hook: String,
    #[serde(default)]
    pub script: Option<String>,
}

/// Parse a completion.
///
/// Accepts a JSON object `{ "hook": ..., "script": ... }` (optionally inside a
/// Markdown code fence). Anything else is read as plain text: the first
/// non-blank line is the hook, the remainder is the script.
///
/// # Errors
/// `EmptyCompletion` when no hook can be extracted.
pub fn parse_candidate(raw: &str) -> Result<Candidate, GenerationError> {
    let body = strip_code_fence(raw.trim());

    if body.starts_with('{') {
        if let Ok(candidate) = serde_json::from_str::<Candidate>(body) {
            let hook = candidate.hook.trim().to_string();
            if hook.is_empty() {
                return Err(GenerationError::EmptyCompletion);
            }
            let script = candidate
                .script
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            return Ok(Candidate { hook, script });
        }
    }

    let mut lines = body.lines().skip_while(|line| line.trim().is_empty());
    let hook = lines
        .next()
        .map(|line| strip_label(line, &["hook:", "gancho:"]))
        .filter(|hook| !hook.is_empty())
        .ok_or(GenerationError::EmptyCompletion)?;

    let rest = lines.collect::<Vec<_>>().join("\n");
    let script = strip_label(&rest, &["script:", "guion:", "guión:"]);
    Ok(Candidate {
        hook,
        script: (!script.is_empty()).then_some(script),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") up to the first newline.
    let inner = inner.split_once('\n').map_or("", |(_, rest)| rest);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn strip_label(text: &str, labels: &[&str]) -> String {
    let trimmed = text.trim();
    let lower = trimmed.to_lowercase();
    for label in labels {
        if lower.starts_with(label) {
            if let Some(rest) = trimmed.get(label.len()..) {
                return rest.trim().to_string();
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_json_object() {
        let candidate =
            parse_candidate(r#"{"hook": " Lima crece 📈 ", "script": "Escríbeme hoy."}"#).unwrap();
        assert_eq!(candidate.hook, "Lima crece 📈");
        assert_eq!(candidate.script.as_deref(), Some("Escríbeme hoy."));
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"hook\": \"Surco sube\"}\n```";
        let candidate = parse_candidate(raw).unwrap();
        assert_eq!(candidate.hook, "Surco sube");
        assert_eq!(candidate.script, None);
    }

    #[test]
    fn parses_plain_text() {
        let raw = "\n\nHook: Barranco se revaloriza 📍\n\nGuion: Primer párrafo.\n\nEscríbeme.";
        let candidate = parse_candidate(raw).unwrap();
        assert_eq!(candidate.hook, "Barranco se revaloriza 📍");
        assert_eq!(
            candidate.script.as_deref(),
            Some("Primer párrafo.\n\nEscríbeme.")
        );
    }

    #[test]
    fn single_line_is_hook_only() {
        let candidate = parse_candidate("Lince, la apuesta del año").unwrap();
        assert_eq!(candidate.hook, "Lince, la apuesta del año");
        assert_eq!(candidate.script, None);
    }

    #[test]
    fn blank_completion_is_empty() {
        assert!(matches!(
            parse_candidate("   \n  "),
            Err(GenerationError::EmptyCompletion)
        ));
        assert!(matches!(
            parse_candidate(r#"{"hook": ""}"#),
            Err(GenerationError::EmptyCompletion)
        ));
    }

    #[test]
    fn invalid_json_falls_back_to_text() {
        let candidate = parse_candidate("{not json\nresto").unwrap();
        assert_eq!(candidate.hook, "{not json");
        assert_eq!(candidate.script.as_deref(), Some("resto"));
    }
}
