//! Request/response shapes for remote callers
//!
//! Request bodies arrive as untyped JSON. Field types are checked explicitly
//! so a `null` or numeric hook is rejected instead of being coerced.

use crate::error::{ValidatorError, ValidatorResult};
use crate::report::ValidationReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// What the caller wants done with the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Return a `ValidationReport`
    #[default]
    Validate,
    /// Return corrected text
    Correct,
}

impl FromStr for Action {
    type Err = ValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validate" => Ok(Self::Validate),
            "correct" => Ok(Self::Correct),
            other => Err(ValidatorError::UnsupportedAction(other.to_string())),
        }
    }
}

/// Parsed content request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub hook: String,
    pub script: Option<String>,
    pub action: Action,
}

impl ContentRequest {
    /// Validate-action request
    #[must_use]
    pub fn validate(hook: impl Into<String>, script: Option<String>) -> Self {
        Self {
            hook: hook.into(),
            script,
            action: Action::Validate,
        }
    }

    /// Parse `{ hook, script?, action? }`.
    ///
    /// `action` defaults to `validate` when absent.
    ///
    /// # Errors
    /// - `InvalidInput` if the body is not an object, `hook` is missing or
    ///   not a string, or `script`/`action` are present but not strings
    /// - `UnsupportedAction` for an unknown action name
    pub fn from_json(body: &Value) -> ValidatorResult<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| ValidatorError::invalid_input("request body must be a JSON object"))?;

        let hook = match object.get("hook") {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => {
                return Err(ValidatorError::invalid_input("hook is required"));
            }
            Some(other) => {
                return Err(ValidatorError::invalid_input(format!(
                    "hook must be a string, got {}",
                    json_type(other)
                )));
            }
        };

        let script = match object.get("script") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ValidatorError::invalid_input(format!(
                    "script must be a string, got {}",
                    json_type(other)
                )));
            }
        };

        let action = match object.get("action") {
            None | Some(Value::Null) => Action::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(ValidatorError::invalid_input(format!(
                    "action must be a string, got {}",
                    json_type(other)
                )));
            }
        };

        Ok(Self {
            hook,
            script,
            action,
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Body returned for `action: "correct"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    pub corrected_hook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_script: Option<String>,
    /// Report for the corrected text
    pub report: ValidationReport,
}

/// Response to a content request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
    /// `action: "validate"`
    Report(ValidationReport),
    /// `action: "correct"`
    Corrected(CorrectionResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_request() {
        let request = ContentRequest::from_json(&json!({
            "hook": "Lima crece",
            "script": "Escríbeme",
            "action": "correct"
        }))
        .unwrap();
        assert_eq!(request.hook, "Lima crece");
        assert_eq!(request.script.as_deref(), Some("Escríbeme"));
        assert_eq!(request.action, Action::Correct);
    }

    #[test]
    fn action_defaults_to_validate() {
        let request = ContentRequest::from_json(&json!({ "hook": "" })).unwrap();
        assert_eq!(request.action, Action::Validate);
        assert_eq!(request.script, None);
    }

    #[test]
    fn null_hook_is_invalid_input() {
        let err = ContentRequest::from_json(&json!({ "hook": null })).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidInput(_)));
    }

    #[test]
    fn numeric_hook_is_not_coerced() {
        let err = ContentRequest::from_json(&json!({ "hook": 42 })).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: hook must be a string, got number");
    }

    #[test]
    fn non_string_script_rejected() {
        let err = ContentRequest::from_json(&json!({ "hook": "x", "script": ["a"] })).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidInput(_)));
    }

    #[test]
    fn unknown_action_is_unsupported() {
        let err =
            ContentRequest::from_json(&json!({ "hook": "x", "action": "publish" })).unwrap_err();
        assert!(matches!(err, ValidatorError::UnsupportedAction(a) if a == "publish"));
    }

    #[test]
    fn non_object_body_rejected() {
        let err = ContentRequest::from_json(&json!("hook")).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidInput(_)));
    }
}
