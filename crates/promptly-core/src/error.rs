//! User-facing structured errors with suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prompt::PromptError;

/// Error codes for structured error output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoDefaultOption,
    InputUnavailable,
    InvalidInput,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NoDefaultOption => write!(f, "NO_DEFAULT_OPTION"),
            ErrorCode::InputUnavailable => write!(f, "INPUT_UNAVAILABLE"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// An error with enough context for the user to fix the invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, " (hint: {})", self.suggestions.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Non-interactive resolution found no option flagged as default.
    pub fn no_default_option(keys: &[&str]) -> Self {
        Self {
            code: ErrorCode::NoDefaultOption,
            message: "No default option available for a non-interactive prompt".to_string(),
            details: Some(serde_json::json!({ "options": keys })),
            suggestions: vec![
                "Pass --default <KEY> to choose an answer up front".into(),
                "Run the command from an interactive terminal to answer the prompt".into(),
            ],
        }
    }

    /// The interactive input stream could not deliver an answer.
    pub fn input_unavailable(reason: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InputUnavailable,
            message: format!("Could not read an answer: {}", reason.into()),
            details: None,
            suggestions: vec![
                "Make sure standard input is open, or pass --no-input to use defaults".into(),
            ],
        }
    }

    /// Create an invalid input error with a custom suggestion.
    pub fn invalid_input_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
            details: None,
            suggestions: vec![suggestion.into()],
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: message.into(),
            details: None,
            suggestions: vec!["This is an internal error. Please report it if it persists.".into()],
        }
    }
}

impl From<&PromptError> for ApiError {
    fn from(err: &PromptError) -> Self {
        match err {
            PromptError::NoDefault { keys } => {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                ApiError::no_default_option(&keys)
            }
            PromptError::NoOptions => ApiError::invalid_input_with_suggestion(
                "Prompt has no options to choose from",
                "Provide at least one KEY=DESCRIPTION option",
            ),
            PromptError::InputClosed => ApiError::input_unavailable("input stream closed"),
            PromptError::Io(e) => ApiError::input_unavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every constructor must tell the user what to do next.
    fn assert_has_suggestion(err: &ApiError, context: &str) {
        assert!(
            !err.suggestions.is_empty(),
            "{} should have a suggestion, but got none",
            context
        );
    }

    #[test]
    fn test_no_default_option_lists_keys() {
        let err = ApiError::no_default_option(&["a", "b"]);
        assert_has_suggestion(&err, "no_default_option");
        assert_eq!(err.code, ErrorCode::NoDefaultOption);
        assert_eq!(
            err.details,
            Some(serde_json::json!({ "options": ["a", "b"] }))
        );
        assert!(err.suggestions.iter().any(|s| s.contains("--default")));
    }

    #[test]
    fn test_input_unavailable_has_suggestion() {
        let err = ApiError::input_unavailable("broken pipe");
        assert_has_suggestion(&err, "input_unavailable");
        assert!(err.message.contains("broken pipe"));
    }

    #[test]
    fn test_invalid_input_has_suggestion() {
        let err = ApiError::invalid_input_with_suggestion("bad option", "use a or b");
        assert_has_suggestion(&err, "invalid_input_with_suggestion");
    }

    #[test]
    fn test_internal_has_suggestion() {
        let err = ApiError::internal("unexpected state");
        assert_has_suggestion(&err, "internal");
    }

    #[test]
    fn test_from_prompt_error() {
        let err = ApiError::from(&PromptError::NoDefault {
            keys: vec!["x".into()],
        });
        assert_eq!(err.code, ErrorCode::NoDefaultOption);

        let err = ApiError::from(&PromptError::InputClosed);
        assert_eq!(err.code, ErrorCode::InputUnavailable);
        assert!(err.message.contains("closed"));

        let err = ApiError::from(&PromptError::NoOptions);
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_display_format_with_suggestion() {
        let err = ApiError::invalid_input_with_suggestion("unknown key 'z'", "use a or b");
        let display = format!("{}", err);
        assert_eq!(display, "[INVALID_INPUT] unknown key 'z' (hint: use a or b)");
    }

    #[test]
    fn test_json_serialization() {
        let err = ApiError::no_default_option(&["yes"]);
        let json = serde_json::to_string(&err).unwrap();

        assert!(json.contains("\"code\":\"NO_DEFAULT_OPTION\""));
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"details\""));
        assert!(json.contains("\"suggestions\""));
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let err = ApiError {
            code: ErrorCode::InternalError,
            message: "x".into(),
            details: None,
            suggestions: vec![],
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"INTERNAL_ERROR","message":"x"}"#);
    }

    #[test]
    fn test_json_deserialization() {
        let json = r#"{"code":"INPUT_UNAVAILABLE","message":"gone"}"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert!(matches!(err.code, ErrorCode::InputUnavailable));
        assert_eq!(err.message, "gone");
        assert!(err.details.is_none());
        assert!(err.suggestions.is_empty());
    }
}
