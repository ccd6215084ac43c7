//! Text and JSON rendering of decisions and errors.

use promptly_core::{ApiError, Mode, ModeReason};
use serde::Serialize;

use crate::args::OutputFormat;

/// The result of a command, as printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Classification of the current process.
    Mode { mode: Mode, reason: ModeReason },
    /// Key picked in a single-choice prompt.
    Choice { key: String, mode: Mode },
    /// Answer to a yes/no question.
    Confirm { confirmed: bool, mode: Mode },
}

pub fn render_decision(decision: &Decision, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(decision),
        OutputFormat::Text => Ok(match decision {
            Decision::Mode { mode, reason } => format!("{} ({})", mode, reason),
            Decision::Choice { key, .. } => key.clone(),
            Decision::Confirm { confirmed, .. } => {
                let answer = if *confirmed { "yes" } else { "no" };
                answer.to_string()
            }
        }),
    }
}

pub fn render_error(err: &ApiError, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(&serde_json::json!({ "error": err })),
        OutputFormat::Text => {
            let mut out = format!("Error: [{}] {}", err.code, err.message);
            if let Some(details) = &err.details {
                out.push_str(&format!("\n  details: {}", details));
            }
            for suggestion in &err.suggestions {
                out.push_str(&format!("\n  hint: {}", suggestion));
            }
            Ok(out)
        }
    }
}
