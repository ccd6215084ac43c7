//! Core decision logic for promptly.
//!
//! This crate decides whether a command-line process may block for human
//! input and resolves prompts deterministically either way.
//!
//! # Modules
//!
//! - [`env`]: Classify the process as interactive or non-interactive
//! - [`prompt`]: Single-choice and yes/no prompts
//! - [`error`]: User-facing error types with actionable suggestions
//!
//! # Resolution
//!
//! | Mode | Single choice | Confirmation |
//! |------|---------------|--------------|
//! | **Interactive** | Read a line from stdin, re-prompt until valid | Same, over `yes`/`no` |
//! | **Non-interactive** | First default-flagged option, else error | `default_yes`, never errors |
//!
//! Non-interactive resolution never reads stdin, so automation and CI
//! cannot hang on a prompt.

pub mod env;
pub mod error;
pub mod prompt;

pub use env::{classify, EnvSignals, Mode, ModeReason};
pub use error::{ApiError, ErrorCode};
pub use prompt::{confirm, resolve, PromptError, PromptOption, Prompter};
