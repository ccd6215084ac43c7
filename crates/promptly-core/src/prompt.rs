//! Single-choice and yes/no prompts.
//!
//! A [`Prompter`] resolves a prompt according to its [`Mode`]. In interactive
//! mode it renders the options and blocks on one line of input at a time.
//! In non-interactive mode it returns the first option flagged as default
//! and never touches its input stream.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::env::{self, Mode};

/// Key returned by [`Prompter::confirm`]'s affirmative option.
pub const YES: &str = "yes";

/// Key returned by [`Prompter::confirm`]'s negative option.
pub const NO: &str = "no";

/// One candidate answer to a single-choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    /// Identifier handed back to the caller. Should be unique per prompt.
    pub key: String,
    /// Label shown to the user in interactive mode.
    pub description: String,
    pub is_default: bool,
}

impl PromptOption {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            is_default: false,
        }
    }

    /// Mark this option as the non-interactive fallback.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Why a prompt could not produce an answer.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("no default option available (options: {})", .keys.join(", "))]
    NoDefault { keys: Vec<String> },

    #[error("prompt has no options to choose from")]
    NoOptions,

    #[error("input stream closed before an answer was given")]
    InputClosed,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Key of the first option flagged as default.
///
/// When several options carry the flag, the first one wins.
pub fn default_key(options: &[PromptOption]) -> Option<&str> {
    let mut defaults = options.iter().filter(|o| o.is_default);
    let first = defaults.next()?;
    if defaults.next().is_some() {
        debug!(
            "Multiple default options flagged, using the first ('{}')",
            first.key
        );
    }
    Some(first.key.as_str())
}

/// The two-option set behind a yes/no confirmation.
fn confirm_options(default_yes: bool) -> [PromptOption; 2] {
    let mut yes = PromptOption::new(YES, "Yes");
    let mut no = PromptOption::new(NO, "No");
    yes.is_default = default_yes;
    no.is_default = !default_yes;
    [yes, no]
}

/// Map a trimmed answer back to an option key.
///
/// Accepts, in order: an empty line (the default, if any), an exact key,
/// a key ignoring case, a 1-based index, or an unambiguous key prefix.
fn match_answer<'a>(
    answer: &str,
    options: &'a [PromptOption],
    default: Option<&'a str>,
) -> Option<&'a str> {
    if answer.is_empty() {
        return default;
    }

    if let Some(opt) = options.iter().find(|o| o.key == answer) {
        return Some(&opt.key);
    }

    if let Some(opt) = options.iter().find(|o| o.key.eq_ignore_ascii_case(answer)) {
        return Some(&opt.key);
    }

    if let Ok(index) = answer.parse::<usize>() {
        if (1..=options.len()).contains(&index) {
            return Some(&options[index - 1].key);
        }
    }

    let answer_lower = answer.to_lowercase();
    let mut matches = options
        .iter()
        .filter(|o| o.key.to_lowercase().starts_with(&answer_lower));
    match (matches.next(), matches.next()) {
        (Some(opt), None) => Some(&opt.key),
        _ => None,
    }
}

/// Resolves prompts against an input reader and an output writer.
pub struct Prompter<R, W> {
    mode: Mode,
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stderr> {
    /// Prompter over the process's stdin, rendering to stderr so stdout
    /// stays free for command output.
    pub fn stdio(mode: Mode) -> Self {
        Self::new(mode, io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(mode: Mode, input: R, output: W) -> Self {
        Self {
            mode,
            input,
            output,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Consume the prompter, returning its input and output.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Resolve a single-choice prompt to one of the option keys.
    pub fn resolve(
        &mut self,
        message: &str,
        options: &[PromptOption],
    ) -> Result<String, PromptError> {
        match self.mode {
            Mode::NonInteractive => {
                let key = default_key(options).ok_or_else(|| PromptError::NoDefault {
                    keys: options.iter().map(|o| o.key.clone()).collect(),
                })?;
                debug!("Non-interactive prompt '{}' resolved to '{}'", message, key);
                Ok(key.to_string())
            }
            Mode::Interactive => self.ask(message, options),
        }
    }

    /// Ask a yes/no question. Never fails.
    ///
    /// Interactive input failures fall back to `default_yes`. That includes
    /// EOF: Ctrl-D (or a closed stdin) on a `default_yes` question counts as
    /// yes, so only pass `default_yes = true` when an unattended yes is safe.
    pub fn confirm(&mut self, message: &str, default_yes: bool) -> bool {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        let message = format!("{} {}", message, hint);
        match self.resolve(&message, &confirm_options(default_yes)) {
            Ok(key) => key == YES,
            Err(e) => {
                warn!("Confirmation failed ({}), using default answer", e);
                default_yes
            }
        }
    }

    /// Blocking interactive loop: render, read a line, re-prompt until valid.
    fn ask(&mut self, message: &str, options: &[PromptOption]) -> Result<String, PromptError> {
        if options.is_empty() {
            return Err(PromptError::NoOptions);
        }
        let default = default_key(options);

        writeln!(self.output, "{}", message)?;
        for (i, opt) in options.iter().enumerate() {
            let marker = if Some(opt.key.as_str()) == default {
                " (default)"
            } else {
                ""
            };
            writeln!(
                self.output,
                "  {}) {} - {}{}",
                i + 1,
                opt.key,
                opt.description,
                marker
            )?;
        }

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::InputClosed);
            }

            let answer = line.trim();
            if let Some(key) = match_answer(answer, options, default) {
                return Ok(key.to_string());
            }

            debug!("Rejected answer '{}'", answer);
            let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();
            writeln!(
                self.output,
                "Invalid choice '{}'. Enter a number 1-{} or one of: {}",
                answer,
                options.len(),
                keys.join(", ")
            )?;
        }
    }
}

/// Resolve a single-choice prompt against the current process.
pub fn resolve(message: &str, options: &[PromptOption]) -> Result<String, PromptError> {
    Prompter::stdio(env::classify()).resolve(message, options)
}

/// Ask a yes/no question against the current process.
pub fn confirm(message: &str, default_yes: bool) -> bool {
    Prompter::stdio(env::classify()).confirm(message, default_yes)
}
