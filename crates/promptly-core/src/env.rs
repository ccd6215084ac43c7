//! Interactive/non-interactive classification of the running process.
//!
//! Precedence (first match wins):
//! 1. `CI` or `GITHUB_ACTIONS` set to a truthy value -> non-interactive
//! 2. `PROMPTLY_NON_INTERACTIVE` set to exactly `"true"` -> non-interactive
//! 3. stdin attached to a terminal -> interactive, otherwise non-interactive
//!
//! CI runners sometimes hand the process a pseudo-terminal, so the CI
//! signals are checked before the terminal probe.

use std::env;
use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

/// Generic CI indicator understood by most CI providers.
pub const CI_VAR: &str = "CI";

/// Set by GitHub Actions runners.
pub const HOSTED_CI_VAR: &str = "GITHUB_ACTIONS";

/// Tool-specific override. Only the exact value `"true"` is recognized.
pub const NON_INTERACTIVE_VAR: &str = "PROMPTLY_NON_INTERACTIVE";

/// Whether a human can answer a blocking prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Interactive,
    NonInteractive,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Interactive => write!(f, "interactive"),
            Mode::NonInteractive => write!(f, "non_interactive"),
        }
    }
}

/// The rule that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeReason {
    /// Generic `CI` indicator is truthy.
    Ci,
    /// Hosted CI indicator is truthy.
    HostedCi,
    /// Tool override forced non-interactive mode.
    Override,
    /// stdin is a terminal.
    Terminal,
    /// stdin is a pipe, file, or closed descriptor.
    NoTerminal,
}

impl std::fmt::Display for ModeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModeReason::Ci => "CI environment detected",
            ModeReason::HostedCi => "hosted CI environment detected",
            ModeReason::Override => "non-interactive mode forced",
            ModeReason::Terminal => "stdin is a terminal",
            ModeReason::NoTerminal => "stdin is not a terminal",
        };
        f.write_str(s)
    }
}

/// Snapshot of the ambient signals the classifier looks at.
///
/// Classification is a pure function of this value, so callers (and tests)
/// can build one by hand instead of touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSignals {
    /// Raw value of `CI`, if set.
    pub ci: Option<String>,
    /// Raw value of `GITHUB_ACTIONS`, if set.
    pub hosted_ci: Option<String>,
    /// Raw value of `PROMPTLY_NON_INTERACTIVE`, if set.
    pub force_non_interactive: Option<String>,
    pub stdin_is_terminal: bool,
}

impl EnvSignals {
    /// Read the signals from the real process environment and stdin.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| env::var(name).ok(), std::io::stdin().is_terminal())
    }

    /// Build signals from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, stdin_is_terminal: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            ci: lookup(CI_VAR),
            hosted_ci: lookup(HOSTED_CI_VAR),
            force_non_interactive: lookup(NON_INTERACTIVE_VAR),
            stdin_is_terminal,
        }
    }

    /// Force non-interactive mode, as if the override variable were `"true"`.
    pub fn with_forced_non_interactive(mut self) -> Self {
        self.force_non_interactive = Some("true".to_string());
        self
    }

    /// Which rule decides the mode.
    pub fn reason(&self) -> ModeReason {
        if is_truthy(self.ci.as_deref()) {
            return ModeReason::Ci;
        }
        if is_truthy(self.hosted_ci.as_deref()) {
            return ModeReason::HostedCi;
        }
        // Exact match, not a truthiness parse: "1" or "TRUE" do not count.
        if self.force_non_interactive.as_deref() == Some("true") {
            return ModeReason::Override;
        }
        if self.stdin_is_terminal {
            ModeReason::Terminal
        } else {
            ModeReason::NoTerminal
        }
    }

    pub fn classify(&self) -> Mode {
        match self.reason() {
            ModeReason::Terminal => Mode::Interactive,
            _ => Mode::NonInteractive,
        }
    }
}

/// Classify the current process.
pub fn classify() -> Mode {
    let signals = EnvSignals::from_process();
    let mode = signals.classify();
    tracing::debug!("Classified as {} ({})", mode, signals.reason());
    mode
}

/// CI-style truthiness: set, non-empty, and not an explicit "off" value.
fn is_truthy(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.trim();
    !value.is_empty()
        && !["0", "false", "no", "off"]
            .iter()
            .any(|off| value.eq_ignore_ascii_case(off))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn signals(vars: &[(&str, &str)], tty: bool) -> EnvSignals {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvSignals::from_lookup(|name| map.get(name).cloned(), tty)
    }

    #[test]
    fn test_terminal_without_signals_is_interactive() {
        assert_eq!(signals(&[], true).classify(), Mode::Interactive);
        assert_eq!(signals(&[], true).reason(), ModeReason::Terminal);
    }

    #[test]
    fn test_no_terminal_is_non_interactive() {
        assert_eq!(signals(&[], false).classify(), Mode::NonInteractive);
        assert_eq!(signals(&[], false).reason(), ModeReason::NoTerminal);
    }

    #[test]
    fn test_ci_wins_over_everything() {
        for tty in [true, false] {
            for override_value in [None, Some("true"), Some("false"), Some("")] {
                let mut vars = vec![(CI_VAR, "true")];
                if let Some(v) = override_value {
                    vars.push((NON_INTERACTIVE_VAR, v));
                }
                let s = signals(&vars, tty);
                assert_eq!(s.classify(), Mode::NonInteractive);
                assert_eq!(s.reason(), ModeReason::Ci);
            }
        }
    }

    #[test]
    fn test_hosted_ci_with_terminal() {
        let s = signals(&[(HOSTED_CI_VAR, "true")], true);
        assert_eq!(s.classify(), Mode::NonInteractive);
        assert_eq!(s.reason(), ModeReason::HostedCi);
    }

    #[test]
    fn test_ci_truthiness() {
        for value in ["true", "1", "yes", "TRUE", "anything"] {
            assert_eq!(
                signals(&[(CI_VAR, value)], true).classify(),
                Mode::NonInteractive,
                "CI={value:?} should be truthy"
            );
        }
        for value in ["", "  ", "0", "false", "False", "no", "off"] {
            assert_eq!(
                signals(&[(CI_VAR, value)], true).classify(),
                Mode::Interactive,
                "CI={value:?} should not be truthy"
            );
        }
    }

    #[test]
    fn test_override_exact_true() {
        let s = signals(&[(NON_INTERACTIVE_VAR, "true")], true);
        assert_eq!(s.classify(), Mode::NonInteractive);
        assert_eq!(s.reason(), ModeReason::Override);
    }

    #[test]
    fn test_override_other_values_ignored() {
        for value in ["false", "1", "", "TRUE", "True", " true", "yes"] {
            let s = signals(&[(NON_INTERACTIVE_VAR, value)], true);
            assert_eq!(
                s.classify(),
                Mode::Interactive,
                "{NON_INTERACTIVE_VAR}={value:?} must not force non-interactive"
            );
        }
    }

    #[test]
    fn test_with_forced_non_interactive() {
        let s = signals(&[], true).with_forced_non_interactive();
        assert_eq!(s.classify(), Mode::NonInteractive);
        assert_eq!(s.reason(), ModeReason::Override);
    }

    #[test]
    fn test_classification_is_stable() {
        let s = signals(&[(NON_INTERACTIVE_VAR, "false")], true);
        let first = s.classify();
        for _ in 0..10 {
            assert_eq!(s.classify(), first);
        }
    }

    #[test]
    fn test_classify_process_is_idempotent() {
        assert_eq!(classify(), classify());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&Mode::NonInteractive).unwrap(),
            "\"non_interactive\""
        );
        assert_eq!(Mode::Interactive.to_string(), "interactive");
        assert_eq!(
            serde_json::to_string(&ModeReason::HostedCi).unwrap(),
            "\"hosted_ci\""
        );
    }
}
