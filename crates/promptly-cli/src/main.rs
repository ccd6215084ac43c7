//! promptly CLI entry point.

mod args;
mod output;

use std::io::{BufRead, Write};

use clap::Parser;
use promptly_core::{ApiError, EnvSignals, PromptOption, Prompter};
use tracing::{debug, error};

use crate::args::{ChooseArgs, Cli, Commands, OptionSpec};
use crate::output::{render_decision, render_error, Decision};

/// Exit code for a declined confirmation.
const EXIT_DECLINED: i32 = 1;

/// Exit code for a structured error.
const EXIT_ERROR: i32 = 2;

fn main() {
    // Logs go to stderr; stdout carries only the decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            let err = internal_error(&e);
            eprintln!(
                "{}",
                render_error(&err, format).unwrap_or_else(|_| err.to_string())
            );
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Run the parsed command and return the process exit code.
fn run(cli: Cli) -> anyhow::Result<i32> {
    let signals = effective_signals(EnvSignals::from_process(), cli.no_input);
    let mode = signals.classify();
    debug!("Running in {} mode ({})", mode, signals.reason());

    let outcome = match &cli.command {
        Commands::Mode => Ok(Decision::Mode {
            mode,
            reason: signals.reason(),
        }),
        Commands::Choose(args) => choose(&mut Prompter::stdio(mode), args),
        Commands::Confirm(args) => {
            let confirmed = Prompter::stdio(mode).confirm(&args.message, args.default_yes);
            Ok(Decision::Confirm { confirmed, mode })
        }
    };

    let code = exit_code(&outcome);
    match outcome {
        Ok(decision) => println!("{}", render_decision(&decision, cli.format)?),
        Err(err) => eprintln!("{}", render_error(&err, cli.format)?),
    }
    Ok(code)
}

/// `--no-input` forces non-interactive mode on top of the ambient signals.
fn effective_signals(signals: EnvSignals, no_input: bool) -> EnvSignals {
    if no_input {
        signals.with_forced_non_interactive()
    } else {
        signals
    }
}

fn exit_code(outcome: &Result<Decision, ApiError>) -> i32 {
    match outcome {
        Ok(Decision::Confirm {
            confirmed: false, ..
        }) => EXIT_DECLINED,
        Ok(_) => 0,
        Err(_) => EXIT_ERROR,
    }
}

/// Failures outside the prompt itself, such as a broken stdout.
fn internal_error(e: &anyhow::Error) -> ApiError {
    ApiError::internal(format!("{:#}", e))
}

/// Turn command-line option specs into prompt options, flagging `default`.
fn build_options(
    specs: &[OptionSpec],
    default: Option<&str>,
) -> Result<Vec<PromptOption>, ApiError> {
    let mut options: Vec<PromptOption> = specs
        .iter()
        .map(|spec| PromptOption::new(&spec.key, &spec.description))
        .collect();

    if let Some(default) = default {
        let Some(opt) = options.iter_mut().find(|o| o.key == default) else {
            let keys: Vec<&str> = specs.iter().map(|s| s.key.as_str()).collect();
            return Err(ApiError::invalid_input_with_suggestion(
                format!("Default '{}' is not one of the options", default),
                format!("Use one of: {}", keys.join(", ")),
            ));
        };
        opt.is_default = true;
    }

    Ok(options)
}

fn choose<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    args: &ChooseArgs,
) -> Result<Decision, ApiError> {
    let options = build_options(&args.options, args.default.as_deref())?;
    let key = prompter
        .resolve(&args.message, &options)
        .map_err(|e| ApiError::from(&e))?;
    Ok(Decision::Choice {
        key,
        mode: prompter.mode(),
    })
}
