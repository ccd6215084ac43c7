//! CLI argument parsing with clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Ask questions from shell scripts without hanging in CI.
///
/// Prompts are answered on the terminal when a human is present. In CI,
/// with stdin redirected, or with PROMPTLY_NON_INTERACTIVE=true, every
/// prompt resolves to its declared default without reading input.
#[derive(Debug, Parser)]
#[command(name = "promptly", version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Never prompt; answer every question with its default
    #[arg(long, global = true)]
    pub no_input: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show whether prompts would be interactive, and why
    Mode,

    /// Ask the user to pick one of several options
    #[command(after_help = "\
Examples:
  promptly choose 'Deploy to?' staging=Staging prod=Production --default staging
  promptly choose 'Pick a shell' bash zsh fish     # Key doubles as description
  promptly --no-input choose 'Color?' red blue -d blue

The chosen key is printed to stdout; prompt text goes to stderr.")]
    Choose(ChooseArgs),

    /// Ask a yes/no question (exit code 0 for yes, 1 for no)
    #[command(after_help = "\
Examples:
  promptly confirm 'Continue?' --default-yes && ./next-step.sh
  if promptly confirm 'Delete build/?'; then rm -rf build; fi")]
    Confirm(ConfirmArgs),
}

#[derive(Debug, clap::Args)]
pub struct ChooseArgs {
    /// Question shown above the options
    pub message: String,

    /// Options as KEY=DESCRIPTION (or just KEY)
    #[arg(required = true, num_args = 1.., value_parser = parse_option_spec)]
    pub options: Vec<OptionSpec>,

    /// Key to use when no one can answer
    #[arg(short, long, value_name = "KEY")]
    pub default: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct ConfirmArgs {
    /// Question to ask
    pub message: String,

    /// Answer yes when no one can answer (default is no)
    #[arg(short = 'y', long)]
    pub default_yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON object per result
    Json,
}

/// A `KEY=DESCRIPTION` option from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: String,
    pub description: String,
}

fn parse_option_spec(raw: &str) -> Result<OptionSpec, String> {
    let (key, description) = match raw.split_once('=') {
        Some((key, description)) => (key.trim(), description.trim()),
        None => (raw.trim(), raw.trim()),
    };
    if key.is_empty() {
        return Err(format!("option '{}' has an empty key", raw));
    }
    let description = if description.is_empty() {
        key
    } else {
        description
    };
    Ok(OptionSpec {
        key: key.to_string(),
        description: description.to_string(),
    })
}
