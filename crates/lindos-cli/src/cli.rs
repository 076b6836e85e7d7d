//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use lindos_bridge::MessageSource;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lindos CLI - talk to the Lindos native text-processing library
///
/// Sends messages through the native bridge, validates them, and looks up
/// status code descriptions.
#[derive(Parser, Debug)]
#[command(
    name = "lindos",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "LINDOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the native library, overriding the configured layout
    #[arg(long, global = true, env = "LINDOS_LIBRARY", value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Enable diagnostics on both sides of the native boundary
    #[arg(long, global = true)]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a message through the native library and print the reply
    Process(ProcessArgs),

    /// Check whether the native library would accept a message
    Validate(ValidateArgs),

    /// Describe status codes
    Describe(DescribeArgs),

    /// Read messages from stdin, one per line
    Interactive(InteractiveArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the process command
#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Message text; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,

    /// Report failures with the text the native library attached
    #[arg(long)]
    pub native_message: bool,

    /// Print the reply or the error text as one line and always succeed
    #[arg(long, conflicts_with = "native_message")]
    pub legacy: bool,
}

impl ProcessArgs {
    /// The message to send
    pub fn message(&self) -> String {
        self.text.join(" ")
    }

    /// Where failure messages come from
    pub fn message_source(&self) -> MessageSource {
        message_source(self.native_message)
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Message text; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

impl ValidateArgs {
    /// The message to check
    pub fn message(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the describe command
#[derive(Parser, Debug)]
pub struct DescribeArgs {
    /// Status codes to describe
    #[arg(value_name = "CODE", required = true, allow_negative_numbers = true)]
    pub codes: Vec<i32>,

    /// Ask the native library instead of the built-in taxonomy
    #[arg(long)]
    pub native: bool,
}

/// Arguments for the interactive command
#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    /// Report failures with the text the native library attached
    #[arg(long)]
    pub native_message: bool,
}

impl InteractiveArgs {
    /// Where failure messages come from
    pub fn message_source(&self) -> MessageSource {
        message_source(self.native_message)
    }
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

fn message_source(native: bool) -> MessageSource {
    if native {
        MessageSource::Native
    } else {
        MessageSource::Taxonomy
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
