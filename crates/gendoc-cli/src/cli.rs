//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use crate::logging::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// gendoc - markdown API documentation from request/response samples
///
/// Reads a manifest of endpoints with JSON samples and field annotations,
/// extracts a field table for every request and response, and writes one
/// linked markdown page per endpoint.
#[derive(Parser, Debug)]
#[command(
    name = "gendoc",
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

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log output format
    #[arg(long, value_enum, global = true, env = "GENDOC_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the markdown documentation tree
    Generate(GenerateArgs),

    /// Print the extracted field schema of every endpoint
    Fields(FieldsArgs),

    /// Print the rendered page of one endpoint
    Preview(PreviewArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the manifest file (YAML, JSON or TOML)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Output directory; deleted and recreated on every run
    #[arg(short = 'd', long, default_value = "docs")]
    pub out_dir: PathBuf,

    /// Page language, overriding the manifest
    #[arg(short, long, value_enum)]
    pub locale: Option<LocaleArg>,

    /// List every endpoint on the README page
    #[arg(long)]
    pub index: bool,
}

/// Arguments for the fields command
#[derive(Parser, Debug)]
pub struct FieldsArgs {
    /// Path to the manifest file (YAML, JSON or TOML)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Only show the endpoint with this title or path
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

/// Arguments for the preview command
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Path to the manifest file (YAML, JSON or TOML)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Title or path of the endpoint to render
    #[arg(value_name = "ENDPOINT")]
    pub endpoint: String,

    /// Page language, overriding the manifest
    #[arg(short, long, value_enum)]
    pub locale: Option<LocaleArg>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
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

/// Page languages
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    /// English labels
    En,
    /// Chinese labels
    Zh,
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

impl From<LocaleArg> for gendoc_core::Locale {
    fn from(locale: LocaleArg) -> Self {
        match locale {
            LocaleArg::En => gendoc_core::Locale::English,
            LocaleArg::Zh => gendoc_core::Locale::Chinese,
        }
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
