//! CLI argument definitions
//!
//! All Clap derive structs for `apicheck` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Declarative HTTP API smoke-test runner.
#[derive(Parser, Debug)]
#[command(name = "apicheck", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "APICHECK_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a test plan.
    Run(RunArgs),

    /// Validate test plan files without executing anything.
    Validate(ValidateArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the YAML test plan.
    #[arg(short, long, env = "APICHECK_CONFIG")]
    pub config: PathBuf,

    /// Append one JSON line per executed route to this file.
    #[arg(long, env = "APICHECK_LOG")]
    pub log: Option<PathBuf>,

    /// Disable TLS certificate verification.
    #[arg(long)]
    pub insecure: bool,

    /// Make schema found/notFound type checks decisive instead of
    /// presence alone.
    #[arg(long)]
    pub strict_types: bool,

    /// Inclusive lower bound for the model builder's `int` directive.
    #[arg(long, default_value_t = 0)]
    pub random_min: i64,

    /// Inclusive upper bound for the model builder's `int` directive.
    #[arg(long, default_value_t = 10)]
    pub random_max: i64,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Test plan files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

// ============================================================================
// Tests
// ============================================================================
