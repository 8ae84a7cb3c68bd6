//! CLI module for terragen
//!
//! ## Commands
//!
//! - `generate --out <dir> --provider <local>=<source>:<version>...` - Generate bindings
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_MODULE_PATH;
use crate::version::TERRAGEN_VERSION as VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// Generation ran, but at least one provider or entity failed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Invalid arguments; nothing was fetched or written.
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate typed Rust bindings from Terraform provider schemas
#[derive(Parser, Debug)]
#[command(name = "terragen")]
#[command(version = VERSION)]
#[command(about = "Generate typed Rust bindings from Terraform provider schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate bindings for one or more providers
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,

    /// Rust module path the output directory is mounted at
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODULE_PATH)]
    pub module_path: String,

    /// Replace the contents of a non-empty output directory
    #[arg(short, long)]
    pub force: bool,

    /// Provider to generate, as `<local>=<source>:<version>` (repeatable)
    #[arg(short, long = "provider", value_name = "SPEC", required = true)]
    pub providers: Vec<String>,

    /// Read schemas from a `terraform providers schema -json` file instead of running terraform
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Terraform binary used to fetch schemas
    #[arg(long, value_name = "BIN", default_value = "terraform", conflicts_with = "schema")]
    pub terraform: PathBuf,

    /// Seconds allowed for fetching one provider's schema
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub timeout: u64,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate(args) => commands::generate(args),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn generate_args(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["terragen", "generate"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Generate(args) => args,
        }
    }

    #[test]
    fn test_cli_parse_generate_defaults() {
        let args = generate_args(&["--out", "gen", "--provider", "aws=hashicorp/aws:4.49.0"]);
        assert_eq!(args.out, PathBuf::from("gen"));
        assert_eq!(args.module_path, "crate::terra_gen");
        assert!(!args.force);
        assert_eq!(args.providers, vec!["aws=hashicorp/aws:4.49.0"]);
        assert_eq!(args.schema, None);
        assert_eq!(args.terraform, PathBuf::from("terraform"));
        assert_eq!(args.timeout, 300);
    }

    #[test]
    fn test_cli_parse_repeated_providers() {
        let args = generate_args(&[
            "-o",
            "gen",
            "-f",
            "-p",
            "aws=hashicorp/aws:4.49.0",
            "-p",
            "google=hashicorp/google:4.0.0",
            "--module-path",
            "crate::infra",
            "--schema",
            "schema.json",
        ]);
        assert!(args.force);
        assert_eq!(args.providers.len(), 2);
        assert_eq!(args.module_path, "crate::infra");
        assert_eq!(args.schema, Some(PathBuf::from("schema.json")));
    }

    #[test]
    fn test_cli_requires_provider_and_out() {
        assert!(Cli::try_parse_from(["terragen", "generate", "--out", "gen"]).is_err());
        assert!(Cli::try_parse_from(["terragen", "generate", "-p", "aws=hashicorp/aws:1"]).is_err());
    }

    #[test]
    fn test_cli_schema_conflicts_with_terraform() {
        let result = Cli::try_parse_from([
            "terragen",
            "generate",
            "-o",
            "gen",
            "-p",
            "aws=hashicorp/aws:1",
            "--schema",
            "s.json",
            "--terraform",
            "/usr/bin/terraform",
        ]);
        assert!(result.is_err());
    }
}
