//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line client for the ASTEL registration and payments service.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "astel")]
#[command(about = "Manage ASTEL registrations and monthly payments")]
#[command(version)]
pub struct Cli {
    /// Service root URL (`/api` is appended)
    #[arg(long = "base-url", env = "ASTEL_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding the session file
    #[arg(long = "data-dir", env = "ASTEL_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "astel",
            "--verbose",
            "--base-url",
            "http://10.0.0.5:5000",
            "--data-dir",
            "/tmp/astel",
            "whoami",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.5:5000"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/astel")));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["astel"]);
        assert!(cli.command.is_none());
    }
}
