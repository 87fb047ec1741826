//! `astel` command-line client.
//!
//! The library half holds the clap command tree, the composition root and
//! the command handlers; `main.rs` only parses, bootstraps and dispatches.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by main.rs only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod cadastro_commands;
pub mod commands;
pub mod error;
pub mod financeiro_commands;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod session_store;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use cadastro_commands::CadastroCommand;
pub use commands::Commands;
pub use error::{CliError, exit_code_for};
pub use financeiro_commands::FinanceiroCommand;
pub use parser::Cli;
pub use session_store::FileSessionStore;
