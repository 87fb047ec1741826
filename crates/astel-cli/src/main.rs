//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to the core services.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use astel_cli::{Cli, CliConfig, CliError, Commands, bootstrap, exit_code_for, handlers};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    // Login opens the session and logout ends it; everything else needs a live one.
    let session = match command {
        Commands::Login { .. } | Commands::Logout => None,
        _ => Some(ctx.sessions().require().await.map_err(CliError::from)?),
    };

    match cli.command {
        Some(Commands::Login { user, password }) => {
            handlers::session::login(&ctx, user, password).await?;
        }
        Some(Commands::Logout) => {
            handlers::session::logout(&ctx).await?;
        }
        Some(Commands::Whoami) => {
            if let Some(session) = &session {
                handlers::session::whoami(session);
            }
        }
        Some(Commands::Cadastro { command }) => {
            handlers::cadastro::dispatch(&ctx, command).await?;
        }
        Some(Commands::Financeiro { command }) => {
            handlers::financeiro::dispatch(&ctx, command).await?;
        }
        Some(Commands::Imports) => {
            handlers::imports::execute(&ctx).await?;
        }
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = u8::try_from(exit_code_for(&err)).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
