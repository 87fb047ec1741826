//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use astel_core::{DEFAULT_PAGE_SIZE, ExportFormat, ExportRequest, PageRequest};
use clap::{Args, Subcommand, ValueEnum};

use crate::cadastro_commands::CadastroCommand;
use crate::financeiro_commands::FinanceiroCommand;

/// Available commands.
///
/// Every command except `login` requires a live session.
#[derive(Subcommand)]
pub enum Commands {
    /// Open a session
    Login {
        /// Operator user name (defaults to the configured user)
        #[arg(short, long)]
        user: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Close the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Registration records ("Dados Cadastrais")
    Cadastro {
        #[command(subcommand)]
        command: CadastroCommand,
    },

    /// Monthly payments ("Dados Financeiros")
    Financeiro {
        #[command(subcommand)]
        command: FinanceiroCommand,
    },

    /// Show the spreadsheet import history
    Imports,
}

/// Paging options shared by the list commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Records per page
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

impl PageArgs {
    pub fn request(self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Export file format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Xlsx,
}

/// Options shared by the export commands.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// File format
    #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
    pub format: FormatArg,
    /// Output file (defaults to a name derived from the resource and format)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Comma-separated camelCase columns (XLSX only; default all)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl ExportArgs {
    pub fn request(&self) -> ExportRequest {
        match self.format {
            FormatArg::Csv => ExportRequest {
                format: ExportFormat::Csv,
                columns: self.columns.clone(),
            },
            FormatArg::Xlsx => ExportRequest::xlsx(self.columns.iter().map(|c| c.trim().to_string())),
        }
    }

    /// The file to write: `--output`, or `<stem>.<extension>`.
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{stem}.{}", self.request().format.extension()))
        })
    }
}
