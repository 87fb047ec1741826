//! Payment ("Dados Financeiros") subcommands.

use std::path::PathBuf;

use astel_core::{PageRequest, PaymentChange, PaymentFilter};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::commands::{ExportArgs, PageArgs};

/// Payment commands.
///
/// A payment is addressed by registration id, year and month.
#[derive(Subcommand)]
pub enum FinanceiroCommand {
    /// List payments matching a filter
    List {
        #[command(flatten)]
        filter: PaymentFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Record a payment for the holder of an ASTEL number
    Add {
        /// ASTEL registration number of the payer
        #[arg(long = "matricula-astel")]
        matricula_astel: i64,
        /// Reference year
        #[arg(long)]
        ano: i32,
        /// Reference month (1-12)
        #[arg(long)]
        mes: u32,
        /// Amount paid
        #[arg(long)]
        valor: f64,
        /// Payment date (YYYY-MM-DD)
        #[arg(long)]
        data: Option<NaiveDate>,
    },
    /// Change a payment; omitted values are kept
    Update {
        /// Registration id
        id: i64,
        /// Current reference year
        ano: i32,
        /// Current reference month
        mes: u32,
        #[command(flatten)]
        change: PaymentChangeArgs,
    },
    /// Delete a payment
    Delete {
        /// Registration id
        id: i64,
        /// Reference year
        ano: i32,
        /// Reference month
        mes: u32,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show every payment of one registration
    History {
        /// Registration id
        id: i64,
    },
    /// Upload a payment spreadsheet
    Import {
        /// Spreadsheet to upload
        file: PathBuf,
    },
    /// Export payments matching a filter
    Export {
        #[command(flatten)]
        filter: PaymentFilterArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
}

/// Payment list/export filter.
#[derive(Args, Debug, Clone, Default)]
pub struct PaymentFilterArgs {
    /// Name fragment
    #[arg(long)]
    pub nome: Option<String>,
    /// CPF fragment
    #[arg(long)]
    pub cpf: Option<String>,
    /// ASTEL registration number
    #[arg(long = "matricula-astel")]
    pub matricula_astel: Option<i64>,
    /// Paid on or after (YYYY-MM-DD)
    #[arg(long = "data-inicio")]
    pub data_inicio: Option<NaiveDate>,
    /// Paid on or before (YYYY-MM-DD)
    #[arg(long = "data-fim")]
    pub data_fim: Option<NaiveDate>,
    /// Delinquency flag (true/false)
    #[arg(long)]
    pub inadimplente: Option<bool>,
    #[arg(long)]
    pub cidade: Option<String>,
    #[arg(long)]
    pub estado: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefone: Option<String>,
}

impl PaymentFilterArgs {
    pub fn to_filter(&self, page: PageRequest) -> PaymentFilter {
        PaymentFilter {
            nome: self.nome.clone(),
            cpf: self.cpf.clone(),
            matricula_astel: self.matricula_astel,
            data_inicio: self.data_inicio,
            data_fim: self.data_fim,
            inadimplente: self.inadimplente,
            cidade: self.cidade.clone(),
            estado: self.estado.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            page,
        }
    }
}

/// New values for `financeiro update`.
#[derive(Args, Debug, Clone, Default)]
pub struct PaymentChangeArgs {
    /// New reference year
    #[arg(long = "novo-ano")]
    pub novo_ano: Option<i32>,
    /// New reference month
    #[arg(long = "novo-mes")]
    pub novo_mes: Option<u32>,
    /// New amount
    #[arg(long)]
    pub valor: Option<f64>,
    /// New payment date (YYYY-MM-DD)
    #[arg(long)]
    pub data: Option<NaiveDate>,
}

impl From<PaymentChangeArgs> for PaymentChange {
    fn from(args: PaymentChangeArgs) -> Self {
        Self {
            ano: args.novo_ano,
            mes: args.novo_mes,
            valor_pago: args.valor,
            data_pagamento: args.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_payment_filter_args() {
        let cli = Cli::parse_from([
            "astel",
            "financeiro",
            "list",
            "--data-inicio",
            "2024-01-01",
            "--data-fim",
            "2024-06-30",
            "--inadimplente",
            "true",
            "--estado",
            "PE",
            "--page-size",
            "20",
        ]);
        let Some(Commands::Financeiro {
            command: FinanceiroCommand::List { filter, page },
        }) = cli.command
        else {
            panic!("expected financeiro list");
        };

        let filter = filter.to_filter(page.request());
        assert_eq!(filter.data_inicio, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.inadimplente, Some(true));
        assert_eq!(filter.page, PageRequest::new(1, 20));
    }

    #[test]
    fn test_update_args_map_to_change() {
        let cli = Cli::parse_from([
            "astel", "financeiro", "update", "12", "2024", "3", "--novo-mes", "4",
        ]);
        let Some(Commands::Financeiro {
            command: FinanceiroCommand::Update { id, ano, mes, change },
        }) = cli.command
        else {
            panic!("expected financeiro update");
        };

        assert_eq!((id, ano, mes), (12, 2024, 3));
        let change = PaymentChange::from(change);
        assert_eq!(change.mes, Some(4));
        assert_eq!(change.ano, None);
    }

    #[test]
    fn test_add_requires_matricula() {
        let result = Cli::try_parse_from([
            "astel", "financeiro", "add", "--ano", "2024", "--mes", "3", "--valor", "50",
        ]);
        assert!(result.is_err());
    }
}
