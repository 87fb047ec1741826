//! Payment command handlers.

use std::path::Path;

use anyhow::Result;
use astel_core::{
    ImportKind, NewPayment, PageRequest, PaymentChange, PaymentKey, PaymentRow,
    RegistryPortError,
};

use super::files::{read_upload, write_export};
use crate::bootstrap::CliContext;
use crate::commands::{ExportArgs, PageArgs};
use crate::error::CliError;
use crate::financeiro_commands::{FinanceiroCommand, PaymentFilterArgs};
use crate::presentation::{
    display_payment, format_money, format_optional, page_footer, page_navigation, print_separator,
    truncate_string,
};
use crate::utils::input;

/// Default export file name, without extension.
const EXPORT_STEM: &str = "dados_financeiros";

/// Route a `financeiro` subcommand to its handler.
pub async fn dispatch(ctx: &CliContext, command: FinanceiroCommand) -> Result<()> {
    match command {
        FinanceiroCommand::List { filter, page } => list(ctx, &filter, page).await,
        FinanceiroCommand::Add {
            matricula_astel,
            ano,
            mes,
            valor,
            data,
        } => {
            let payment = NewPayment {
                matricula_astel,
                ano,
                mes,
                valor_pago: valor,
                data_pagamento: data,
            };
            add(ctx, payment).await
        }
        FinanceiroCommand::Update {
            id,
            ano,
            mes,
            change,
        } => update(ctx, key(id, ano, mes)?, change.into()).await,
        FinanceiroCommand::Delete { id, ano, mes, force } => {
            delete(ctx, key(id, ano, mes)?, force).await
        }
        FinanceiroCommand::History { id } => history(ctx, id).await,
        FinanceiroCommand::Import { file } => import(ctx, &file).await,
        FinanceiroCommand::Export {
            filter,
            export: args,
        } => export(ctx, &filter, &args).await,
    }
}

fn key(id: i64, ano: i32, mes: u32) -> Result<PaymentKey, CliError> {
    PaymentKey::new(id, ano, mes).map_err(|e| CliError::from(RegistryPortError::from(e)))
}

fn reference(ano: i32, mes: u32) -> String {
    format!("{mes:02}/{ano}")
}

/// The old single-number payment code, shown for operators used to it.
fn legacy_code(row: &PaymentRow) -> String {
    row.key()
        .map_or_else(|_| "--".to_string(), |key| key.legacy_display_id())
}

pub async fn list(ctx: &CliContext, filter: &PaymentFilterArgs, page: PageArgs) -> Result<()> {
    let filter = filter.to_filter(page.request());
    let page = ctx
        .registry()
        .list_payments(&filter)
        .await
        .map_err(CliError::from)?;

    if page.is_empty() {
        println!("No payments found.");
        return Ok(());
    }

    println!(
        "{:<12} {:<8} {:<30} {:<10} {:<8} {:<14} {:<11} Inadimplente",
        "Código", "Cadastro", "Nome", "ASTEL", "Ref.", "Valor", "Pago em"
    );
    print_separator(113);

    for row in &page.items {
        let delinquent = match row.inadimplente {
            Some(true) => "sim",
            Some(false) => "não",
            None => "--",
        };
        println!(
            "{:<12} {:<8} {:<30} {:<10} {:<8} {:<14} {:<11} {}",
            legacy_code(row),
            row.id_dados_cadastrais,
            truncate_string(row.nome.as_deref().unwrap_or("--"), 29),
            format_optional(&row.matricula_astel, "--"),
            reference(row.ano, row.mes),
            format_money(row.valor_pago),
            format_optional(&row.data_pagamento, "--"),
            delinquent
        );
    }

    println!();
    println!("{}", page_footer(&page.meta));
    if let Some(navigation) = page_navigation(&page.meta) {
        println!("{navigation}");
    }
    Ok(())
}

pub async fn add(ctx: &CliContext, payment: NewPayment) -> Result<()> {
    let created = ctx
        .registry()
        .add_payment(payment)
        .await
        .map_err(CliError::from)?;
    display_payment(&created, Some("Payment recorded:"));
    Ok(())
}

/// Apply a change to the payment addressed by `key`.
pub async fn update(ctx: &CliContext, key: PaymentKey, change: PaymentChange) -> Result<()> {
    let updated = ctx
        .registry()
        .update_payment(key, None, change)
        .await
        .map_err(CliError::from)?;
    display_payment(&updated, Some("Payment updated:"));
    Ok(())
}

pub async fn delete(ctx: &CliContext, key: PaymentKey, force: bool) -> Result<()> {
    if !force {
        let confirm = input::prompt_confirmation(&format!(
            "Delete the {} payment of registration {}?",
            reference(key.year(), key.month()),
            key.registrant_id()
        ))?;
        if !confirm {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    ctx.registry()
        .delete_payment(key)
        .await
        .map_err(CliError::from)?;
    println!("Payment {key} deleted.");
    Ok(())
}

/// Print every payment of one registration in service order.
pub async fn history(ctx: &CliContext, id: i64) -> Result<()> {
    let payments = ctx
        .registry()
        .payment_history(id)
        .await
        .map_err(CliError::from)?;

    if payments.is_empty() {
        println!("No payments recorded for registration {id}.");
        return Ok(());
    }

    println!("{:<8} {:<14} Pago em", "Ref.", "Valor");
    print_separator(40);
    for payment in &payments {
        println!(
            "{:<8} {:<14} {}",
            reference(payment.ano, payment.mes),
            format_money(payment.valor_pago),
            format_optional(&payment.data_pagamento, "--")
        );
    }

    let total: f64 = payments.iter().map(|p| p.valor_pago).sum();
    println!();
    println!("{} payment(s), total {}", payments.len(), format_money(total));
    Ok(())
}

pub async fn import(ctx: &CliContext, file: &Path) -> Result<()> {
    let (name, contents) = read_upload(file).await?;
    let message = ctx
        .registry()
        .import_file(ImportKind::Payments, &name, contents)
        .await
        .map_err(CliError::from)?;

    println!("{}", message.unwrap_or_else(|| format!("'{name}' imported.")));
    Ok(())
}

pub async fn export(ctx: &CliContext, filter: &PaymentFilterArgs, args: &ExportArgs) -> Result<()> {
    let filter = filter.to_filter(PageRequest::default());
    let bytes = ctx
        .registry()
        .export_payments(&filter, &args.request())
        .await
        .map_err(CliError::from)?;

    write_export(&args.output_path(EXPORT_STEM), &bytes).await
}
