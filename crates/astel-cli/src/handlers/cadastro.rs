//! Registration command handlers.

use std::path::Path;

use anyhow::Result;
use astel_core::{ImportKind, PageRequest, RegistrationRecord};

use super::files::{read_upload, write_export};
use super::find;
use crate::bootstrap::CliContext;
use crate::cadastro_commands::{CadastroCommand, RegistrationFields, RegistrationFilterArgs};
use crate::commands::{ExportArgs, PageArgs};
use crate::error::CliError;
use crate::presentation::{
    display_registration, page_footer, page_navigation, print_separator, truncate_string,
};
use crate::utils::input;

/// Default export file name, without extension.
const EXPORT_STEM: &str = "dados_cadastrais";

/// Route a `cadastro` subcommand to its handler.
pub async fn dispatch(ctx: &CliContext, command: CadastroCommand) -> Result<()> {
    match command {
        CadastroCommand::List { filter, page } => list(ctx, &filter, page).await,
        CadastroCommand::Get { id } => get(ctx, id).await,
        CadastroCommand::Create { fields } => create(ctx, fields).await,
        CadastroCommand::Update { id, fields } => update(ctx, id, fields).await,
        CadastroCommand::Delete { id, force } => delete(ctx, id, force).await,
        CadastroCommand::Import { file } => import(ctx, &file).await,
        CadastroCommand::Export { filter, export: args } => export(ctx, &filter, &args).await,
        CadastroCommand::Find { term, limit } => find::execute(ctx, &term, limit).await,
    }
}

pub async fn list(ctx: &CliContext, filter: &RegistrationFilterArgs, page: PageArgs) -> Result<()> {
    let filter = filter.to_filter(page.request());
    let page = ctx
        .registry()
        .list_registrations(&filter)
        .await
        .map_err(CliError::from)?;

    if page.is_empty() {
        println!("No registrations found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<30} {:<10} {:<15} {:<22} {:<18} Ativo",
        "ID", "Nome", "ASTEL", "CPF", "Cidade/UF", "Pagamento"
    );
    print_separator(110);

    for record in &page.items {
        let place = match (record.cidade.as_deref(), record.estado.as_deref()) {
            (Some(cidade), Some(uf)) => format!("{cidade}/{uf}"),
            (Some(cidade), None) => cidade.to_string(),
            (None, Some(uf)) => uf.to_string(),
            (None, None) => "--".to_string(),
        };
        let method = record
            .forma_pagamento
            .as_ref()
            .map_or_else(|| "--".to_string(), ToString::to_string);
        let active = match record.ativo {
            Some(true) => "sim",
            Some(false) => "não",
            None => "--",
        };

        println!(
            "{:<6} {:<30} {:<10} {:<15} {:<22} {:<18} {}",
            record.id,
            truncate_string(&record.display_name(), 29),
            record.matricula_astel,
            truncate_string(record.cpf.as_deref().unwrap_or("--"), 14),
            truncate_string(&place, 21),
            truncate_string(&method, 17),
            active
        );
    }

    println!();
    println!("{}", page_footer(&page.meta));
    if let Some(navigation) = page_navigation(&page.meta) {
        println!("{navigation}");
    }
    Ok(())
}

pub async fn get(ctx: &CliContext, id: i64) -> Result<()> {
    let record = ctx
        .registry()
        .get_registration(id)
        .await
        .map_err(CliError::from)?;
    display_registration(&record, None);
    Ok(())
}

pub async fn create(ctx: &CliContext, fields: RegistrationFields) -> Result<()> {
    let record = fields.apply(RegistrationRecord::default());
    let created = ctx
        .registry()
        .create_registration(record)
        .await
        .map_err(CliError::from)?;

    display_registration(&created, Some("Registration created:"));
    Ok(())
}

/// Overlay the given fields on the stored record and save it.
pub async fn update(ctx: &CliContext, id: i64, fields: RegistrationFields) -> Result<()> {
    let current = ctx
        .registry()
        .get_registration(id)
        .await
        .map_err(CliError::from)?;
    let merged = fields.apply(current);

    ctx.registry()
        .update_registration(id, merged)
        .await
        .map_err(CliError::from)?;

    println!("Registration {id} updated.");
    Ok(())
}

pub async fn delete(ctx: &CliContext, id: i64, force: bool) -> Result<()> {
    if !force {
        let record = ctx
            .registry()
            .get_registration(id)
            .await
            .map_err(CliError::from)?;
        display_registration(&record, Some("Registration to delete:"));
        println!();

        let confirm = input::prompt_confirmation("Delete this registration?")?;
        if !confirm {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    ctx.registry()
        .delete_registration(id)
        .await
        .map_err(CliError::from)?;
    println!("Registration {id} deleted.");
    Ok(())
}

pub async fn import(ctx: &CliContext, file: &Path) -> Result<()> {
    let (name, contents) = read_upload(file).await?;
    let message = ctx
        .registry()
        .import_file(ImportKind::Registrations, &name, contents)
        .await
        .map_err(CliError::from)?;

    println!("{}", message.unwrap_or_else(|| format!("'{name}' imported.")));
    Ok(())
}

pub async fn export(ctx: &CliContext, filter: &RegistrationFilterArgs, args: &ExportArgs) -> Result<()> {
    let filter = filter.to_filter(PageRequest::default());
    let bytes = ctx
        .registry()
        .export_registrations(&filter, &args.request())
        .await
        .map_err(CliError::from)?;

    write_export(&args.output_path(EXPORT_STEM), &bytes).await
}
