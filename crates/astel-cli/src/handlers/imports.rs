//! Import history handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Print the import log, newest first.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let mut logs = ctx.registry().import_logs().await.map_err(CliError::from)?;

    if logs.is_empty() {
        println!("No imports recorded.");
        return Ok(());
    }

    logs.sort_by(|a, b| b.data_importacao.cmp(&a.data_importacao));

    println!("{:<20} {:<12} {:<10} Arquivo", "Importado em", "Tipo", "Registros");
    print_separator(80);
    for entry in &logs {
        println!(
            "{:<20} {:<12} {:<10} {}",
            entry.data_importacao.format("%Y-%m-%d %H:%M:%S"),
            truncate_string(entry.kind.as_deref().unwrap_or("--"), 11),
            format_optional(&entry.registros, "--"),
            entry.nome_arquivo
        );
    }
    Ok(())
}
