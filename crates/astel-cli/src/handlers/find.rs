//! Name lookup handler (`cadastro find`).

use anyhow::Result;
use astel_core::{AutocompleteItem, MIN_AUTOCOMPLETE_CHARS, Suggestions};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;

pub async fn execute(ctx: &CliContext, term: &str, limit: Option<u32>) -> Result<()> {
    let suggestions = ctx
        .autocompleter(limit)
        .suggest(term)
        .await
        .map_err(CliError::from)?;

    match suggestions {
        Suggestions::TooShort => Err(CliError::Arguments(format!(
            "type at least {MIN_AUTOCOMPLETE_CHARS} characters of the name"
        ))
        .into()),
        // Only one call is ever in flight here.
        Suggestions::Superseded => Ok(()),
        Suggestions::Ready(items) if items.is_empty() => {
            println!("No registrations match '{}'.", term.trim());
            Ok(())
        }
        Suggestions::Ready(items) => {
            print_items(&items);
            Ok(())
        }
    }
}

fn print_items(items: &[AutocompleteItem]) {
    println!("{:<6} {:<10} Nome", "ID", "ASTEL");
    print_separator(60);
    for item in items {
        let astel = item
            .matricula_astel
            .map_or_else(|| "--".to_string(), |m| m.to_string());
        println!("{:<6} {:<10} {}", item.id, astel, item.nome);
    }
}
