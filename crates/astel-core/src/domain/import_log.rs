use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dates::lenient_datetime;

/// Which spreadsheet a bulk import carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// Registration records ("Dados Cadastrais").
    Registrations,
    /// Monthly payments ("Dados Financeiros").
    Payments,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registrations => f.write_str("cadastro"),
            Self::Payments => f.write_str("financeiro"),
        }
    }
}

/// Record of one bulk import event. Purely informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportLogEntry {
    #[serde(alias = "fileName", alias = "arquivo")]
    pub nome_arquivo: String,
    #[serde(
        alias = "importedAt",
        alias = "dataHora",
        deserialize_with = "lenient_datetime::deserialize"
    )]
    pub data_importacao: NaiveDateTime,
    #[serde(default, alias = "tipo")]
    pub kind: Option<String>,
    #[serde(default, alias = "quantidadeRegistros")]
    pub registros: Option<u64>,
}
