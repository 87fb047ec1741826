//! Export request DTOs.

use super::error::{RegistryPortError, RegistryPortResult};

/// Columns offered by the registration XLSX export.
pub const REGISTRATION_EXPORT_COLUMNS: &[&str] = &[
    "matriculaSistel",
    "matriculaAstel",
    "nome",
    "cpf",
    "rg",
    "endereco",
    "logradouro",
    "numero",
    "complemento",
    "bairro",
    "cep",
    "cidade",
    "estado",
    "tipoEndereco",
    "correspondencia",
    "telefone",
    "celSkype",
    "email",
    "situacao",
    "estadoCivil",
    "nomeEsposa",
    "valorBeneficio",
    "formaPagamento",
    "ativo",
    "descontoFolha",
];

/// Columns offered by the payment XLSX export.
pub const PAYMENT_EXPORT_COLUMNS: &[&str] = &[
    "idDadosCadastrais",
    "matriculaSistel",
    "matriculaAstel",
    "nome",
    "cpf",
    "cidade",
    "estado",
    "telefone",
    "email",
    "ano",
    "mes",
    "valorPago",
    "dataPagamento",
    "inadimplente",
];

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Final path segment of the export endpoint.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub const fn extension(self) -> &'static str {
        self.endpoint()
    }
}

/// What to export and, for XLSX, which columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// camelCase field names; empty means "every column".
    pub columns: Vec<String>,
}

impl ExportRequest {
    pub const fn csv() -> Self {
        Self {
            format: ExportFormat::Csv,
            columns: Vec::new(),
        }
    }

    pub fn xlsx<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            format: ExportFormat::Xlsx,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject columns not in `allowed`, and column selection on CSV.
    pub fn validate(&self, allowed: &[&str]) -> RegistryPortResult<()> {
        if self.format == ExportFormat::Csv && !self.columns.is_empty() {
            return Err(RegistryPortError::InvalidInput {
                message: "column selection is only available for XLSX exports".to_string(),
            });
        }
        if let Some(unknown) = self.columns.iter().find(|c| !allowed.contains(&c.as_str())) {
            return Err(RegistryPortError::InvalidInput {
                message: format!("unknown export column '{unknown}'"),
            });
        }
        Ok(())
    }

    /// Selected columns as the PascalCase names the service expects.
    pub fn pascal_columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| to_pascal_case(c)).collect()
    }
}

/// `valorPago` -> `ValorPago`.
fn to_pascal_case(camel: &str) -> String {
    let mut chars = camel.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
