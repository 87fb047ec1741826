use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::dates::optional_date;

// ============================================================================
// Payment Key
// ============================================================================

/// Error returned when a payment key has an impossible month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid payment month {month} (expected 1-12)")]
pub struct InvalidPaymentKey {
    pub month: u32,
}

/// Identifies one monthly payment of one registrant.
///
/// The key is always sent to the service as three separate path segments.
/// It is never flattened into a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaymentKey {
    registrant_id: i64,
    year: i32,
    month: u32,
}

impl PaymentKey {
    /// Build a key, rejecting months outside 1..=12.
    pub const fn new(registrant_id: i64, year: i32, month: u32) -> Result<Self, InvalidPaymentKey> {
        if month == 0 || month > 12 {
            return Err(InvalidPaymentKey { month });
        }
        Ok(Self {
            registrant_id,
            year,
            month,
        })
    }

    pub const fn registrant_id(&self) -> i64 {
        self.registrant_id
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Path segments addressing this payment: `[id, ano, mes]`.
    pub fn path_segments(&self) -> [String; 3] {
        [
            self.registrant_id.to_string(),
            self.year.to_string(),
            self.month.to_string(),
        ]
    }

    /// The identifier older screens displayed: id, year and month digits
    /// glued together without padding.
    ///
    /// Not unique (`1/23/4` and `12/3/4` both give `1234`); display only.
    pub fn legacy_display_id(&self) -> String {
        format!("{}{}{}", self.registrant_id, self.year, self.month)
    }
}

impl fmt::Display for PaymentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{:02}", self.registrant_id, self.year, self.month)
    }
}

// ============================================================================
// Payment Record
// ============================================================================

/// One monthly payment ("Dados Financeiros") as written to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id_dados_cadastrais: i64,
    pub ano: i32,
    pub mes: u32,
    pub valor_pago: f64,
    #[serde(
        default,
        with = "optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_pagamento: Option<NaiveDate>,
}

impl PaymentRecord {
    /// The key addressing this record.
    pub const fn key(&self) -> Result<PaymentKey, InvalidPaymentKey> {
        PaymentKey::new(self.id_dados_cadastrais, self.ano, self.mes)
    }
}

// ============================================================================
// Payment Row
// ============================================================================

/// A row of the payment listing: one payment joined with its registrant.
///
/// The first row of a page may also carry page-wide aggregates
/// (`soma_valor_pago`, `total_registros`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRow {
    pub id: Option<i64>,
    pub id_dados_cadastrais: i64,
    pub matricula_sistel: Option<i64>,
    pub matricula_astel: Option<i64>,
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,

    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub tipo_endereco: Option<String>,
    pub correspondencia: Option<String>,
    pub cep: Option<String>,

    pub telefone: Option<String>,
    pub cel_skype: Option<String>,
    pub email: Option<String>,

    pub situacao: Option<String>,
    pub estado_civil: Option<String>,
    pub ativo: Option<bool>,

    pub ano: i32,
    pub mes: u32,
    pub valor_pago: f64,
    #[serde(with = "optional_date", skip_serializing_if = "Option::is_none")]
    pub data_pagamento: Option<NaiveDate>,
    /// Server-derived: the registrant is missing expected payments.
    pub inadimplente: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soma_valor_pago: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_registros: Option<u64>,
}

impl PaymentRow {
    pub const fn key(&self) -> Result<PaymentKey, InvalidPaymentKey> {
        PaymentKey::new(self.id_dados_cadastrais, self.ano, self.mes)
    }

    /// The writable part of the row.
    pub const fn to_record(&self) -> PaymentRecord {
        PaymentRecord {
            id_dados_cadastrais: self.id_dados_cadastrais,
            ano: self.ano,
            mes: self.mes,
            valor_pago: self.valor_pago,
            data_pagamento: self.data_pagamento,
        }
    }
}
