use chrono::NaiveDate;

use super::page::PageRequest;
use super::params::QueryParams;
use crate::domain::PaymentMethod;

/// A filter that can be sent to a paginated list endpoint.
pub trait ListQuery {
    /// Filter predicates only, as used by the export endpoints.
    fn filter_params(&self) -> QueryParams;

    /// The page this query asks for.
    fn page(&self) -> PageRequest;

    /// Filter predicates followed by `pageNumber` and `pageSize`.
    fn query_params(&self) -> QueryParams {
        let page = self.page();
        let mut params = self.filter_params();
        params
            .push("pageNumber", page.page_number)
            .push("pageSize", page.page_size);
        params
    }

    fn to_query_string(&self) -> String {
        self.query_params().to_query_string()
    }
}

/// Filter for the registration listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationFilter {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    /// Zero is treated as "not set".
    pub matricula_astel: Option<i64>,
    pub forma_pagamento: Option<PaymentMethod>,
    pub ativo: Option<bool>,
    pub page: PageRequest,
}

impl ListQuery for RegistrationFilter {
    fn filter_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_text("nome", self.nome.as_deref())
            .push_text("cpf", self.cpf.as_deref())
            .push_opt("matriculaAstel", self.matricula_astel.filter(|m| *m != 0))
            .push_opt("formapagamento", self.forma_pagamento.as_ref())
            .push_opt("ativo", self.ativo);
        params
    }

    fn page(&self) -> PageRequest {
        self.page
    }
}

/// Filter for the payment listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    /// Zero is treated as "not set".
    pub matricula_astel: Option<i64>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub inadimplente: Option<bool>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub page: PageRequest,
}

impl ListQuery for PaymentFilter {
    fn filter_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_text("nome", self.nome.as_deref())
            .push_text("cpf", self.cpf.as_deref())
            .push_opt("matriculaAstel", self.matricula_astel.filter(|m| *m != 0))
            .push_opt("dataInicio", self.data_inicio.map(iso_date))
            .push_opt("dataFim", self.data_fim.map(iso_date))
            .push_opt("inadimplente", self.inadimplente)
            .push_text("cidade", self.cidade.as_deref())
            .push_text("estado", self.estado.as_deref())
            .push_text("email", self.email.as_deref())
            .push_text("telefone", self.telefone.as_deref());
        params
    }

    fn page(&self) -> PageRequest {
        self.page
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
