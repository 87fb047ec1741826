//! Port trait implementations for `ApiClient`.
//!
//! This module implements the core-owned `RegistryPort` and
//! `AutocompleteLookup` traits, mapping internal errors to
//! `RegistryPortError` at the boundary.

use async_trait::async_trait;
use astel_core::{
    AutocompleteItem, AutocompleteLookup, ExportRequest, ImportKind, ImportLogEntry, ListQuery,
    Page, PaymentFilter, PaymentKey, PaymentRecord, PaymentRow, RegistrationFilter,
    RegistrationRecord, RegistryPort, RegistryPortError, RegistryPortResult,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpBackend;
use crate::url::{PAYMENTS, REGISTRATIONS};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ApiError` to core `RegistryPortError`.
pub(crate) fn map_error(err: ApiError) -> RegistryPortError {
    match err {
        ApiError::NotFound { url, .. } => RegistryPortError::NotFound {
            resource: resource_from_url(&url),
        },
        ApiError::Conflict { message } => RegistryPortError::Conflict { message },
        ApiError::Validation { message } => RegistryPortError::Validation { message },
        ApiError::RequestFailed {
            status, message, ..
        } => RegistryPortError::Request { status, message },
        ApiError::InvalidResponse { message } => RegistryPortError::InvalidResponse { message },
        ApiError::InvalidBaseUrl { url } => RegistryPortError::Configuration {
            message: format!("invalid base URL '{url}'"),
        },
        ApiError::InvalidUrl(e) => RegistryPortError::Configuration {
            message: e.to_string(),
        },
        ApiError::Network(e) => RegistryPortError::Network {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => RegistryPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

/// The part of a request URL after `/api/`, e.g. `DadosFinanceiros/12/2024/3`.
fn resource_from_url(url: &str) -> String {
    url.find("/api/")
        .map_or(url, |pos| &url[pos + 5..])
        .to_string()
}

// ============================================================================
// RegistryPort
// ============================================================================

#[async_trait]
impl<B: HttpBackend> RegistryPort for ApiClient<B> {
    async fn list_registrations(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryPortResult<Page<RegistrationRecord>> {
        self.search_registrations(filter).await.map_err(map_error)
    }

    async fn get_registration(&self, id: i64) -> RegistryPortResult<RegistrationRecord> {
        self.fetch_registration(id).await.map_err(map_error)
    }

    async fn find_by_matricula_astel(
        &self,
        matricula_astel: i64,
    ) -> RegistryPortResult<Option<RegistrationRecord>> {
        self.fetch_by_matricula_astel(matricula_astel)
            .await
            .map_err(map_error)
    }

    async fn create_registration(
        &self,
        record: &RegistrationRecord,
    ) -> RegistryPortResult<RegistrationRecord> {
        self.post_registration(record).await.map_err(map_error)
    }

    async fn update_registration(
        &self,
        id: i64,
        record: &RegistrationRecord,
    ) -> RegistryPortResult<()> {
        self.put_registration(id, record).await.map_err(map_error)
    }

    async fn delete_registration(&self, id: i64) -> RegistryPortResult<()> {
        self.remove_registration(id).await.map_err(map_error)
    }

    async fn list_payments(&self, filter: &PaymentFilter) -> RegistryPortResult<Page<PaymentRow>> {
        self.search_payments(filter).await.map_err(map_error)
    }

    async fn create_payment(&self, record: &PaymentRecord) -> RegistryPortResult<PaymentRecord> {
        self.post_payment(record).await.map_err(map_error)
    }

    async fn update_payment(
        &self,
        key: &PaymentKey,
        record: &PaymentRecord,
    ) -> RegistryPortResult<()> {
        self.put_payment(key, record).await.map_err(map_error)
    }

    async fn delete_payment(&self, key: &PaymentKey) -> RegistryPortResult<()> {
        self.remove_payment(key).await.map_err(map_error)
    }

    async fn payment_history(&self, registrant_id: i64) -> RegistryPortResult<Vec<PaymentRecord>> {
        self.fetch_payment_history(registrant_id)
            .await
            .map_err(map_error)
    }

    async fn export_registrations(
        &self,
        filter: &RegistrationFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>> {
        self.download_export(
            REGISTRATIONS,
            request.format,
            filter.filter_params(),
            &request.pascal_columns(),
        )
        .await
        .map_err(map_error)
    }

    async fn export_payments(
        &self,
        filter: &PaymentFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>> {
        self.download_export(
            PAYMENTS,
            request.format,
            filter.filter_params(),
            &request.pascal_columns(),
        )
        .await
        .map_err(map_error)
    }

    async fn import_file(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> RegistryPortResult<Option<String>> {
        self.upload_import(kind, file_name, contents)
            .await
            .map_err(map_error)
    }

    async fn import_logs(&self) -> RegistryPortResult<Vec<ImportLogEntry>> {
        self.fetch_import_logs().await.map_err(map_error)
    }
}

// ============================================================================
// AutocompleteLookup
// ============================================================================

#[async_trait]
impl<B: HttpBackend> AutocompleteLookup for ApiClient<B> {
    async fn lookup(&self, term: &str, limit: u32) -> RegistryPortResult<Vec<AutocompleteItem>> {
        self.autocomplete(term, limit).await.map_err(map_error)
    }
}
