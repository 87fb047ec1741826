//! Registry service port trait.

use async_trait::async_trait;

use super::error::RegistryPortResult;
use super::export::ExportRequest;
use crate::domain::{
    ImportKind, ImportLogEntry, PaymentKey, PaymentRecord, PaymentRow, RegistrationRecord,
};
use crate::query::{Page, PaymentFilter, RegistrationFilter};

/// Port trait for the registration/payment service.
///
/// # Design
///
/// - Uses core-owned DTOs, not wire response types
/// - Returns `RegistryPortError` for all failures
/// - No retries; a failed call fails once
#[async_trait]
pub trait RegistryPort: Send + Sync {
    // ------------------------------------------------------------------
    // Registrations
    // ------------------------------------------------------------------

    /// One page of registrations matching `filter`.
    async fn list_registrations(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryPortResult<Page<RegistrationRecord>>;

    async fn get_registration(&self, id: i64) -> RegistryPortResult<RegistrationRecord>;

    /// Look up a registration by its ASTEL number. `None` when absent.
    async fn find_by_matricula_astel(
        &self,
        matricula_astel: i64,
    ) -> RegistryPortResult<Option<RegistrationRecord>>;

    async fn create_registration(
        &self,
        record: &RegistrationRecord,
    ) -> RegistryPortResult<RegistrationRecord>;

    async fn update_registration(
        &self,
        id: i64,
        record: &RegistrationRecord,
    ) -> RegistryPortResult<()>;

    async fn delete_registration(&self, id: i64) -> RegistryPortResult<()>;

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// One page of payment rows matching `filter`.
    async fn list_payments(&self, filter: &PaymentFilter) -> RegistryPortResult<Page<PaymentRow>>;

    async fn create_payment(&self, record: &PaymentRecord) -> RegistryPortResult<PaymentRecord>;

    /// Replace the payment addressed by `key` with `record`.
    ///
    /// `record` may carry a different year/month; `key` is always the
    /// payment's current identity.
    async fn update_payment(
        &self,
        key: &PaymentKey,
        record: &PaymentRecord,
    ) -> RegistryPortResult<()>;

    async fn delete_payment(&self, key: &PaymentKey) -> RegistryPortResult<()>;

    /// Every payment of one registrant.
    async fn payment_history(&self, registrant_id: i64) -> RegistryPortResult<Vec<PaymentRecord>>;

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Export registrations matching `filter` (paging ignored).
    async fn export_registrations(
        &self,
        filter: &RegistrationFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>>;

    /// Export payments matching `filter` (paging ignored).
    async fn export_payments(
        &self,
        filter: &PaymentFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>>;

    /// Upload a spreadsheet. Returns the service's message, if any.
    async fn import_file(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> RegistryPortResult<Option<String>>;

    async fn import_logs(&self) -> RegistryPortResult<Vec<ImportLogEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn RegistryPort>) {}
}
