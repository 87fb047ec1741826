//! Registry service: the operations the UI exposes, over [`RegistryPort`].

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    ImportKind, ImportLogEntry, PaymentKey, PaymentRecord, PaymentRow, RegistrationRecord,
};
use crate::ports::{
    ExportRequest, PAYMENT_EXPORT_COLUMNS, REGISTRATION_EXPORT_COLUMNS, RegistryPort,
    RegistryPortError, RegistryPortResult,
};
use crate::query::{Page, PaymentFilter, RegistrationFilter};

/// A payment to record for the registrant holding an ASTEL number.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub matricula_astel: i64,
    pub ano: i32,
    pub mes: u32,
    pub valor_pago: f64,
    pub data_pagamento: Option<NaiveDate>,
}

/// Edits to an existing payment. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentChange {
    pub ano: Option<i32>,
    pub mes: Option<u32>,
    pub valor_pago: Option<f64>,
    pub data_pagamento: Option<NaiveDate>,
}

/// Facade over the registry port.
#[derive(Clone)]
pub struct RegistryService {
    port: Arc<dyn RegistryPort>,
}

impl RegistryService {
    pub fn new(port: Arc<dyn RegistryPort>) -> Self {
        Self { port }
    }

    // ------------------------------------------------------------------
    // Registrations
    // ------------------------------------------------------------------

    pub async fn list_registrations(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryPortResult<Page<RegistrationRecord>> {
        self.port.list_registrations(filter).await
    }

    pub async fn get_registration(&self, id: i64) -> RegistryPortResult<RegistrationRecord> {
        self.port.get_registration(id).await
    }

    pub async fn create_registration(
        &self,
        record: RegistrationRecord,
    ) -> RegistryPortResult<RegistrationRecord> {
        let record = record.normalized();
        self.port.create_registration(&record).await
    }

    pub async fn update_registration(
        &self,
        id: i64,
        record: RegistrationRecord,
    ) -> RegistryPortResult<()> {
        let record = RegistrationRecord { id, ..record }.normalized();
        self.port.update_registration(id, &record).await
    }

    pub async fn delete_registration(&self, id: i64) -> RegistryPortResult<()> {
        self.port.delete_registration(id).await
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    pub async fn list_payments(
        &self,
        filter: &PaymentFilter,
    ) -> RegistryPortResult<Page<PaymentRow>> {
        self.port.list_payments(filter).await
    }

    /// Record a payment for the registrant with the given ASTEL number.
    pub async fn add_payment(&self, payment: NewPayment) -> RegistryPortResult<PaymentRecord> {
        if payment.matricula_astel <= 0 {
            return Err(RegistryPortError::InvalidInput {
                message: "an ASTEL registration number is required".to_string(),
            });
        }

        let registration = self
            .port
            .find_by_matricula_astel(payment.matricula_astel)
            .await?
            .ok_or_else(|| RegistryPortError::NotFound {
                resource: format!("registration with ASTEL number {}", payment.matricula_astel),
            })?;

        let record = PaymentRecord {
            id_dados_cadastrais: registration.id,
            ano: payment.ano,
            mes: payment.mes,
            valor_pago: payment.valor_pago,
            data_pagamento: payment.data_pagamento,
        };
        validate_payment(&record)?;

        tracing::debug!(
            registrant = registration.id,
            key = %record.key()?,
            "creating payment"
        );
        self.port.create_payment(&record).await
    }

    /// Apply `change` to the payment currently addressed by `key`.
    ///
    /// The request is addressed by the old key even when the year or month
    /// changes; the new values travel in the body.
    pub async fn update_payment(
        &self,
        key: PaymentKey,
        current: Option<&PaymentRecord>,
        change: PaymentChange,
    ) -> RegistryPortResult<PaymentRecord> {
        let base = match current {
            Some(record) => record.clone(),
            None => self.find_payment(key).await?,
        };

        let updated = PaymentRecord {
            id_dados_cadastrais: key.registrant_id(),
            ano: change.ano.unwrap_or(base.ano),
            mes: change.mes.unwrap_or(base.mes),
            valor_pago: change.valor_pago.unwrap_or(base.valor_pago),
            data_pagamento: change.data_pagamento.or(base.data_pagamento),
        };
        validate_payment(&updated)?;

        self.port.update_payment(&key, &updated).await?;
        Ok(updated)
    }

    pub async fn delete_payment(&self, key: PaymentKey) -> RegistryPortResult<()> {
        self.port.delete_payment(&key).await
    }

    pub async fn payment_history(&self, registrant_id: i64) -> RegistryPortResult<Vec<PaymentRecord>> {
        self.port.payment_history(registrant_id).await
    }

    async fn find_payment(&self, key: PaymentKey) -> RegistryPortResult<PaymentRecord> {
        self.port
            .payment_history(key.registrant_id())
            .await?
            .into_iter()
            .find(|p| p.ano == key.year() && p.mes == key.month())
            .ok_or_else(|| RegistryPortError::NotFound {
                resource: format!("payment {key}"),
            })
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    pub async fn export_registrations(
        &self,
        filter: &RegistrationFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>> {
        request.validate(REGISTRATION_EXPORT_COLUMNS)?;
        self.port.export_registrations(filter, request).await
    }

    pub async fn export_payments(
        &self,
        filter: &PaymentFilter,
        request: &ExportRequest,
    ) -> RegistryPortResult<Vec<u8>> {
        request.validate(PAYMENT_EXPORT_COLUMNS)?;
        self.port.export_payments(filter, request).await
    }

    pub async fn import_file(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> RegistryPortResult<Option<String>> {
        if contents.is_empty() {
            return Err(RegistryPortError::InvalidInput {
                message: format!("'{file_name}' is empty"),
            });
        }
        tracing::info!(%kind, file_name, bytes = contents.len(), "uploading import");
        self.port.import_file(kind, file_name, contents).await
    }

    pub async fn import_logs(&self) -> RegistryPortResult<Vec<ImportLogEntry>> {
        self.port.import_logs().await
    }
}

fn validate_payment(record: &PaymentRecord) -> RegistryPortResult<()> {
    record.key()?;
    if !record.valor_pago.is_finite() || record.valor_pago < 0.0 {
        return Err(RegistryPortError::InvalidInput {
            message: format!("invalid amount {}", record.valor_pago),
        });
    }
    Ok(())
}
