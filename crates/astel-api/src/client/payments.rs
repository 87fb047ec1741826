//! Payment ("Dados Financeiros") operations.

use astel_core::{ListQuery, Page, PaymentFilter, PaymentKey, PaymentRecord, PaymentRow};

use super::ApiClient;
use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpBackend, Method};
use crate::url::{payment_history_url, payment_search_url, payment_url, payments_url};

const LIST_ERROR: &str = "Erro ao buscar dados financeiros.";
const CREATE_ERROR: &str = "Erro ao criar registro financeiro.";
const UPDATE_ERROR: &str = "Erro ao atualizar registro financeiro.";
const DELETE_ERROR: &str = "Erro ao excluir registro financeiro.";
const HISTORY_ERROR: &str = "Erro ao buscar histórico de pagamentos.";

impl<B: HttpBackend> ApiClient<B> {
    pub(crate) async fn search_payments(
        &self,
        filter: &PaymentFilter,
    ) -> ApiResult<Page<PaymentRow>> {
        let url = payment_search_url(&self.root, &filter.query_params());
        self.get_page(url, filter.page(), LIST_ERROR).await
    }

    pub(crate) async fn post_payment(&self, record: &PaymentRecord) -> ApiResult<PaymentRecord> {
        let created = self
            .send_json(Method::Post, payments_url(&self.root), record, CREATE_ERROR)
            .await?;
        Ok(created.unwrap_or_else(|| record.clone()))
    }

    /// PUT `record` at the address of `key`.
    pub(crate) async fn put_payment(
        &self,
        key: &PaymentKey,
        record: &PaymentRecord,
    ) -> ApiResult<()> {
        let url = payment_url(&self.root, key);
        self.send_json::<_, serde_json::Value>(Method::Put, url, record, UPDATE_ERROR)
            .await?;
        Ok(())
    }

    pub(crate) async fn remove_payment(&self, key: &PaymentKey) -> ApiResult<()> {
        let url = payment_url(&self.root, key);
        self.execute(ApiRequest::delete(url), DELETE_ERROR).await?;
        Ok(())
    }

    pub(crate) async fn fetch_payment_history(
        &self,
        registrant_id: i64,
    ) -> ApiResult<Vec<PaymentRecord>> {
        let url = payment_history_url(&self.root, registrant_id);
        let response = self.execute(ApiRequest::get(url), HISTORY_ERROR).await?;
        let (records, _) = crate::parsing::parse_rows(&response.body)?;
        Ok(records)
    }
}
