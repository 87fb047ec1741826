//! Registration ("Dados Cadastrais") operations.

use astel_core::{AutocompleteItem, ListQuery, Page, RegistrationFilter, RegistrationRecord};

use super::{ApiClient, none_if_not_found};
use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpBackend, Method};
use crate::parsing::DEFAULT_SAVE_ERROR;
use crate::url::{
    autocomplete_url, by_matricula_url, registration_url, registrations_url,
};

const LIST_ERROR: &str = "Erro ao buscar dados cadastrais.";
const DELETE_ERROR: &str = "Erro ao excluir registro.";
const AUTOCOMPLETE_ERROR: &str = "Erro ao buscar autocomplete";

impl<B: HttpBackend> ApiClient<B> {
    pub(crate) async fn search_registrations(
        &self,
        filter: &RegistrationFilter,
    ) -> ApiResult<Page<RegistrationRecord>> {
        let url = registrations_url(&self.root, Some(&filter.query_params()));
        self.get_page(url, filter.page(), LIST_ERROR).await
    }

    pub(crate) async fn fetch_registration(&self, id: i64) -> ApiResult<RegistrationRecord> {
        self.get_json(registration_url(&self.root, id), LIST_ERROR)
            .await
    }

    pub(crate) async fn fetch_by_matricula_astel(
        &self,
        matricula_astel: i64,
    ) -> ApiResult<Option<RegistrationRecord>> {
        let url = by_matricula_url(&self.root, matricula_astel);
        none_if_not_found(self.get_json(url, LIST_ERROR).await)
    }

    /// POST a new registration. The service echoes the stored record; an
    /// empty reply returns `record` unchanged.
    pub(crate) async fn post_registration(
        &self,
        record: &RegistrationRecord,
    ) -> ApiResult<RegistrationRecord> {
        let url = registrations_url(&self.root, None);
        let created = self
            .send_json(Method::Post, url, record, DEFAULT_SAVE_ERROR)
            .await?;
        Ok(created.unwrap_or_else(|| record.clone()))
    }

    pub(crate) async fn put_registration(
        &self,
        id: i64,
        record: &RegistrationRecord,
    ) -> ApiResult<()> {
        let url = registration_url(&self.root, id);
        self.send_json::<_, serde_json::Value>(Method::Put, url, record, DEFAULT_SAVE_ERROR)
            .await?;
        Ok(())
    }

    pub(crate) async fn remove_registration(&self, id: i64) -> ApiResult<()> {
        let url = registration_url(&self.root, id);
        self.execute(ApiRequest::delete(url), DELETE_ERROR).await?;
        Ok(())
    }

    pub(crate) async fn autocomplete(
        &self,
        term: &str,
        limit: u32,
    ) -> ApiResult<Vec<AutocompleteItem>> {
        let url = autocomplete_url(&self.root, term, limit);
        self.get_json(url, AUTOCOMPLETE_ERROR).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::client;
    use super::*;
    use crate::error::ApiError;
    use crate::http::RequestBody;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use astel_core::PageRequest;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_sends_filter_then_paging() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "DadosCadastrais",
            CannedResponse::json(json!([])),
        );
        let client = client(backend.clone());

        let filter = RegistrationFilter {
            nome: Some("Silva".to_string()),
            cpf: Some("   ".to_string()),
            page: PageRequest::new(2, 10),
            ..Default::default()
        };
        client.search_registrations(&filter).await.unwrap();

        assert_eq!(
            backend.single_url(),
            "http://localhost:5000/api/DadosCadastrais?nome=Silva&pageNumber=2&pageSize=10"
        );
    }

    #[tokio::test]
    async fn test_by_matricula_not_found_is_none() {
        let client = client(FakeBackend::new());
        let found = client.fetch_by_matricula_astel(999).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_by_matricula_found() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "matriculaAstel/77",
            CannedResponse::json(json!({"id": 5, "nome": "Carla", "matriculaAstel": 77})),
        );
        let found = client(backend).fetch_by_matricula_astel(77).await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(5));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "DadosCadastrais",
            CannedResponse::json(json!({"id": 10, "nome": "Novo"})),
        );
        let client = client(backend.clone());
        let record = RegistrationRecord {
            nome: Some("Novo".to_string()),
            ..Default::default()
        };

        let created = client.post_registration(&record).await.unwrap();
        assert_eq!(created.id, 10);

        let requests = backend.requests();
        match &requests[0].body {
            RequestBody::Json(body) => assert_eq!(body["nome"], "Novo"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_validation_errors_are_flattened() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "DadosCadastrais",
            CannedResponse::error(
                400,
                json!({"errors": {"Cpf": ["CPF inválido"], "Nome": ["Nome é obrigatório"]}}),
            ),
        );
        let err = client(backend)
            .post_registration(&RegistrationRecord::default())
            .await
            .unwrap_err();
        match err {
            ApiError::Validation { message } => {
                assert_eq!(message, "CPF inválido\nNome é obrigatório");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_with_empty_reply() {
        let backend =
            FakeBackend::new().with_response(Method::Put, "DadosCadastrais/3", CannedResponse::empty(204));
        let client = client(backend.clone());
        client
            .put_registration(3, &RegistrationRecord::default())
            .await
            .unwrap();
        assert_eq!(
            backend.single_url(),
            "http://localhost:5000/api/DadosCadastrais/3"
        );
    }

    #[tokio::test]
    async fn test_autocomplete() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "autocomplete",
            CannedResponse::json(json!([
                {"id": 1, "nome": "João Silva", "matriculaAstel": 12},
                {"id": 2, "nome": "Joana Souza", "matriculaAstel": null}
            ])),
        );
        let client = client(backend.clone());

        let items = client.autocomplete("Jo", 10).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].matricula_astel, None);
        assert!(backend.single_url().ends_with("autocomplete?termo=Jo&limit=10"));
    }
}
