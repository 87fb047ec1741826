//! Client for the registration and payments service.
//!
//! Operations are grouped by resource in submodules; this module owns
//! construction and the request helpers they share.

mod payments;
mod registrations;
mod transfer;

use astel_core::{Page, PageMeta, PageRequest, RegistryPortResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiRequest, ApiResponse, HttpBackend, Method, ReqwestBackend};
use crate::parsing::{header_totals, parse_rows, status_error};
use crate::port::map_error;
use crate::url::api_root;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultApiClient = ApiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the registration and payments REST service.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultApiClient` for production code and hold it through the core
/// port traits.
pub struct ApiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) root: Url,
}

impl DefaultApiClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the base URL is unusable or the HTTP client cannot be
    /// built.
    pub fn new(config: &ApiClientConfig) -> RegistryPortResult<Self> {
        let root = api_root(config.base_url()).map_err(map_error)?;
        let backend = ReqwestBackend::new(config).map_err(map_error)?;
        tracing::debug!(root = %root, "service client ready");
        Ok(Self { backend, root })
    }

    /// Create a new client with default configuration.
    pub fn default_client() -> RegistryPortResult<Self> {
        Self::new(&ApiClientConfig::default())
    }
}

impl<B: HttpBackend> ApiClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(root: Url, backend: B) -> Self {
        Self { backend, root }
    }

    /// Send `request`, turning any non-success status into an error whose
    /// message falls back to `default_error`.
    pub(crate) async fn execute(
        &self,
        request: ApiRequest,
        default_error: &str,
    ) -> ApiResult<ApiResponse> {
        let url = request.url.clone();
        let method = request.method;
        let response = self.backend.send(request).await?;

        if response.is_success() {
            return Ok(response);
        }

        let err = status_error(&response, &url, default_error);
        tracing::warn!(?method, %url, status = response.status, error = %err, "request failed");
        Err(err)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        default_error: &str,
    ) -> ApiResult<T> {
        self.execute(ApiRequest::get(url), default_error)
            .await?
            .json()
    }

    /// Fetch one page of a list endpoint and resolve its metadata.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        request: PageRequest,
        default_error: &str,
    ) -> ApiResult<Page<T>> {
        let response = self.execute(ApiRequest::get(url), default_error).await?;
        let (items, payload) = parse_rows(&response.body)?;
        let meta = PageMeta::resolve(request, header_totals(&response), payload);
        tracing::debug!(
            items = items.len(),
            total = meta.total_count,
            page = meta.current_page,
            pages = meta.total_pages,
            "page fetched"
        );
        Ok(Page { items, meta })
    }

    /// Send `body` as JSON and parse the reply, or return `None` for an
    /// empty reply.
    pub(crate) async fn send_json<S, T>(
        &self,
        method: Method,
        url: Url,
        body: &S,
        default_error: &str,
    ) -> ApiResult<Option<T>>
    where
        S: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)?;
        let response = self
            .execute(ApiRequest::json(method, url, payload), default_error)
            .await?;

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        response.json().map(Some)
    }
}

/// `Ok(None)` for a 404, the value otherwise.
pub(crate) fn none_if_not_found<T>(result: ApiResult<T>) -> ApiResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ApiError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use astel_core::RegistrationRecord;
    use serde_json::json;

    pub fn test_root() -> Url {
        api_root("http://localhost:5000").unwrap()
    }

    pub fn client(backend: FakeBackend) -> ApiClient<FakeBackend> {
        ApiClient::with_backend(test_root(), backend)
    }

    #[test]
    fn test_default_client_creation() {
        let client = DefaultApiClient::new(&ApiClientConfig::new()).unwrap();
        assert_eq!(client.root.as_str(), "http://localhost:5000/api");
    }

    #[test]
    fn test_bad_base_url_is_configuration_error() {
        let config = ApiClientConfig::new().with_base_url("::nope::");
        let err = DefaultApiClient::new(&config).err().unwrap();
        assert!(matches!(
            err,
            astel_core::RegistryPortError::Configuration { .. }
        ));
    }

    #[tokio::test]
    async fn test_execute_maps_status() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "DadosCadastrais/1",
            CannedResponse::error(500, json!({"message": "Erro interno"})),
        );
        let client = client(backend);
        let url = crate::url::registration_url(&test_root(), 1);

        let err = client
            .execute(ApiRequest::get(url), "fallback")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: 500, ref message, .. } if message == "Erro interno"));
    }

    #[tokio::test]
    async fn test_get_page_with_headers() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "DadosCadastrais",
            CannedResponse::json(json!([{"id": 1, "nome": "Ana"}]))
                .with_header("X-Total-Count", "11")
                .with_header("X-Total-Pages", "2")
                .with_header("X-Current-Page", "2")
                .with_header("X-Page-Size", "10"),
        );
        let client = client(backend);
        let url = crate::url::registrations_url(&test_root(), None);

        let page: Page<RegistrationRecord> = client
            .get_page(url, PageRequest::new(2, 10), "fallback")
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.meta.total_count, 11);
        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.meta.current_page, 2);
        assert!(page.meta.has_previous());
        assert!(!page.meta.has_next());
    }

    #[tokio::test]
    async fn test_get_page_without_headers_uses_defaults() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "DadosCadastrais",
            CannedResponse::json(json!([])),
        );
        let client = client(backend);
        let url = crate::url::registrations_url(&test_root(), None);

        let page: Page<RegistrationRecord> = client
            .get_page(url, PageRequest::default(), "fallback")
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.meta.total_count, 0);
        assert_eq!(page.meta.total_pages, 1);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.page_size, 10);
    }

    #[test]
    fn test_none_if_not_found() {
        let missing: ApiResult<u8> = Err(ApiError::NotFound {
            url: "x".to_string(),
            message: "y".to_string(),
        });
        assert!(none_if_not_found(missing).unwrap().is_none());
        assert_eq!(none_if_not_found(Ok(3)).unwrap(), Some(3));
    }
}
