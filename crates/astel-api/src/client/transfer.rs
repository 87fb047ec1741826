//! Spreadsheet export and import.

use astel_core::{ExportFormat, ImportKind, ImportLogEntry, QueryParams};

use super::ApiClient;
use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpBackend, Method, RequestBody};
use crate::parsing::import_message;
use crate::url::{export_url, import_logs_url, import_url};

const EXPORT_ERROR: &str = "Erro ao exportar arquivo.";
const IMPORT_ERROR: &str = "Erro ao importar arquivo.";
const LOGS_ERROR: &str = "Erro ao buscar histórico de importações.";

/// Multipart field carrying the uploaded spreadsheet.
const FILE_FIELD: &str = "file";

impl<B: HttpBackend> ApiClient<B> {
    /// Download an export of `resource` as raw bytes.
    ///
    /// `columns` must already be in the service's PascalCase form.
    pub(crate) async fn download_export(
        &self,
        resource: &str,
        format: ExportFormat,
        filter: QueryParams,
        columns: &[String],
    ) -> ApiResult<Vec<u8>> {
        let url = export_url(&self.root, resource, format, filter, columns);
        let response = self.execute(ApiRequest::get(url), EXPORT_ERROR).await?;
        tracing::debug!(resource, bytes = response.body.len(), "export downloaded");
        Ok(response.body)
    }

    pub(crate) async fn upload_import(
        &self,
        kind: ImportKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ApiResult<Option<String>> {
        let request = ApiRequest {
            method: Method::Post,
            url: import_url(&self.root, kind),
            body: RequestBody::Multipart {
                field: FILE_FIELD,
                file_name: file_name.to_string(),
                contents,
            },
        };
        let response = self.execute(request, IMPORT_ERROR).await?;
        Ok(import_message(&response.body))
    }

    pub(crate) async fn fetch_import_logs(&self) -> ApiResult<Vec<ImportLogEntry>> {
        let response = self
            .execute(ApiRequest::get(import_logs_url(&self.root)), LOGS_ERROR)
            .await?;
        let (entries, _) = crate::parsing::parse_rows(&response.body)?;
        Ok(entries)
    }
}
