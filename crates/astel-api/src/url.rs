//! URL construction helpers for the service.
//!
//! Every endpoint lives under `{base}/api`. Path segments are appended one
//! by one so ids are percent-encoded and never concatenated.

use crate::error::{ApiError, ApiResult};
use astel_core::{ExportFormat, ImportKind, PaymentKey, QueryParams};
use url::Url;

pub const REGISTRATIONS: &str = "DadosCadastrais";
pub const PAYMENTS: &str = "DadosFinanceiros";
pub const IMPORT: &str = "Import";

/// Resolve the `/api` root from a configured base URL.
///
/// A trailing slash or an explicit `/api` suffix is tolerated; query and
/// fragment are dropped.
pub fn api_root(base_url: &str) -> ApiResult<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
        });
    }

    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().trim_end_matches('/').to_string();
    if path.ends_with("/api") {
        url.set_path(&path);
    } else {
        url.set_path(&format!("{path}/api"));
    }
    Ok(url)
}

/// Append `segments` to the root and attach `params` as the query string.
pub fn endpoint<S: AsRef<str>>(root: &Url, segments: &[S], params: Option<&QueryParams>) -> Url {
    let mut url = root.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment.as_ref());
        }
    }

    match params {
        Some(params) if !params.is_empty() => url.set_query(Some(&params.to_query_string())),
        _ => url.set_query(None),
    }
    url
}

// ============================================================================
// Registrations
// ============================================================================

pub fn registrations_url(root: &Url, params: Option<&QueryParams>) -> Url {
    endpoint(root, &[REGISTRATIONS], params)
}

pub fn registration_url(root: &Url, id: i64) -> Url {
    endpoint(root, &[REGISTRATIONS.to_string(), id.to_string()], None)
}

pub fn by_matricula_url(root: &Url, matricula_astel: i64) -> Url {
    endpoint(
        root,
        &[
            REGISTRATIONS.to_string(),
            "matriculaAstel".to_string(),
            matricula_astel.to_string(),
        ],
        None,
    )
}

pub fn autocomplete_url(root: &Url, term: &str, limit: u32) -> Url {
    let mut params = QueryParams::new();
    params.push_text("termo", Some(term)).push("limit", limit);
    endpoint(root, &[REGISTRATIONS, "autocomplete"], Some(&params))
}

// ============================================================================
// Payments
// ============================================================================

pub fn payments_url(root: &Url) -> Url {
    endpoint::<&str>(root, &[PAYMENTS], None)
}

pub fn payment_search_url(root: &Url, params: &QueryParams) -> Url {
    endpoint(root, &[PAYMENTS, "filtrar"], Some(params))
}

/// `/DadosFinanceiros/{id}/{ano}/{mes}`.
pub fn payment_url(root: &Url, key: &PaymentKey) -> Url {
    let [id, year, month] = key.path_segments();
    endpoint(root, &[PAYMENTS.to_string(), id, year, month], None)
}

pub fn payment_history_url(root: &Url, registrant_id: i64) -> Url {
    endpoint(
        root,
        &[
            PAYMENTS.to_string(),
            "historico".to_string(),
            registrant_id.to_string(),
        ],
        None,
    )
}

// ============================================================================
// Export / import
// ============================================================================

/// Export URL for `resource` with filter parameters and repeated `colunas`.
pub fn export_url(
    root: &Url,
    resource: &str,
    format: ExportFormat,
    filter: QueryParams,
    columns: &[String],
) -> Url {
    let mut params = filter;
    for column in columns {
        params.push("colunas", column);
    }
    endpoint(root, &[resource, "export", format.endpoint()], Some(&params))
}

pub const fn import_action(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Registrations => "import",
        ImportKind::Payments => "importFinanceiro",
    }
}

pub fn import_url(root: &Url, kind: ImportKind) -> Url {
    endpoint::<&str>(root, &[IMPORT, import_action(kind)], None)
}

pub fn import_logs_url(root: &Url) -> Url {
    endpoint::<&str>(root, &[IMPORT, "logs"], None)
}
