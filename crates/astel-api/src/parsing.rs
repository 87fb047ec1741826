//! Parsing of service responses.
//!
//! Sync helpers that turn raw response bodies and headers into core types:
//! page totals, typed rows and best-effort error messages.

use astel_core::{HeaderTotals, PayloadTotals};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::http::ApiResponse;

/// Fallback when an error body carries nothing usable.
pub const DEFAULT_SAVE_ERROR: &str = "Erro ao salvar dados.";

// ============================================================================
// Page totals
// ============================================================================

fn header_value<T: FromStr>(response: &ApiResponse, name: &str) -> Option<T> {
    response.header(name).and_then(|v| v.trim().parse().ok())
}

/// Read the `x-*` pagination headers. Unparseable values count as absent.
pub fn header_totals(response: &ApiResponse) -> HeaderTotals {
    HeaderTotals {
        total_count: header_value(response, "x-total-count"),
        total_pages: header_value(response, "x-total-pages"),
        current_page: header_value(response, "x-current-page"),
        page_size: header_value(response, "x-page-size"),
    }
}

/// Read the aggregates the service embeds in the first row of a page.
pub fn payload_totals(rows: &[Value]) -> PayloadTotals {
    let Some(first) = rows.first() else {
        return PayloadTotals::default();
    };

    PayloadTotals {
        total_registros: first.get("totalRegistros").and_then(number_as_u64),
        soma_valor_pago: first.get("somaValorPago").and_then(number_as_f64),
    }
}

fn number_as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn number_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

// ============================================================================
// Rows
// ============================================================================

/// Parse a JSON array body into typed rows plus the raw rows' aggregates.
///
/// An empty body is an empty page.
pub fn parse_rows<T: DeserializeOwned>(body: &[u8]) -> ApiResult<(Vec<T>, PayloadTotals)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok((Vec::new(), PayloadTotals::default()));
    }

    let raw: Vec<Value> = match serde_json::from_slice(body)? {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => {
            return Err(ApiError::InvalidResponse {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            });
        }
    };

    let totals = payload_totals(&raw);
    let rows = raw
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect::<Result<Vec<T>, _>>()?;
    Ok((rows, totals))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Message returned by an import call: `message` from a JSON object, a
/// JSON string, or plain text. Blank bodies give `None`.
pub fn import_message(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let message = match serde_json::from_str::<Value>(text) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("mensagem"))
            .and_then(Value::as_str)
            .map(str::to_string)?,
        Ok(_) => return None,
        Err(_) => text.to_string(),
    };

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

// ============================================================================
// Errors
// ============================================================================

/// Shape of a validation or problem-details error body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Map<String, Value>>,
    #[serde(default)]
    message: Option<String>,
}

/// Best-effort failure message from an error body.
///
/// `errors` (an object of string arrays) is flattened and joined by
/// newlines and wins over `message`; anything else gives `default`.
pub fn error_message(body: &[u8], default: &str) -> String {
    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return default.to_string();
    };

    if let Some(errors) = parsed.errors {
        let lines: Vec<String> = errors.values().flat_map(flatten_messages).collect();
        if !lines.is_empty() {
            return lines.join("\n");
        }
    }

    parsed
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        _ => Vec::new(),
    }
}

/// Map a non-success response to an [`ApiError`].
pub fn status_error(response: &ApiResponse, url: &Url, default: &str) -> ApiError {
    let message = error_message(&response.body, default);
    match response.status {
        400 => ApiError::Validation { message },
        404 => ApiError::NotFound {
            url: url.to_string(),
            message,
        },
        409 => ApiError::Conflict { message },
        status => ApiError::RequestFailed {
            status,
            url: url.to_string(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astel_core::RegistrationRecord;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, headers: &[(&str, &str)], body: &[u8]) -> ApiResponse {
        ApiResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_header_totals() {
        let resp = response(
            200,
            &[
                ("x-total-count", "42"),
                ("x-total-pages", "5"),
                ("x-current-page", "2"),
                ("x-page-size", "10"),
            ],
            b"[]",
        );
        let totals = header_totals(&resp);
        assert_eq!(totals.total_count, Some(42));
        assert_eq!(totals.total_pages, Some(5));
        assert_eq!(totals.current_page, Some(2));
        assert_eq!(totals.page_size, Some(10));
    }

    #[test]
    fn test_header_totals_missing_or_garbage() {
        let resp = response(200, &[("x-total-count", "many")], b"[]");
        assert_eq!(header_totals(&resp), HeaderTotals::default());
    }

    #[test]
    fn test_payload_totals_from_first_row() {
        let rows = vec![
            json!({"somaValorPago": 1500.5, "totalRegistros": 31}),
            json!({"somaValorPago": 1.0, "totalRegistros": 1}),
        ];
        let totals = payload_totals(&rows);
        assert_eq!(totals.total_registros, Some(31));
        assert_eq!(totals.soma_valor_pago, Some(1500.5));
        assert_eq!(payload_totals(&[]), PayloadTotals::default());
    }

    #[test]
    fn test_parse_rows() {
        let body = serde_json::to_vec(&json!([
            {"id": 1, "nome": "Ana", "matriculaAstel": 10},
            {"id": 2, "nome": "Bruno"}
        ]))
        .unwrap();
        let (rows, totals) = parse_rows::<RegistrationRecord>(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nome.as_deref(), Some("Ana"));
        assert_eq!(totals, PayloadTotals::default());
    }

    #[test]
    fn test_parse_rows_accepts_null_matricula() {
        let body = serde_json::to_vec(&json!([
            {"id": 1, "nome": "Ana", "matriculaAstel": 10, "matriculaSistel": 2001},
            {"id": 2, "nome": "Bruno", "matriculaAstel": null, "matriculaSistel": null}
        ]))
        .unwrap();
        let (rows, _) = parse_rows::<RegistrationRecord>(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].matricula_astel, 10);
        assert_eq!(rows[1].matricula_astel, 0);
        assert_eq!(rows[1].matricula_sistel, 0);
    }

    #[test]
    fn test_parse_rows_empty_body() {
        let (rows, _) = parse_rows::<RegistrationRecord>(b"  ").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rows_rejects_object() {
        let err = parse_rows::<RegistrationRecord>(br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_error_message_prefers_errors() {
        let body = serde_json::to_vec(&json!({
            "message": "ignored",
            "errors": {"Cpf": ["CPF inválido"], "Nome": ["Nome é obrigatório", "Nome muito curto"]}
        }))
        .unwrap();
        assert_eq!(
            error_message(&body, DEFAULT_SAVE_ERROR),
            "CPF inválido\nNome é obrigatório\nNome muito curto"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_message() {
        let body = br#"{"message": "Pagamento duplicado"}"#;
        assert_eq!(error_message(body, DEFAULT_SAVE_ERROR), "Pagamento duplicado");
    }

    #[test]
    fn test_error_message_default() {
        assert_eq!(error_message(b"<html>", "Falhou"), "Falhou");
        assert_eq!(error_message(b"{}", "Falhou"), "Falhou");
        assert_eq!(error_message(br#"{"errors": {}}"#, "Falhou"), "Falhou");
    }

    #[test]
    fn test_status_error_mapping() {
        let url = Url::parse("http://localhost:5000/api/DadosFinanceiros").unwrap();

        let err = status_error(&response(409, &[], r#"{"message": "Já existe"}"#.as_bytes()), &url, "x");
        assert!(matches!(err, ApiError::Conflict { ref message } if message == "Já existe"));

        let err = status_error(&response(404, &[], b""), &url, "x");
        assert!(matches!(err, ApiError::NotFound { .. }));

        let err = status_error(&response(400, &[], r#"{"errors": {"Mes": ["Mês inválido"]}}"#.as_bytes()), &url, "x");
        assert!(matches!(err, ApiError::Validation { ref message } if message == "Mês inválido"));

        let err = status_error(&response(500, &[], b""), &url, "Erro interno");
        assert!(matches!(err, ApiError::RequestFailed { status: 500, .. }));
    }

    #[test]
    fn test_import_message() {
        assert_eq!(
            import_message(br#"{"message": "120 registros importados"}"#).as_deref(),
            Some("120 registros importados")
        );
        assert_eq!(import_message(b"\"ok\"").as_deref(), Some("ok"));
        assert_eq!(import_message(b"Importado").as_deref(), Some("Importado"));
        assert_eq!(import_message(b""), None);
    }
}
