//! HTTP backend abstraction for the service.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest. Requests are never retried.

use crate::error::ApiResult;
use crate::config::ApiClientConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

// ============================================================================
// Request / Response
// ============================================================================

/// HTTP verbs used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// A single file part.
    Multipart {
        field: &'static str,
        file_name: String,
        contents: Vec<u8>,
    },
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: RequestBody,
}

impl ApiRequest {
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            body: RequestBody::Empty,
        }
    }

    pub const fn delete(url: Url) -> Self {
        Self {
            method: Method::Delete,
            url,
            body: RequestBody::Empty,
        }
    }

    pub const fn json(method: Method, url: Url, body: serde_json::Value) -> Self {
        Self {
            method,
            url,
            body: RequestBody::Json(body),
        }
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends.
///
/// A backend returns every response it receives, successful or not; status
/// interpretation belongs to the client. Only transport failures are errors.
///
/// This is an implementation detail - external code should use the port traits.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// This is an implementation detail - external code should use `DefaultApiClient`
/// and interact with it through the port traits.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    fn build_request(&self, request: ApiRequest) -> reqwest::RequestBuilder {
        let builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
            Method::Put => self.client.put(request.url),
            Method::Delete => self.client.delete(request.url),
        };

        match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart {
                field,
                file_name,
                contents,
            } => {
                let part = reqwest::multipart::Part::bytes(contents).file_name(file_name);
                builder.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = request.method;
        let url = request.url.to_string();
        tracing::debug!(?method, %url, "sending request");

        let response = self.build_request(request).send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(?method, %url, status, bytes = body.len(), "received response");
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
