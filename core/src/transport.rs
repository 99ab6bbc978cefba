//! HTTP transport boundary: plain-data requests executed through reqwest.
//!
//! # Design
//! Requests and responses are described as plain data so the framework's
//! request-building logic stays independent of the HTTP library. `Transport`
//! is the only place that touches the network; everything above it shapes
//! `ApiRequest` values. Write operations all carry the same fixed JSON
//! content-type header.

use crate::error::{ApiError, ApiResult};

/// Content-type header attached to every write operation.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// `path` is relative to the transport's base URL (e.g. `api/heroes/3`).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            headers: write_headers(),
            body: Some(body),
        }
    }

    pub fn put(path: String, body: String) -> Self {
        Self {
            method: HttpMethod::Put,
            path,
            headers: write_headers(),
            body: Some(body),
        }
    }

    pub fn delete(path: String) -> Self {
        Self {
            method: HttpMethod::Delete,
            path,
            headers: write_headers(),
            body: None,
        }
    }
}

fn write_headers() -> Vec<(String, String)> {
    vec![(
        JSON_CONTENT_TYPE.0.to_string(),
        JSON_CONTENT_TYPE.1.to_string(),
    )]
}

/// An HTTP response reduced to what response parsing needs.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Executes `ApiRequest` values against a backend.
///
/// Holds a shared `reqwest::Client` and a normalized base URL; cloning is
/// cheap and every clone reuses the same connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Performs the HTTP round-trip. Non-2xx statuses are returned as data;
    /// only transport-level failures (connection, DNS, ...) are errors here.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(%url, status, "request completed");
        Ok(ApiResponse { status, body })
    }
}
