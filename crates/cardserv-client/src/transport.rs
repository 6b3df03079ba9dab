// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request transport.
//
// The client speaks to the server through the `Transport` trait.  The real
// implementation is `HttpTransport` (reqwest over mutual TLS); tests plug in
// `MockTransport` instead.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use cardserv_core::error::{CardServicesError, Result};
use cardserv_security::ClientCertificate;

/// Every resource path lives under this prefix.
pub const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Header carrying the integrator's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A request relative to the API prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments, unescaped.  Identifiers are escaped by the transport.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(segments: &[&str]) -> Self {
        Self {
            method: Method::Get,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(segments: &[&str], body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Slash-joined path, used for logging and routing.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the server's answer.
///
/// Implementations only fail for transport-level problems; HTTP error
/// statuses come back as an `ApiResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// HTTPS transport presenting a client certificate on every connection.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(
        base_url: Url,
        api_key: &SecretString,
        certificate: &ClientCertificate,
    ) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
            CardServicesError::Transport("API key contains characters not allowed in a header".into())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .use_native_tls()
            .identity(certificate.identity().clone())
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                CardServicesError::Transport(format!("failed to create HTTP client: {}", error_chain(&e)))
            })?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CardServicesError::Transport(format!("server URL cannot carry a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(&request.segments);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CardServicesError::Transport(error_chain(&e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CardServicesError::Transport(format!("reading response body: {}", error_chain(&e))))?;

        debug!(status, len = body.len(), "response received");
        Ok(ApiResponse { status, body })
    }
}

/// Flatten an error and its sources into one line.  reqwest keeps the useful
/// detail (DNS failure, TLS alert) in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut text = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_path_and_query() {
        let request = ApiRequest::get(&["jobs"])
            .with_query("limit", 100)
            .with_query("lookbackSeconds", 86_400);
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path(), "jobs");
        assert_eq!(request.query_value("limit"), Some("100"));
        assert_eq!(request.query_value("lookbackSeconds"), Some("86400"));
        assert_eq!(request.query_value("from"), None);
    }

    #[test]
    fn post_carries_body() {
        let request = ApiRequest::post(
            &["production-profiles", "PR1", "configure"],
            serde_json::json!({ "profileId": "PR1" }),
        );
        assert_eq!(request.path(), "production-profiles/PR1/configure");
        assert_eq!(request.body.unwrap()["profileId"], "PR1");
    }

    #[test]
    fn success_range() {
        assert!(ApiResponse::ok("[]").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
