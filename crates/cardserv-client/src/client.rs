// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client factory and shared request plumbing.
//
// `CardServicesClient::new` validates the server URL first, then opens the
// client certificate, then builds the HTTPS transport.  Nothing touches the
// network until the first API call.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Url;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use cardserv_core::config::Settings;
use cardserv_core::error::{CardServicesError, ResourceKind, Result};
use cardserv_security::ClientCertificate;

use crate::transport::{ApiRequest, HttpTransport, Transport};

const INVALID_PORT: &str = "invalid port specified";
const UNRECOGNIZED_PREFIX: &str = "URI prefix is not recognized";
const MISSING_HOST: &str = "missing host";

/// Where the client authentication certificate comes from.
pub enum CertificateSource {
    Pkcs12File {
        path: PathBuf,
        password: Option<SecretString>,
    },
    Pkcs12Bytes {
        der: Vec<u8>,
        password: Option<SecretString>,
    },
    Loaded(ClientCertificate),
}

impl CertificateSource {
    fn load(self) -> Result<ClientCertificate> {
        match self {
            Self::Pkcs12File { path, password } => {
                ClientCertificate::from_pkcs12_file(&path, password.as_ref())
            }
            Self::Pkcs12Bytes { der, password } => {
                ClientCertificate::from_pkcs12_der(&der, password.as_ref())
            }
            Self::Loaded(certificate) => Ok(certificate),
        }
    }
}

/// Everything needed to open a client.  Passed explicitly; there is no
/// process-wide client state.
pub struct ClientConfig {
    pub server_url: String,
    pub api_key: SecretString,
    pub certificate: CertificateSource,
}

impl ClientConfig {
    /// Build from loaded settings.  Fails with `NotConfigured` when the URL
    /// or API key is blank.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let creds = settings.credentials()?;
        Ok(Self {
            server_url: creds.server_url.to_string(),
            api_key: creds.api_key.clone(),
            certificate: CertificateSource::Pkcs12File {
                path: creds.certificate_path.to_path_buf(),
                password: creds.certificate_password.cloned(),
            },
        })
    }
}

/// Parse and check a server base URL.
///
/// Only `https` is accepted, a host is required and an explicit port must
/// fit in 16 bits.
pub fn parse_server_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let invalid = |reason: &str| CardServicesError::InvalidUri {
        uri: raw.to_string(),
        reason: reason.to_string(),
    };

    let Some((scheme, rest)) = raw.split_once("://") else {
        return Err(invalid(UNRECOGNIZED_PREFIX));
    };
    if !scheme.eq_ignore_ascii_case("https") {
        return Err(invalid(UNRECOGNIZED_PREFIX));
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);
    if host_port.is_empty() || host_port.starts_with(':') {
        return Err(invalid(MISSING_HOST));
    }
    if !host_port.ends_with(']') {
        if let Some((_, port)) = host_port.rsplit_once(':') {
            if port.parse::<u16>().is_err() {
                return Err(invalid(INVALID_PORT));
            }
        }
    }

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(MISSING_HOST));
    }
    Ok(url)
}

/// Handle to the Card Services API.
///
/// Calls are issued one at a time by the caller; the client itself holds no
/// mutable state.
#[derive(Clone)]
pub struct CardServicesClient {
    transport: Arc<dyn Transport>,
    server: String,
}

impl std::fmt::Debug for CardServicesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardServicesClient")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl CardServicesClient {
    /// Open a client over HTTPS with mutual TLS.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let url = parse_server_url(&config.server_url)?;
        let certificate = config.certificate.load()?;
        let transport = HttpTransport::new(url.clone(), &config.api_key, &certificate)?;

        info!(
            server = %url,
            certificate = %certificate.display_name(),
            "card services client ready"
        );
        Ok(Self {
            transport: Arc::new(transport),
            server: url.to_string(),
        })
    }

    /// Open a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            server: "(custom transport)".into(),
        }
    }

    /// Base URL this client talks to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Send `request` and decode a successful JSON body.
    ///
    /// A 404 becomes `NotFound` when `lookup` names the resource being
    /// fetched; every other failure status becomes `Api`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        lookup: Option<(ResourceKind, &str)>,
    ) -> Result<T> {
        let method = request.method;
        let path = request.path();
        debug!(%method, %path, "sending request");

        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(serde_json::from_str(&response.body)?);
        }

        if response.status == 404 {
            if let Some((kind, id)) = lookup {
                debug!(%kind, id, "resource not found");
                return Err(CardServicesError::not_found(kind, id));
            }
        }

        let message = error_message(&response.body);
        warn!(%method, %path, status = response.status, %message, "request failed");
        Err(CardServicesError::Api {
            status: response.status,
            message,
        })
    }
}

/// Pull a readable message out of an error body: the JSON `message` field
/// when present, otherwise the raw text.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "(empty response)".into(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(raw: &str) -> String {
        match parse_server_url(raw) {
            Err(CardServicesError::InvalidUri { reason, .. }) => reason,
            other => panic!("expected InvalidUri for {raw}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_https_with_port() {
        let url = parse_server_url("https://test.api.example.com:18443").unwrap();
        assert_eq!(url.port(), Some(18443));
        assert_eq!(url.host_str(), Some("test.api.example.com"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(parse_server_url("  https://host.example  ").is_ok());
    }

    #[test]
    fn port_out_of_range() {
        assert_eq!(reason("https://test.api.example.com:123456"), INVALID_PORT);
        assert_eq!(reason("https://test.api.example.com:abc/"), INVALID_PORT);
    }

    #[test]
    fn unknown_prefix() {
        assert_eq!(reason("ht://test.api.example.com:18443"), UNRECOGNIZED_PREFIX);
        assert_eq!(reason("test.api.example.com:18443"), UNRECOGNIZED_PREFIX);
    }

    #[test]
    fn plain_http_is_rejected() {
        assert_eq!(reason("http://test.api.example.com"), UNRECOGNIZED_PREFIX);
    }

    #[test]
    fn host_is_required() {
        assert_eq!(reason("https://"), MISSING_HOST);
        assert_eq!(reason("https://:18443/"), MISSING_HOST);
    }

    #[test]
    fn ipv6_literal_without_port() {
        let url = parse_server_url("https://[::1]/").unwrap();
        assert_eq!(url.port(), None);
    }

    #[test]
    fn error_message_prefers_json_field() {
        assert_eq!(error_message(r#"{"message":"bad key"}"#), "bad key");
        assert_eq!(error_message("Service Unavailable"), "Service Unavailable");
        assert_eq!(error_message(""), "(empty response)");
    }

    #[test]
    fn from_settings_requires_credentials() {
        let settings = Settings::default();
        assert!(matches!(
            ClientConfig::from_settings(&settings),
            Err(CardServicesError::NotConfigured)
        ));
    }

    #[test]
    fn bad_url_fails_before_certificate_is_opened() {
        let config = ClientConfig {
            server_url: "https://host.example:123456".into(),
            api_key: SecretString::from("528DFB0B"),
            certificate: CertificateSource::Pkcs12File {
                path: PathBuf::from("/definitely/not/here.p12"),
                password: None,
            },
        };
        let err = CardServicesClient::new(config).unwrap_err();
        assert!(matches!(err, CardServicesError::InvalidUri { .. }), "got {err:?}");
    }

    #[test]
    fn missing_certificate_is_reported_after_url_check() {
        let config = ClientConfig {
            server_url: "https://host.example:18443".into(),
            api_key: SecretString::from("528DFB0B"),
            certificate: CertificateSource::Pkcs12File {
                path: PathBuf::from("/definitely/not/here.p12"),
                password: None,
            },
        };
        let err = CardServicesClient::new(config).unwrap_err();
        assert!(
            matches!(err, CardServicesError::CertificateNotFound { .. }),
            "got {err:?}"
        );
    }
}
