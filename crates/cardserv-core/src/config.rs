// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client settings: server URL, API key, client certificate and demo inputs.
//
// Settings come from an optional JSON file and are then overridden by
// environment variables.  Credentials are always passed explicitly to the
// client factory; nothing here is global.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::{CardServicesError, Result};

pub const ENV_SERVER_URL: &str = "CARDSERV_SERVER_URL";
pub const ENV_API_KEY: &str = "CARDSERV_API_KEY";
pub const ENV_CERT_PATH: &str = "CARDSERV_CERT_PATH";
pub const ENV_CERT_PASSWORD: &str = "CARDSERV_CERT_PASSWORD";
pub const ENV_IMAGE_PATH: &str = "CARDSERV_IMAGE_PATH";

/// Persistent client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the integration server, e.g. `https://host:18443`.
    pub server_url: Option<String>,
    /// API key configured on the platform.
    #[serde(deserialize_with = "secret")]
    pub api_key: Option<SecretString>,
    /// PKCS#12 client authentication certificate.
    pub certificate_path: Option<PathBuf>,
    #[serde(deserialize_with = "secret")]
    pub certificate_password: Option<SecretString>,
    /// Image bound to image parameters by the demo workflow.
    pub image_path: PathBuf,
    /// Job name shown on the printer console.
    pub request_name: String,
    /// Seconds between job status polls.
    pub poll_interval_secs: u64,
    /// Give up polling after this many seconds (0 = poll indefinitely).
    pub poll_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: None,
            api_key: None,
            certificate_path: None,
            certificate_password: None,
            image_path: PathBuf::from("photos").join("testimage.png"),
            request_name: "Test card request".into(),
            poll_interval_secs: 5,
            poll_timeout_secs: 300,
        }
    }
}

fn secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

/// Validated connection parameters.
pub struct Credentials<'a> {
    pub server_url: &'a str,
    pub api_key: &'a SecretString,
    pub certificate_path: &'a Path,
    pub certificate_password: Option<&'a SecretString>,
}

impl Settings {
    /// Load settings from `path` (if given and present) and apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::from_file(path)?;
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Settings from `path` alone; defaults when the file is absent.
    pub fn from_file(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(p) if p.exists() => {
                let text = std::fs::read_to_string(p)?;
                let parsed: Settings = serde_json::from_str(&text)?;
                info!(path = %p.display(), "settings file loaded");
                parsed
            }
            Some(p) => {
                debug!(path = %p.display(), "settings file absent, using defaults");
                Settings::default()
            }
            None => Settings::default(),
        };
        Ok(settings)
    }

    /// Override fields from an environment lookup.  Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_SERVER_URL) {
            self.server_url = Some(url);
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(SecretString::from(key));
        }
        if let Some(path) = get(ENV_CERT_PATH) {
            self.certificate_path = Some(PathBuf::from(path));
        }
        if let Some(password) = get(ENV_CERT_PASSWORD) {
            self.certificate_password = Some(SecretString::from(password));
        }
        if let Some(path) = get(ENV_IMAGE_PATH) {
            self.image_path = PathBuf::from(path);
        }
    }

    /// Check that the server URL, API key and certificate path are present.
    ///
    /// A blank key or URL is reported as `NotConfigured` before anything
    /// else is attempted.
    pub fn credentials(&self) -> Result<Credentials<'_>> {
        let server_url = self
            .server_url
            .as_deref()
            .filter(|u| !u.trim().is_empty());
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty());

        let (Some(server_url), Some(api_key)) = (server_url, api_key) else {
            return Err(CardServicesError::NotConfigured);
        };

        let certificate_path = self
            .certificate_path
            .as_deref()
            .ok_or(CardServicesError::MissingSetting("certificate path"))?;

        Ok(Credentials {
            server_url: server_url.trim(),
            api_key,
            certificate_path,
            certificate_password: self.certificate_password.as_ref(),
        })
    }
}
