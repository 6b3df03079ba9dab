// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Client authentication certificate for mutual TLS.
//
// The platform issues each integrator a PKCS#12 bundle (certificate + private
// key) protected by a password.  The bundle is decrypted once here and the
// resulting identity is handed to the HTTP client, which presents it on every
// connection.

use std::fmt;
use std::path::Path;

use cardserv_core::error::{CardServicesError, Result};
use reqwest::Identity;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::fingerprint::{fingerprint, short_fingerprint};

/// DER tag that every PKCS#12 `PFX` structure starts with (SEQUENCE).
const DER_SEQUENCE: u8 = 0x30;

/// A decrypted client authentication certificate.
#[derive(Clone)]
pub struct ClientCertificate {
    identity: Identity,
    /// SHA-256 of the PKCS#12 bundle.
    fingerprint: String,
}

impl fmt::Debug for ClientCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCertificate")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

impl ClientCertificate {
    /// Load and decrypt a PKCS#12 bundle from disk.
    ///
    /// A missing file (or missing parent directory) is reported as
    /// `CertificateNotFound`; a bundle that does not open with `password`
    /// as `CertificateDecryption`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_pkcs12_file(
        path: impl AsRef<Path>,
        password: Option<&SecretString>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let der = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CardServicesError::CertificateNotFound {
                path: path.display().to_string(),
            },
            _ => CardServicesError::Io(e),
        })?;
        debug!(len = der.len(), "certificate bundle read");
        Self::from_pkcs12_der(&der, password)
    }

    /// Decrypt an in-memory PKCS#12 bundle.
    pub fn from_pkcs12_der(der: &[u8], password: Option<&SecretString>) -> Result<Self> {
        match der.first() {
            None => {
                return Err(CardServicesError::Certificate(
                    "certificate bundle is empty".into(),
                ));
            }
            Some(&tag) if tag != DER_SEQUENCE => {
                return Err(CardServicesError::Certificate(
                    "not a PKCS#12 (DER) certificate bundle".into(),
                ));
            }
            Some(_) => {}
        }

        let password = password.map(|p| p.expose_secret()).unwrap_or("");
        let identity = Identity::from_pkcs12_der(der, password)
            .map_err(|e| CardServicesError::CertificateDecryption(e.to_string()))?;

        let fingerprint = fingerprint(der);
        info!(
            fingerprint = %short_fingerprint(&fingerprint),
            "client certificate loaded"
        );

        Ok(Self {
            identity,
            fingerprint,
        })
    }

    /// The TLS identity presented to the server.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Full SHA-256 fingerprint (lowercase hex).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Abbreviated fingerprint for console output.
    pub fn display_name(&self) -> String {
        short_fingerprint(&self.fingerprint)
    }
}
