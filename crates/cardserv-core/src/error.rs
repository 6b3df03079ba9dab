// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Card Services client.

use std::fmt;

use thiserror::Error;

/// Resource kinds that can be looked up by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Organization,
    OrganizationalUnit,
    Location,
    Device,
    ProductionProfile,
    Job,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Organization => "Organization",
            Self::OrganizationalUnit => "Organizational unit",
            Self::Location => "Location",
            Self::Device => "Device",
            Self::ProductionProfile => "Production profile",
            Self::Job => "Job",
        };
        f.write_str(name)
    }
}

/// Top-level error type for all Card Services operations.
#[derive(Debug, Error)]
pub enum CardServicesError {
    // -- Local configuration --
    #[error("server API key and URL have not been configured")]
    NotConfigured,

    #[error("missing configuration value: {0}")]
    MissingSetting(&'static str),

    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("client certificate file not found: {path}")]
    CertificateNotFound { path: String },

    #[error("client certificate could not be decrypted (wrong password?): {0}")]
    CertificateDecryption(String),

    #[error("client certificate error: {0}")]
    Certificate(String),

    // -- Remote API --
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: ResourceKind, id: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    // -- Schema assumptions --
    #[error("unhandled production profile parameter type: {data_type} ({name})")]
    UnhandledProfileParameter { data_type: String, name: String },

    #[error("production profile offers no card types")]
    NoCardTypes,

    #[error("card type '{requested}' is not one of the profile options")]
    InvalidCardType { requested: String },

    #[error("unhandled production service type: {0}")]
    UnhandledService(String),

    #[error("unexpected service data parameter: {name}")]
    UnexpectedServiceParameter { name: String },

    // -- Polling --
    #[error("job {job_id} did not finish in time (last status: {last_status})")]
    PollTimeout { job_id: String, last_status: String },

    // -- Local resources --
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CardServicesError {
    /// Build a `NotFound` for the given resource kind and identifier.
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether this error was reported by the remote service rather than
    /// raised locally.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Api { .. } | Self::Transport(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CardServicesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        let err = CardServicesError::not_found(ResourceKind::Job, "JOB12345");
        assert!(err.to_string().contains("Job not found: 'JOB12345'"));
    }

    #[test]
    fn org_unit_kind_reads_naturally() {
        let err = CardServicesError::not_found(ResourceKind::OrganizationalUnit, "OU1");
        assert_eq!(err.to_string(), "Organizational unit not found: 'OU1'");
    }

    #[test]
    fn remote_classification() {
        assert!(
            CardServicesError::Api {
                status: 500,
                message: "boom".into()
            }
            .is_remote()
        );
        assert!(!CardServicesError::NotConfigured.is_remote());
        assert!(!CardServicesError::NoCardTypes.is_remote());
    }
}
