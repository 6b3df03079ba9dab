// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for console operators.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the console presents it.

use crate::error::CardServicesError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip, timeout, server hiccup; trying again may work.
    Transient,
    /// The operator must fix something (settings, certificate, file).
    ActionRequired,
    /// The server or profile is not shaped the way this client expects.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    /// Whether re-running the same step could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `CardServicesError` into a `HumanError`.
pub fn humanize_error(err: &CardServicesError) -> HumanError {
    match err {
        // -- Configuration --
        CardServicesError::NotConfigured => HumanError {
            message: "The server API key and URL have not been configured.".into(),
            suggestion: "Set CARDSERV_SERVER_URL and CARDSERV_API_KEY (or add them to the settings file).".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::MissingSetting(name) => HumanError {
            message: format!("The {name} has not been configured."),
            suggestion: "Add it to the settings file or the environment, then run again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::InvalidUri { uri, reason } => HumanError {
            message: "The server address doesn't look right.".into(),
            suggestion: format!(
                "It should look like https://host:18443. ({uri}: {reason})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::CertificateNotFound { path } => HumanError {
            message: "The client certificate file couldn't be found.".into(),
            suggestion: format!("Check the certificate path: {path}"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::CertificateDecryption(_) => HumanError {
            message: "The client certificate couldn't be opened.".into(),
            suggestion: "The certificate password is probably wrong. Check it and try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::Certificate(detail) => HumanError {
            message: "The client certificate couldn't be used.".into(),
            suggestion: format!("Make sure it is a PKCS#12 client authentication certificate. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Remote --
        CardServicesError::NotFound { kind, id } => HumanError {
            message: format!("{kind} '{id}' doesn't exist on the server."),
            suggestion: "Check the identifier. Identifiers are stable, so a stored one may belong to a different organization.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::Api { status, message } => humanize_api_error(*status, message),

        CardServicesError::Transport(detail) => humanize_transport_error(detail),

        // -- Schema assumptions --
        CardServicesError::UnhandledProfileParameter { .. }
        | CardServicesError::UnhandledService(_)
        | CardServicesError::UnexpectedServiceParameter { .. } => HumanError {
            message: "The production profile asks for something this client can't fill in.".into(),
            suggestion: format!("Review the profile's card template on the platform. ({err})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        CardServicesError::NoCardTypes => HumanError {
            message: "The production profile has no card types.".into(),
            suggestion: "Add at least one card type to the profile on the platform.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        CardServicesError::InvalidCardType { requested } => HumanError {
            message: format!("'{requested}' isn't a card type offered by this profile."),
            suggestion: "Pick one of the listed card types.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::PollTimeout { job_id, .. } => HumanError {
            message: format!("Job {job_id} is still running."),
            suggestion: "It may be waiting for the printer. Check again later with the job id.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Local --
        CardServicesError::Image(_) => HumanError {
            message: "There's a problem with the card image.".into(),
            suggestion: "Try saving it as a PNG or JPEG first.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CardServicesError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the configured paths.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading a file.".into(),
                    suggestion: "Check the file permissions and try again.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        CardServicesError::Serialization(_) => HumanError {
            message: "The server sent something this client doesn't understand.".into(),
            suggestion: "The client may be out of date. If this keeps happening, please report it.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_api_error(status: u16, detail: &str) -> HumanError {
    match status {
        401 | 403 => HumanError {
            message: "The server refused our credentials.".into(),
            suggestion: "Check the API key and that the client certificate belongs to this account.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        400 | 422 => HumanError {
            message: "The server rejected the request.".into(),
            suggestion: format!("Check the request parameters. (Detail: {detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        500..=599 => HumanError {
            message: "The server had a problem.".into(),
            suggestion: format!("Try again in a few minutes. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
        _ => HumanError {
            message: "The server returned an error.".into(),
            suggestion: format!("Status {status}: {detail}"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_transport_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("timed out") {
        HumanError {
            message: "The server didn't respond in time.".into(),
            suggestion: "Check the network connection, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("dns") || lower.contains("no such host") {
        HumanError {
            message: "The server name couldn't be found.".into(),
            suggestion: "Check the host part of the server URL.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("certificate") || lower.contains("handshake") {
        HumanError {
            message: "The secure connection to the server failed.".into(),
            suggestion: "Check that the client certificate is valid and has not expired.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: "We couldn't reach the server.".into(),
            suggestion: format!("Check the network connection and the server URL. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}
