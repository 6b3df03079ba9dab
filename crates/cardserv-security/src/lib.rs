// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card Services Security: client authentication certificate loading for
// mutual TLS, and certificate fingerprints for logs.

pub mod certificates;
pub mod fingerprint;

pub use certificates::ClientCertificate;
pub use fingerprint::{fingerprint, short_fingerprint};
