// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card Services: Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod job;
pub mod options;
pub mod production;
pub mod types;

pub use config::Settings;
pub use error::{CardServicesError, ResourceKind};
pub use job::*;
pub use options::ServiceOption;
pub use production::*;
pub use types::*;
