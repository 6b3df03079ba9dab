// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job records and card-read results.  Jobs are created by submission and
// mutated server-side only; the client just reads them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::JobId;

/// Server-owned job lifecycle.
///
/// `Submitted → (Printed | Failed)`.  Statuses this client does not know
/// deserialize to `Unknown` and are treated as still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Submitted,
    Processing,
    Printed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// No further transition is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Printed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Submitted => "Submitted",
            Self::Processing => "Processing",
            Self::Printed => "Printed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A card production job as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_unique_id: JobId,
    #[serde(default)]
    pub job_name: String,
    pub job_status: JobStatus,
    #[serde(default)]
    pub job_status_message: String,
    pub submit_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub service_data: Option<ServiceData>,
}

impl Job {
    /// Card-read results, present once a job has printed.
    pub fn card_read_results(&self) -> Option<&CardReadResults> {
        self.service_data
            .as_ref()
            .and_then(|d| d.card_read_results.as_ref())
    }
}

/// Results attached to a job by the services that ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    #[serde(default)]
    pub card_read_results: Option<CardReadResults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReadResults {
    #[serde(default)]
    pub card_edges: Vec<CardEdge>,
}

/// One detected card technology.  Some technologies support several frame
/// protocols and may be reported more than once with identical serial and
/// PACS data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEdge {
    #[serde(default)]
    pub edge_type: String,
    #[serde(default)]
    pub card_protocol: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub card_serial_number: String,
    #[serde(default)]
    pub pacs_data_available: bool,
    /// Hex string of the raw PACS bits.
    #[serde(default)]
    pub card_pacs_bit_data: Option<String>,
    #[serde(default)]
    pub card_pacs_bit_count: u32,
    #[serde(default)]
    pub pacs_data: Vec<PacsDecodeResult>,
    /// Ad-hoc key/value data for specialised applications.
    #[serde(default)]
    pub data: Vec<KeyValue>,
}

/// Outcome of decoding PACS bits with one configured card format.  Fields
/// are only meaningful when `decode_status` is `"Success"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacsDecodeResult {
    #[serde(default)]
    pub format_name: String,
    #[serde(default)]
    pub format_bit_count: u32,
    #[serde(default)]
    pub decode_status: String,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub card_number: Option<String>,
    /// Field names are defined by the card format.
    #[serde(default)]
    pub pacs_fields: Vec<KeyValue>,
}

impl PacsDecodeResult {
    pub fn is_success(&self) -> bool {
        self.decode_status.eq_ignore_ascii_case("success")
    }
}

/// Ordered key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// Response body of a job submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_unique_id: JobId,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRINTED_JOB: &str = r#"{
        "jobUniqueId": "JOBA5D31540B8AC4CCDB930FF914D9228D3",
        "jobName": "Card Read Test",
        "jobStatus": "Printed",
        "jobStatusMessage": "Job printed successfully",
        "submitDate": "2018-04-09T15:31:28Z",
        "lastUpdate": "2018-04-09T15:34:22Z",
        "serviceData": {
            "cardReadResults": {
                "cardEdges": [
                    {
                        "edgeType": "SEOS",
                        "cardProtocol": "ISO14443A",
                        "enabled": true,
                        "status": "Success",
                        "cardSerialNumber": "08A62E6B",
                        "pacsDataAvailable": true,
                        "cardPacsBitData": "1D682250",
                        "cardPacsBitCount": 35,
                        "pacsData": [
                            {
                                "formatName": "H234561",
                                "formatBitCount": 26,
                                "decodeStatus": "Success",
                                "cardNumber": "679123",
                                "pacsFields": [
                                    { "key": "Facility Code", "value": "115" },
                                    { "key": "Card Number", "value": "679123" }
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn parses_printed_job_with_card_edges() {
        let job: Job = serde_json::from_str(PRINTED_JOB).unwrap();
        assert_eq!(job.job_status, JobStatus::Printed);
        let results = job.card_read_results().expect("card read results");
        assert_eq!(results.card_edges.len(), 1);
        let edge = &results.card_edges[0];
        assert_eq!(edge.card_pacs_bit_count, 35);
        assert!(edge.pacs_data[0].is_success());
        assert_eq!(edge.pacs_data[0].pacs_fields[0].key, "Facility Code");
    }

    #[test]
    fn sparse_edge_still_parses() {
        let job: Job = serde_json::from_str(
            r#"{
                "jobUniqueId": "JOB1",
                "jobStatus": "Printed",
                "submitDate": "2026-10-16T09:00:00Z",
                "lastUpdate": "2026-10-16T09:01:00Z",
                "serviceData": { "cardReadResults": { "cardEdges": [
                    { "pacsDataAvailable": true, "pacsData": [{ "decodeStatus": "Failed" }] },
                    { "edgeType": "SEOS" }
                ] } }
            }"#,
        )
        .unwrap();
        let edges = &job.card_read_results().unwrap().card_edges;
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].edge_type, "");
        assert_eq!(edges[0].pacs_data[0].format_name, "");
        assert_eq!(edges[1].edge_type, "SEOS");
    }

    #[test]
    fn unknown_status_is_not_terminal() {
        let status: JobStatus = serde_json::from_str("\"Encoding\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!JobStatus::Submitted.is_terminal());
        assert!(JobStatus::Printed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }
}
