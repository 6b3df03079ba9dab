// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job submission, status reads, history queries and polling.

mod common;

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;

use cardserv_client::JobPoller;
use cardserv_core::error::CardServicesError;
use cardserv_core::job::JobStatus;
use cardserv_core::production::ProductionRequestTemplate;
use cardserv_core::types::JobId;

use common::*;

fn card_template() -> ProductionRequestTemplate {
    serde_json::from_value(card_request_template()).unwrap()
}

#[tokio::test]
async fn submitted_job_reads_back_as_submitted() {
    let server = FakeServer::new()
        .accepting_jobs()
        .with_job_states(&[job("Submitted")]);

    let job_id = server
        .client
        .submit_production_request(&card_template())
        .await
        .unwrap();
    let job = server.client.get_job(&job_id).await.unwrap();
    assert_eq!(job.job_unique_id, job_id);
    assert_eq!(job.job_status, JobStatus::Submitted);
    assert!(job.card_read_results().is_none());
}

#[tokio::test]
async fn printed_job_carries_card_edges() {
    let server = FakeServer::new().with_job_states(&[printed_job()]);
    let job = server.client.get_job(&JobId::new(JOB_ID)).await.unwrap();

    assert_eq!(job.job_status, JobStatus::Printed);
    let edges = &job.card_read_results().expect("results").card_edges;
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].card_serial_number, "08A62E6B");
    assert_eq!(edges[0].pacs_data[0].card_number.as_deref(), Some("679123"));
    assert!(!edges[1].pacs_data_available);
}

#[tokio::test]
async fn failed_job_is_reported_as_failed() {
    let mut failed = job("Failed");
    failed["jobStatusMessage"] = json!("Printer out of cards");
    let server = FakeServer::new().with_job_states(&[failed]);

    let job = server.client.get_job(&JobId::new(JOB_ID)).await.unwrap();
    assert_eq!(job.job_status, JobStatus::Failed);
    assert_eq!(job.job_status_message, "Printer out of cards");
}

#[tokio::test]
async fn time_period_query_sends_limit_and_lookback() {
    let server = FakeServer::new();
    server.get("jobs", json!([job("Printed"), job("Submitted")]));

    let jobs = server
        .client
        .get_jobs_for_time_period(100, Duration::from_secs(24 * 60 * 60))
        .await
        .unwrap();
    assert_eq!(jobs.len(), 2);

    let request = &server.transport.requests_to("jobs")[0];
    assert_eq!(request.query_value("limit"), Some("100"));
    assert_eq!(request.query_value("lookbackSeconds"), Some("86400"));
}

#[tokio::test]
async fn date_range_query_sends_rfc3339_bounds() {
    let server = FakeServer::new();
    server.get("jobs", json!([]));

    let from = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2026, 10, 16, 12, 30, 0).unwrap();
    let jobs = server
        .client
        .get_jobs_for_date_range(10, from, to)
        .await
        .unwrap();
    assert!(jobs.is_empty());

    let request = &server.transport.requests_to("jobs")[0];
    assert_eq!(request.query_value("from"), Some("2026-10-01T00:00:00Z"));
    assert_eq!(request.query_value("to"), Some("2026-10-16T12:30:00Z"));
}

#[tokio::test]
async fn poller_waits_for_terminal_status() {
    let server = FakeServer::new().with_job_states(&[
        job("Submitted"),
        job("Processing"),
        printed_job(),
    ]);

    let mut seen = Vec::new();
    let job = JobPoller::new(Duration::from_millis(1))
        .wait_with(&server.client, &JobId::new(JOB_ID), |j| seen.push(j.job_status))
        .await
        .unwrap();

    assert_eq!(job.job_status, JobStatus::Printed);
    assert_eq!(
        seen,
        [JobStatus::Submitted, JobStatus::Processing, JobStatus::Printed]
    );
}

#[tokio::test]
async fn poller_gives_up_at_deadline() {
    let server = FakeServer::new().with_job_states(&[job("Submitted")]);

    let err = JobPoller::new(Duration::from_millis(5))
        .with_deadline(Duration::from_millis(20))
        .wait(&server.client, &JobId::new(JOB_ID))
        .await
        .unwrap_err();
    match err {
        CardServicesError::PollTimeout { job_id, last_status } => {
            assert_eq!(job_id, JOB_ID);
            assert_eq!(last_status, "Submitted");
        }
        other => panic!("expected PollTimeout, got {other:?}"),
    }
}

#[tokio::test]
async fn poller_surfaces_read_errors_immediately() {
    let server = FakeServer::new();
    let err = JobPoller::new(Duration::from_millis(1))
        .wait(&server.client, &JobId::new("JOB12345"))
        .await
        .unwrap_err();
    assert!(matches!(err, CardServicesError::NotFound { .. }));
    assert_eq!(server.transport.requests().len(), 1);
}
