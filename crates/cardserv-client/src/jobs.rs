// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job submission and status queries.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, instrument};

use cardserv_core::error::{ResourceKind, Result};
use cardserv_core::job::{Job, SubmitResponse};
use cardserv_core::production::ProductionRequestTemplate;
use cardserv_core::types::JobId;

use crate::client::CardServicesClient;
use crate::transport::ApiRequest;

impl CardServicesClient {
    /// Queue a configured request for production.  Returns as soon as the
    /// server has accepted the job; printing happens asynchronously.
    #[instrument(skip_all)]
    pub async fn submit_production_request(
        &self,
        template: &ProductionRequestTemplate,
    ) -> Result<JobId> {
        let body = serde_json::to_value(template)?;
        let response: SubmitResponse = self.call(ApiRequest::post(&["jobs"], body), None).await?;
        info!(job_id = %response.job_unique_id, "production request submitted");
        Ok(response.job_unique_id)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_job(&self, id: &JobId) -> Result<Job> {
        let job: Job = self
            .call(
                ApiRequest::get(&["jobs", id.as_str()]),
                Some((ResourceKind::Job, id.as_str())),
            )
            .await?;
        debug!(status = %job.job_status, "job retrieved");
        Ok(job)
    }

    /// At most `limit` jobs submitted within the last `period`.
    #[instrument(skip(self))]
    pub async fn get_jobs_for_time_period(&self, limit: u32, period: Duration) -> Result<Vec<Job>> {
        let request = ApiRequest::get(&["jobs"])
            .with_query("limit", limit)
            .with_query("lookbackSeconds", period.as_secs());
        let jobs: Vec<Job> = self.call(request, None).await?;
        info!(count = jobs.len(), "jobs retrieved");
        Ok(jobs)
    }

    /// At most `limit` jobs submitted between `from` and `to`.
    #[instrument(skip(self))]
    pub async fn get_jobs_for_date_range(
        &self,
        limit: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Job>> {
        let request = ApiRequest::get(&["jobs"])
            .with_query("limit", limit)
            .with_query("from", from.to_rfc3339_opts(SecondsFormat::Secs, true))
            .with_query("to", to.to_rfc3339_opts(SecondsFormat::Secs, true));
        let jobs: Vec<Job> = self.call(request, None).await?;
        info!(count = jobs.len(), "jobs retrieved");
        Ok(jobs)
    }
}
