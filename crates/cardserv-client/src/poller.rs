// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job status polling.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{info, instrument, warn};

use cardserv_core::config::Settings;
use cardserv_core::error::{CardServicesError, Result};
use cardserv_core::job::Job;
use cardserv_core::types::JobId;

use crate::client::CardServicesClient;

/// Re-reads a job until it reaches a terminal status.
///
/// Errors from the status read end the wait immediately; nothing is
/// retried.
#[derive(Debug, Clone, Copy)]
pub struct JobPoller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl JobPoller {
    /// Poll every `interval` with no deadline.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Give up with `PollTimeout` once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Interval and deadline from settings (a zero timeout polls forever).
    pub fn from_settings(settings: &Settings) -> Self {
        let poller = Self::new(Duration::from_secs(settings.poll_interval_secs.max(1)));
        match settings.poll_timeout_secs {
            0 => poller,
            secs => poller.with_deadline(Duration::from_secs(secs)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub async fn wait(&self, client: &CardServicesClient, job_id: &JobId) -> Result<Job> {
        self.wait_with(client, job_id, |_| {}).await
    }

    /// Like [`wait`](Self::wait), calling `on_update` with every status read.
    #[instrument(skip(self, client, on_update), fields(job_id = %job_id))]
    pub async fn wait_with(
        &self,
        client: &CardServicesClient,
        job_id: &JobId,
        mut on_update: impl FnMut(&Job) + Send,
    ) -> Result<Job> {
        let started = Instant::now();
        loop {
            let job = client.get_job(job_id).await?;
            on_update(&job);

            if job.job_status.is_terminal() {
                info!(status = %job.job_status, "job finished");
                return Ok(job);
            }

            if let Some(deadline) = self.deadline {
                if started.elapsed() + self.interval > deadline {
                    warn!(status = %job.job_status, "gave up waiting for job");
                    return Err(CardServicesError::PollTimeout {
                        job_id: job_id.to_string(),
                        last_status: job.job_status.to_string(),
                    });
                }
            }

            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_no_deadline() {
        let settings = Settings {
            poll_timeout_secs: 0,
            ..Settings::default()
        };
        assert_eq!(JobPoller::from_settings(&settings).deadline(), None);
    }

    #[test]
    fn settings_supply_interval_and_deadline() {
        let settings = Settings {
            poll_interval_secs: 2,
            poll_timeout_secs: 60,
            ..Settings::default()
        };
        let poller = JobPoller::from_settings(&settings);
        assert_eq!(poller.interval(), Duration::from_secs(2));
        assert_eq!(poller.deadline(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let settings = Settings {
            poll_interval_secs: 0,
            ..Settings::default()
        };
        assert_eq!(
            JobPoller::from_settings(&settings).interval(),
            Duration::from_secs(1)
        );
    }
}
