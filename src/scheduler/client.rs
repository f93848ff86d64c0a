//! HTTP client for the scheduling service

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::models::{ScheduleEntry, ScheduleResponse, Submission};
use crate::scheduler::SubmissionError;

/// Anything that can turn a submission into a weekly plan
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn generate(&self, submission: &Submission) -> Result<Vec<ScheduleEntry>, SubmissionError>;
}

/// Scheduler backed by `POST {endpoint}` with a JSON body
#[derive(Debug, Clone)]
pub struct HttpScheduler {
    client: Client,
    endpoint: String,
}

impl HttpScheduler {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Scheduler for HttpScheduler {
    async fn generate(&self, submission: &Submission) -> Result<Vec<ScheduleEntry>, SubmissionError> {
        info!(
            "Requesting schedule for subject '{}' from {}",
            submission.subject(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
            .map_err(|e| {
                error!("Schedule request to {} failed: {}", self.endpoint, e);
                SubmissionError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read schedule response from {}: {}", self.endpoint, e);
            SubmissionError::Transport(e)
        })?;

        if !status.is_success() {
            warn!("Scheduling service answered with status {}", status);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ScheduleResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Malformed schedule response: {}", e);
            SubmissionError::InvalidResponse(e)
        })?;

        debug!("Received {} schedule entries", parsed.schedule.len());
        Ok(parsed.schedule)
    }
}
