//! Submission client
//!
//! Sends a draft to the configuration service and folds every possible
//! answer into one of three outcomes the wizard knows how to handle. The
//! cause of a failure is logged here and never reaches the user.

use crate::config::ClientConfig;
use crate::core::{
    ConfigurationDraft, FieldErrors, StoredConfiguration, SubmissionAccepted, SubmissionRejected,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Message shown for any submission that neither succeeded nor was rejected
pub const GENERIC_RETRY_MESSAGE: &str = "Failed to submit configuration. Please try again later.";

/// What became of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Stored; carries the server's confirmation and the record
    Accepted {
        message: String,
        record: StoredConfiguration,
    },

    /// Refused by server-side validation
    Rejected { field_errors: FieldErrors },

    /// Anything else: transport error, timeout, unexpected status or body
    Failed { message: String },
}

impl SubmissionOutcome {
    /// The generic failure, whatever the cause
    pub fn failed() -> Self {
        SubmissionOutcome::Failed {
            message: GENERIC_RETRY_MESSAGE.to_string(),
        }
    }
}

/// Hands a draft to the configuration service
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit_draft(&self, draft: &ConfigurationDraft) -> SubmissionOutcome;
}

/// Submits over HTTP with a bounded timeout
///
/// Stateless between calls; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// Create a client for the service rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/configurations", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    /// Full URL submissions are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn try_submit(&self, draft: &ConfigurationDraft) -> anyhow::Result<SubmissionOutcome> {
        let response = self.client.post(&self.endpoint).json(draft).send().await?;
        let status = response.status();

        if status.is_success() {
            let accepted: SubmissionAccepted = response.json().await?;
            return Ok(SubmissionOutcome::Accepted {
                message: accepted.message,
                record: accepted.new_config,
            });
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let rejected: SubmissionRejected = response.json().await?;
            return Ok(SubmissionOutcome::Rejected {
                field_errors: rejected.errors,
            });
        }

        anyhow::bail!("configuration service answered {}", status)
    }
}

#[async_trait]
impl Submitter for HttpSubmissionClient {
    async fn submit_draft(&self, draft: &ConfigurationDraft) -> SubmissionOutcome {
        match self.try_submit(draft).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %format!("{:#}", e),
                    "configuration submission failed"
                );
                SubmissionOutcome::failed()
            }
        }
    }
}
