//! Branch notification
//!
//! Every stored configuration is announced to the branch it names by a
//! plain-text message. Delivery goes through a [`Mailer`]; failures surface
//! as [`NotifyError`] and are only ever logged by the caller, never turned
//! into a failed submission.

use crate::config::MailConfig;
use crate::core::{Choice, StoredConfiguration};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Errors raised while delivering a branch notification
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail relay answered {status}")]
    Rejected { status: u16 },

    #[error("mailer unavailable: {0}")]
    Unavailable(String),
}

/// A composed notification message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl BranchEmail {
    /// Compose the message announcing `record` to its branch
    pub fn for_configuration(record: &StoredConfiguration, mail: &MailConfig) -> Self {
        let configuration = &record.configuration;
        let dimensions = serde_json::to_string(&configuration.dimensions)
            .unwrap_or_else(|_| "{}".to_string());

        let text = [
            format!("Product: {}", configuration.product.as_str()),
            format!(
                "Installation Type: {}",
                configuration.installation_type.as_str()
            ),
            format!("Dimensions: {}", dimensions),
            format!("Color: {}", configuration.color.as_str()),
            format!("LED: {}", configuration.led.as_str()),
            format!("Service: {}", configuration.service),
            format!("Branch: {}", configuration.branch.as_str()),
            format!("Name: {}", configuration.name),
            format!("Email: {}", configuration.email),
            format!("Phone: {}", configuration.phone),
        ]
        .join("\n");

        Self {
            from: mail.sender(),
            to: format!("{}@{}", configuration.branch.as_str(), mail.branch_domain),
            subject: format!("New Configuration Request from {}", configuration.name),
            text,
        }
    }
}

/// Delivers composed messages
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &BranchEmail) -> Result<(), NotifyError>;
}

/// Writes messages to the trace log instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &BranchEmail) -> Result<(), NotifyError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "branch notification (no relay configured)"
        );
        tracing::debug!(body = %email.text, "branch notification body");
        Ok(())
    }
}

/// POSTs messages as JSON to an HTTP mail relay
#[derive(Debug, Clone)]
pub struct HttpRelayMailer {
    client: Client,
    endpoint: String,
}

impl HttpRelayMailer {
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, email: &BranchEmail) -> Result<(), NotifyError> {
        let response = self.client.post(&self.endpoint).json(email).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(to = %email.to, "branch notification relayed");
        Ok(())
    }
}

/// Keeps messages in memory; optionally fails every send
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<BranchEmail>>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails after recording the attempt
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    /// Messages handed to this mailer so far
    pub fn sent(&self) -> Vec<BranchEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &BranchEmail) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .map_err(|e| NotifyError::Unavailable(e.to_string()))?
            .push(email.clone());

        if self.fail {
            return Err(NotifyError::Unavailable("mail relay offline".to_string()));
        }
        Ok(())
    }
}

/// Pick the mailer for a mail configuration: the relay when one is set,
/// the log otherwise
pub fn mailer_for(mail: &MailConfig) -> Result<Arc<dyn Mailer>, NotifyError> {
    match mail.relay_url.as_deref() {
        Some(url) => Ok(Arc::new(HttpRelayMailer::new(url)?)),
        None => Ok(Arc::new(LogMailer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Branch, Color, Configuration, ConfiguredDimensions, InstallationType, Led, Product,
    };

    fn record() -> StoredConfiguration {
        StoredConfiguration::new(Configuration {
            product: Product::Carport,
            installation_type: InstallationType::Attached,
            dimensions: ConfiguredDimensions {
                width: "300".into(),
                depth: "400".into(),
            },
            color: Color::Black,
            led: Led::No,
            service: false,
            branch: Branch::Dhaka,
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            phone: "123".to_string(),
        })
    }

    #[test]
    fn test_branch_email_addressing() {
        let email = BranchEmail::for_configuration(&record(), &MailConfig::default());

        assert_eq!(email.to, "dhaka@prestoconfig.mi-shajib.com");
        assert_eq!(email.subject, "New Configuration Request from A");
        assert_eq!(
            email.from,
            "PrestoConfig <no-reply@prestoconfig.mi-shajib.com>"
        );
    }

    #[test]
    fn test_branch_email_body() {
        let email = BranchEmail::for_configuration(&record(), &MailConfig::default());
        let lines: Vec<&str> = email.text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Product: carport",
                "Installation Type: attached",
                r#"Dimensions: {"width":"300","depth":"400"}"#,
                "Color: black",
                "LED: no",
                "Service: false",
                "Branch: dhaka",
                "Name: A",
                "Email: a@example.com",
                "Phone: 123",
            ]
        );
    }

    #[tokio::test]
    async fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        let email = BranchEmail::for_configuration(&record(), &MailConfig::default());

        mailer.send(&email).await.unwrap();

        assert_eq!(mailer.sent(), vec![email]);
    }

    #[tokio::test]
    async fn test_failing_mailer_still_records() {
        let mailer = RecordingMailer::failing();
        let email = BranchEmail::for_configuration(&record(), &MailConfig::default());

        let result = mailer.send(&email).await;

        assert!(matches!(result, Err(NotifyError::Unavailable(_))));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_log_mailer_never_fails() {
        let email = BranchEmail::for_configuration(&record(), &MailConfig::default());
        assert!(LogMailer.send(&email).await.is_ok());
    }
}
