//! Notification gateway: the single place outbound email leaves the server.
//!
//! The actual delivery sits behind the [`Mailer`] trait so the gateway can be
//! exercised without a mail server. The gateway never returns an error: every
//! failure becomes a [`MailOutcome`] with `ok: false`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub mod smtp;

pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP not configured in environment")]
    NotConfigured,

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("{0}")]
    Transport(String),
}

/// Result of a send attempt as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MailOutcome {
    pub fn sent() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// Delivers a plain-text message. Carried in the gateway as `Arc<dyn Mailer>`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Stand-in used when no SMTP credentials are configured.
pub struct UnconfiguredMailer;

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

#[derive(Clone)]
pub struct NotificationGateway {
    mailer: Arc<dyn Mailer>,
    timeout: Duration,
}

impl NotificationGateway {
    pub fn new(mailer: Arc<dyn Mailer>, timeout: Duration) -> Self {
        Self { mailer, timeout }
    }

    /// Validates the fields, then delivers on a separate task under a timeout.
    pub async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> MailOutcome {
        for (field, value) in [("recipient", recipient), ("subject", subject), ("body", body)] {
            if value.trim().is_empty() {
                return MailOutcome::failed(format!("{field} must not be empty"));
            }
        }

        let mailer = Arc::clone(&self.mailer);
        let (to, subj, text) = (recipient.to_string(), subject.to_string(), body.to_string());
        let mut task = tokio::spawn(async move { mailer.send(&to, &subj, &text).await });

        let outcome = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(Ok(()))) => MailOutcome::sent(),
            Ok(Ok(Err(e))) => MailOutcome::failed(e.to_string()),
            Ok(Err(join_err)) => {
                let err = MailError::Transport(format!("Mail task failed: {join_err}"));
                MailOutcome::failed(err.to_string())
            }
            Err(_) => {
                // A reported timeout must not turn into a late delivery.
                task.abort();
                MailOutcome::failed(format!(
                    "Mail delivery timed out after {}s",
                    self.timeout.as_secs()
                ))
            }
        };

        match &outcome.error {
            None => info!(recipient, subject, "Email sent"),
            Some(err) => warn!(recipient, subject, "Email not sent: {err}"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingMailer, SentMail};

    fn gateway(mailer: Arc<dyn Mailer>) -> NotificationGateway {
        NotificationGateway::new(mailer, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_successful_send_is_ok() {
        let mailer = Arc::new(RecordingMailer::default());
        let outcome = gateway(mailer.clone())
            .send_email("a@example.com", "Hi", "Hello there")
            .await;

        assert_eq!(outcome, MailOutcome::sent());
        assert_eq!(
            mailer.sent(),
            vec![SentMail {
                recipient: "a@example.com".into(),
                subject: "Hi".into(),
                body: "Hello there".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_field_rejected_before_delivery() {
        let mailer = Arc::new(RecordingMailer::default());
        let outcome = gateway(mailer.clone())
            .send_email("a@example.com", "  ", "Hello")
            .await;

        assert_eq!(outcome, MailOutcome::failed("subject must not be empty"));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_outcome() {
        let mailer = Arc::new(RecordingMailer::failing("connection refused"));
        let outcome = gateway(mailer).send_email("a@example.com", "Hi", "Hello").await;
        assert_eq!(outcome, MailOutcome::failed("connection refused"));
    }

    #[tokio::test]
    async fn test_unconfigured_mailer() {
        let outcome = gateway(Arc::new(UnconfiguredMailer))
            .send_email("a@example.com", "Hi", "Hello")
            .await;
        assert_eq!(outcome, MailOutcome::failed("SMTP not configured in environment"));
    }

    /// Records the message only after a fixed delay.
    struct SlowMailer {
        delay: Duration,
        inner: RecordingMailer,
    }

    #[async_trait]
    impl Mailer for SlowMailer {
        async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError> {
            tokio::time::sleep(self.delay).await;
            self.inner.send(recipient, subject, body).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_mailer_times_out() {
        let mailer = Arc::new(SlowMailer {
            delay: Duration::from_secs(3),
            inner: RecordingMailer::default(),
        });
        let outcome = NotificationGateway::new(mailer.clone(), Duration::from_secs(1))
            .send_email("a@example.com", "Hi", "Hello")
            .await;
        assert_eq!(outcome, MailOutcome::failed("Mail delivery timed out after 1s"));

        // Well past the mailer's delay: the abandoned send must not complete.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(mailer.inner.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_within_timeout_is_delivered() {
        let mailer = Arc::new(SlowMailer {
            delay: Duration::from_secs(1),
            inner: RecordingMailer::default(),
        });
        let outcome = NotificationGateway::new(mailer.clone(), Duration::from_secs(5))
            .send_email("a@example.com", "Hi", "Hello")
            .await;
        assert_eq!(outcome, MailOutcome::sent());
        assert_eq!(mailer.inner.sent().len(), 1);
    }

    struct PanickingMailer;

    #[async_trait]
    impl Mailer for PanickingMailer {
        async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), MailError> {
            panic!("boom")
        }
    }

    #[tokio::test]
    async fn test_panicking_mailer_is_captured() {
        let outcome = gateway(Arc::new(PanickingMailer))
            .send_email("a@example.com", "Hi", "Hello")
            .await;
        assert!(!outcome.ok);
        assert!(outcome.error.unwrap().starts_with("Mail task failed"));
    }

    #[test]
    fn test_outcome_serialization_omits_error_on_success() {
        assert_eq!(
            serde_json::to_value(MailOutcome::sent()).unwrap(),
            serde_json::json!({"ok": true})
        );
    }
}
