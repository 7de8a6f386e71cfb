use std::sync::Arc;

use async_trait::async_trait;

use crate::config::MailSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport is not configured")]
    NotConfigured,
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// Outbound mail collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Records messages through `tracing` instead of talking SMTP.
pub struct LogMailer {
    settings: MailSettings,
}

impl LogMailer {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let MailSettings {
            username,
            password,
            from,
            server,
            ..
        } = &self.settings;

        if from.is_empty() {
            return Err(MailError::NotConfigured);
        }

        // login needs both halves
        if username.is_empty() != password.is_empty() {
            return Err(MailError::Delivery(format!(
                "incomplete credentials for {server}"
            )));
        }

        tracing::info!(
            from = %from,
            user = %username,
            server = %server,
            port = self.settings.port,
            to = %mail.to,
            subject = %mail.subject,
            bytes = mail.html_body.len(),
            "otp mail dispatched"
        );
        Ok(())
    }
}

/// Fire-and-forget: the caller's response never waits on delivery.
pub fn dispatch(mailer: Arc<dyn Mailer>, mail: OutgoingMail) {
    tokio::spawn(async move {
        let to = mail.to.clone();
        if let Err(e) = mailer.send(mail).await {
            tracing::warn!(%to, error = %e, "failed to send otp mail");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(from: &str) -> MailSettings {
        MailSettings {
            username: "u".into(),
            password: "p".into(),
            from: from.into(),
            server: "smtp.example.com".into(),
            port: 587,
        }
    }

    fn mail() -> OutgoingMail {
        OutgoingMail {
            to: "a@x.com".into(),
            subject: "Your code".into(),
            html_body: "<p>123456</p>".into(),
        }
    }

    #[tokio::test]
    async fn log_mailer_requires_sender_address() {
        let m = LogMailer::new(settings(""));
        assert!(matches!(m.send(mail()).await, Err(MailError::NotConfigured)));
    }

    #[tokio::test]
    async fn log_mailer_accepts_configured_sender() {
        let m = LogMailer::new(settings("noreply@example.com"));
        assert!(m.send(mail()).await.is_ok());
    }

    #[tokio::test]
    async fn log_mailer_rejects_half_configured_login() {
        let mut cfg = settings("noreply@example.com");
        cfg.password.clear();
        let m = LogMailer::new(cfg);

        match m.send(mail()).await {
            Err(MailError::Delivery(msg)) => assert!(msg.contains("smtp.example.com")),
            other => panic!("expected delivery error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn log_mailer_allows_anonymous_relay() {
        let mut cfg = settings("noreply@example.com");
        cfg.username.clear();
        cfg.password.clear();
        assert!(LogMailer::new(cfg).send(mail()).await.is_ok());
    }
}
