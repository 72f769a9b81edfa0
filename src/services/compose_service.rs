//! Outbound compose operations.
//!
//! Send and save-draft are fire-and-forget from the engine's perspective:
//! the work is handed to a [`MailTransport`] collaborator on a background
//! task, the resolution value is ignored, and success/failure feedback is
//! the caller's responsibility. Spawned tasks hold no engine references, so
//! they complete harmlessly after teardown.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;

/// An outgoing email or draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutgoingEmail {
    /// Primary recipients.
    pub to: Vec<String>,
    /// CC recipients.
    pub cc: Vec<String>,
    /// BCC recipients.
    pub bcc: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Attached file names.
    pub attachments: Vec<String>,
}

impl OutgoingEmail {
    /// True when there is nothing worth saving: no recipients, blank
    /// subject, blank body.
    pub fn is_empty(&self) -> bool {
        self.to.is_empty() && self.subject.trim().is_empty() && self.body.trim().is_empty()
    }
}

/// Transport collaborator for outbound mail.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends an email.
    async fn send_email(&self, email: &OutgoingEmail) -> Result<()>;

    /// Persists a draft.
    async fn save_draft(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Dispatches outbound operations without blocking the engine.
pub struct ComposeService {
    transport: Arc<dyn MailTransport>,
}

impl ComposeService {
    /// Creates a compose service over the given transport.
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Sends an email in the background.
    pub fn send(&self, email: OutgoingEmail) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            if let Err(error) = transport.send_email(&email).await {
                tracing::warn!(%error, "send failed");
            }
        })
    }

    /// Saves a draft in the background. Entirely-empty drafts are skipped.
    pub fn save_draft(&self, email: OutgoingEmail) -> Option<JoinHandle<()>> {
        if email.is_empty() {
            return None;
        }
        let transport = Arc::clone(&self.transport);
        Some(tokio::spawn(async move {
            if let Err(error) = transport.save_draft(&email).await {
                tracing::warn!(%error, "draft save failed");
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingEmail>>,
        drafts: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait::async_trait]
    impl MailTransport for RecordingTransport {
        async fn send_email(&self, email: &OutgoingEmail) -> Result<()> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }

        async fn save_draft(&self, email: &OutgoingEmail) -> Result<()> {
            self.drafts.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn email_to(recipient: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: vec![recipient.to_string()],
            subject: "Status".to_string(),
            body: "On track.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn emptiness_checks_recipients_subject_and_body() {
        assert!(OutgoingEmail::default().is_empty());
        assert!(OutgoingEmail {
            subject: "   ".to_string(),
            ..Default::default()
        }
        .is_empty());
        assert!(!email_to("alice@example.com").is_empty());
        assert!(!OutgoingEmail {
            body: "draft text".to_string(),
            ..Default::default()
        }
        .is_empty());
    }

    #[tokio::test]
    async fn send_reaches_the_transport() {
        let transport = Arc::new(RecordingTransport::default());
        let service = ComposeService::new(Arc::clone(&transport) as Arc<dyn MailTransport>);

        service.send(email_to("alice@example.com")).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["alice@example.com"]);
    }

    #[tokio::test]
    async fn empty_drafts_are_skipped() {
        let transport = Arc::new(RecordingTransport::default());
        let service = ComposeService::new(Arc::clone(&transport) as Arc<dyn MailTransport>);

        assert!(service.save_draft(OutgoingEmail::default()).is_none());

        let handle = service.save_draft(email_to("bob@example.com")).unwrap();
        handle.await.unwrap();
        assert_eq!(transport.drafts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_swallowed() {
        struct FailingTransport;

        #[async_trait::async_trait]
        impl MailTransport for FailingTransport {
            async fn send_email(&self, _email: &OutgoingEmail) -> Result<()> {
                Err(anyhow::anyhow!("smtp unavailable"))
            }

            async fn save_draft(&self, _email: &OutgoingEmail) -> Result<()> {
                Err(anyhow::anyhow!("storage unavailable"))
            }
        }

        let service = ComposeService::new(Arc::new(FailingTransport));
        service.send(email_to("alice@example.com")).await.unwrap();
    }
}
