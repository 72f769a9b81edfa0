//! postroom - Demo driver for the engine
//!
//! Stands in for a presentation layer: polls a scripted fetch collaborator,
//! reacts to new-message events, and prints the derived view and counts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use postroom::domain::{Email, EmailId};
use postroom::services::{
    bootstrap_session, EngineEvent, MailFetch, PollPage, PollQuery, PollScheduler,
};
use postroom::MailEngine;

/// Fetch collaborator that replays a growing mailbox.
struct ScriptedFetch {
    polls: AtomicUsize,
}

#[async_trait::async_trait]
impl MailFetch for ScriptedFetch {
    async fn fetch_page(&self, _query: &PollQuery) -> anyhow::Result<PollPage> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst);
        let total = 2 + poll;
        let results: Vec<Email> = (0..total).map(sample_email).collect();
        Ok(PollPage {
            count: total as u64,
            results: Some(results),
        })
    }
}

fn sample_email(index: usize) -> Email {
    Email {
        id: EmailId::from(format!("email-{index}")),
        from_address: format!("sender{index}@techcorp.com"),
        subject: format!("Project update #{index}"),
        snippet: "Latest numbers attached.".to_string(),
        messages: vec![],
        is_read: index % 2 == 0,
        is_starred: index % 3 == 0,
        is_deleted: false,
        created_at: chrono::Utc::now() - chrono::Duration::minutes(index as i64),
        labels: vec![],
        intent: None,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting postroom demo");

    let mut session = std::collections::HashMap::new();
    bootstrap_session(&mut session);

    let engine = Arc::new(Mutex::new(MailEngine::new()));
    let fetcher = Arc::new(ScriptedFetch {
        polls: AtomicUsize::new(0),
    });

    let scheduler = PollScheduler::start(
        Arc::clone(&engine),
        fetcher,
        PollQuery::default(),
        Duration::from_secs(2),
    );
    let mut events = scheduler.subscribe();

    match tokio::time::timeout(Duration::from_secs(10), events.recv()).await {
        Ok(Ok(EngineEvent::NewMessages { delta })) => {
            tracing::info!(delta, "mailbox changed");
        }
        Ok(Ok(EngineEvent::PollFailed { error })) => {
            tracing::warn!(%error, "poll failed");
        }
        Ok(Err(_)) | Err(_) => {
            tracing::warn!("no poll events observed");
        }
    }

    scheduler.shutdown();

    let mut engine = engine.lock().await;
    for conversation in engine.conversations() {
        tracing::info!(
            id = %conversation.id(),
            subject = %conversation.email.subject,
            "visible conversation"
        );
    }
    for (key, count) in engine.counts() {
        tracing::info!(%key, count, "section count");
    }
}
