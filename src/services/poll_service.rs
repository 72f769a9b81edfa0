//! Polling service for mailbox refresh.
//!
//! The engine does not talk to the network itself: an external fetch
//! collaborator implements [`MailFetch`] and the [`PollScheduler`] drives it
//! on a fixed interval, feeding each page into the engine. New-message
//! detection is a two-state machine over the total matching count; it never
//! fires on the first poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use crate::domain::Email;
use crate::state::MailEngine;

/// How long the caller should keep a new-message notification on screen.
pub const ALERT_AUTO_DISMISS: Duration = Duration::from_secs(3);

/// Parameters for one fetch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
    /// Optional server-side search term.
    pub search: Option<String>,
    /// Folder to list.
    pub folder: String,
}

impl Default for PollQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
            search: None,
            folder: "inbox".to_string(),
        }
    }
}

/// One page of poll results.
///
/// A page with absent `results` means "no update": the store keeps its prior
/// state, though the total count is still observed for diffing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollPage {
    /// The full result set, when present.
    #[serde(default)]
    pub results: Option<Vec<Email>>,
    /// Total matching count on the server.
    pub count: u64,
}

/// External fetch collaborator.
#[async_trait::async_trait]
pub trait MailFetch: Send + Sync {
    /// Fetches one page of mailbox results.
    async fn fetch_page(&self, query: &PollQuery) -> Result<PollPage>;
}

/// Two-state detector for poll-to-poll count changes.
///
/// Starts uninitialized; the first observation transitions to tracking
/// silently. From then on, any change in the observed total yields the
/// signed delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollTracker {
    last_count: Option<u64>,
}

impl PollTracker {
    /// Creates an uninitialized tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a poll total, returning the signed delta when tracking and
    /// the total changed.
    pub fn observe(&mut self, count: u64) -> Option<i64> {
        let delta = match self.last_count {
            Some(last) if last != count => Some(count as i64 - last as i64),
            _ => None,
        };
        self.last_count = Some(count);
        delta
    }

    /// True once at least one poll has been observed.
    pub fn is_tracking(&self) -> bool {
        self.last_count.is_some()
    }
}

/// One-shot notification for the caller to display and auto-dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMessageAlert {
    /// Signed change in the total matching count.
    pub delta: i64,
    /// Suggested display duration.
    pub auto_dismiss: Duration,
}

impl NewMessageAlert {
    /// Creates an alert with the standard auto-dismiss duration.
    pub fn new(delta: i64) -> Self {
        Self {
            delta,
            auto_dismiss: ALERT_AUTO_DISMISS,
        }
    }
}

/// Event emitted by the poll scheduler.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The total matching count changed between polls.
    NewMessages {
        /// Signed change in the total.
        delta: i64,
    },
    /// A poll attempt failed; state was left untouched.
    PollFailed {
        /// Collaborator error description.
        error: String,
    },
}

/// Background scheduler that polls on a fixed interval.
///
/// A failed fetch leaves all engine state untouched and is retried on the
/// next interval; there is no internal backoff. Tearing the scheduler down
/// stops the timer; an in-flight fetch completes without effect.
pub struct PollScheduler {
    stop_flag: Arc<AtomicBool>,
    events: broadcast::Sender<EngineEvent>,
    task: JoinHandle<()>,
}

impl PollScheduler {
    /// Starts polling the fetch collaborator into the engine.
    ///
    /// The first poll is issued immediately, then every `interval`.
    pub fn start(
        engine: Arc<Mutex<MailEngine>>,
        fetcher: Arc<dyn MailFetch>,
        query: PollQuery,
        interval: Duration,
    ) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (events, _) = broadcast::channel(16);

        let stop = Arc::clone(&stop_flag);
        let sender = events.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                match fetcher.fetch_page(&query).await {
                    Ok(page) => {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let alert = engine.lock().await.ingest_poll(page);
                        if let Some(alert) = alert {
                            let _ = sender.send(EngineEvent::NewMessages { delta: alert.delta });
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "poll failed; keeping prior state");
                        let _ = sender.send(EngineEvent::PollFailed {
                            error: error.to_string(),
                        });
                    }
                }
            }
        });

        Self {
            stop_flag,
            events,
            task,
        }
    }

    /// Subscribes to scheduler events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Stops the poll timer. Idempotent.
    pub fn shutdown(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.task.abort();
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
