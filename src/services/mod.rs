//! Collaborator-facing services around the engine core.
//!
//! Services own the asynchronous edges of the system: the poll loop that
//! refreshes the store, outbound send/save-draft dispatch, and first-run
//! session seeding. The engine itself stays synchronous; these modules
//! adapt it to the host's runtime.

mod compose_service;
mod poll_service;
mod session;

pub use compose_service::{ComposeService, MailTransport, OutgoingEmail};
pub use poll_service::{
    EngineEvent, MailFetch, NewMessageAlert, PollPage, PollQuery, PollScheduler, PollTracker,
    ALERT_AUTO_DISMISS,
};
pub use session::{bootstrap_session, SessionStore, DEFAULT_PROJECT, PROJECT_KEY, USER_KEY};
