//! Email domain types.
//!
//! Represents individual email records as delivered by the poll collaborator,
//! plus the conversation wrapper the view pipeline hands to consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmailId, LabelId};

/// Intent classification applied when a record carries no explicit tag.
pub const DEFAULT_INTENT: &str = "new";

/// A single reply message within an email's conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    pub id: String,
    /// Plain text body content.
    pub content: String,
}

/// An individual email record.
///
/// An email is always in exactly one of two states: active
/// (`is_deleted == false`) or soft-deleted (`is_deleted == true`, mirrored
/// into the store's removed collection). Label ids are stored by value and
/// may go stale when a label is deleted; readers skip ids that no longer
/// resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// Unique identifier for this email.
    pub id: EmailId,
    /// Sender address.
    pub from_address: String,
    /// Subject line.
    pub subject: String,
    /// Short preview of the email content.
    pub snippet: String,
    /// Reply messages in this conversation.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Whether the email has been read.
    pub is_read: bool,
    /// Whether the email is starred.
    pub is_starred: bool,
    /// Whether the email is soft-deleted.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the email was created.
    pub created_at: DateTime<Utc>,
    /// User-assigned label ids.
    #[serde(default)]
    pub labels: Vec<LabelId>,
    /// Raw intent classification from the poll source, if any.
    #[serde(default)]
    pub intent: Option<String>,
}

impl Email {
    /// Returns the intent classification, falling back to [`DEFAULT_INTENT`]
    /// when the record carries no tag.
    pub fn intent_label(&self) -> &str {
        self.intent.as_deref().unwrap_or(DEFAULT_INTENT)
    }

    /// Checks whether a label id is assigned to this email.
    pub fn has_label(&self, label_id: &LabelId) -> bool {
        self.labels.contains(label_id)
    }
}

/// The unit of display derived from an email record.
///
/// Conversations map one-to-one onto emails; no cross-email threading is
/// performed. Consumers receive owned snapshots and must not feed them back
/// into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// The root email record.
    pub email: Email,
}

impl Conversation {
    /// Wraps an email record as a conversation root.
    pub fn new(email: Email) -> Self {
        Self { email }
    }

    /// Returns the conversation identifier (the root email's id).
    pub fn id(&self) -> &EmailId {
        &self.email.id
    }
}
