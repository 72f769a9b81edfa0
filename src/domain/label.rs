//! Label domain types.
//!
//! User-created labels are explicitly assigned to emails by identifier.
//! System labels are built-in categories matched by content heuristics,
//! never assigned; their definitions live in a declarative table so the
//! view pipeline and count aggregator share the same predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, LabelId};

/// An email label (system category or user-created tag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier for this label.
    pub id: LabelId,
    /// Display name of the label.
    pub name: String,
    /// Color for UI display (hex format, e.g., "#ff0000").
    pub color: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Whether this is a built-in system label.
    pub is_system: bool,
    /// Optional category used for grouping in navigation ("intent",
    /// "corporate", ...). Has no filtering semantics.
    pub category: Option<String>,
    /// When the label was created.
    pub created_at: DateTime<Utc>,
}

/// Heuristic definition of a built-in system label.
///
/// A system label matches an email when the email's label list contains the
/// key, the sender address contains one of the domain substrings, the
/// subject contains one of the keywords (case-insensitive), or, where
/// `matches_starred` is set, the email is starred.
#[derive(Debug, Clone, Copy)]
pub struct SystemLabelDef {
    /// Stable key, doubling as the label-list value that matches.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Sender-address substrings that match.
    pub sender_domains: &'static [&'static str],
    /// Subject keywords that match.
    pub subject_keywords: &'static [&'static str],
    /// Whether starred emails match regardless of content.
    pub matches_starred: bool,
}

impl SystemLabelDef {
    /// Applies the heuristic to an email.
    pub fn matches(&self, email: &Email) -> bool {
        if email.has_label(&LabelId::from(self.key)) {
            return true;
        }
        if self.matches_starred && email.is_starred {
            return true;
        }
        let sender = email.from_address.to_lowercase();
        if self.sender_domains.iter().any(|d| sender.contains(d)) {
            return true;
        }
        let subject = email.subject.to_lowercase();
        self.subject_keywords.iter().any(|k| subject.contains(k))
    }
}

/// Built-in system label definitions.
pub const SYSTEM_LABELS: &[SystemLabelDef] = &[
    SystemLabelDef {
        key: "work",
        name: "Work",
        sender_domains: &[
            "company.com",
            "techcorp.com",
            "consulting.com",
            "design.studio",
        ],
        subject_keywords: &["project", "meeting", "campaign"],
        matches_starred: false,
    },
    SystemLabelDef {
        key: "personal",
        name: "Personal",
        sender_domains: &["startup.io"],
        subject_keywords: &["welcome"],
        matches_starred: false,
    },
    SystemLabelDef {
        key: "important",
        name: "Important",
        sender_domains: &[],
        subject_keywords: &["urgent", "important"],
        matches_starred: true,
    },
    SystemLabelDef {
        key: "travel",
        name: "Travel",
        sender_domains: &[],
        subject_keywords: &[],
        matches_starred: false,
    },
];

/// Looks up a system label definition by key.
pub fn system_label(key: &str) -> Option<&'static SystemLabelDef> {
    SYSTEM_LABELS.iter().find(|def| def.key == key)
}
