//! The view derivation pipeline.
//!
//! A deterministic, order-sensitive pure transform: raw emails become
//! conversations, then pass through section, search, and attribute filters
//! before sorting. The pipeline never mutates its inputs; callers receive an
//! owned snapshot. Stage order matters and matches the navigation surface:
//! section first, then search, then attribute filters, then sort.

use std::cmp::Ordering;

use crate::domain::{
    system_label, Conversation, Email, FilterOptions, IntentFilter, Label, LabelId, ReadStatus,
    SortKey,
};

/// Keywords treated as evidence that a reply carries an attachment.
const ATTACHMENT_KEYWORDS: &[&str] = &["attach", "file", "document"];

/// A navigable section of the mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Section {
    /// Active, non-deleted conversations.
    #[default]
    Inbox,
    /// Starred conversations.
    Starred,
    /// Snoozed conversations. Intentionally always empty.
    Snoozed,
    /// Soft-deleted conversations.
    Bin,
    /// A built-in system label, matched heuristically.
    System(String),
    /// A user-created label, matched by membership.
    Custom(LabelId),
}

impl Section {
    /// Parses a navigation key (`inbox`, `label-work`, `custom-label-<id>`).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "inbox" => Some(Section::Inbox),
            "starred" => Some(Section::Starred),
            "snoozed" => Some(Section::Snoozed),
            "bin" => Some(Section::Bin),
            _ => {
                if let Some(system_key) = key.strip_prefix("label-") {
                    system_label(system_key).map(|def| Section::System(def.key.to_string()))
                } else {
                    key.strip_prefix("custom-label-")
                        .map(|id| Section::Custom(LabelId::from(id)))
                }
            }
        }
    }

    /// The navigation key for this section.
    pub fn key(&self) -> String {
        match self {
            Section::Inbox => "inbox".to_string(),
            Section::Starred => "starred".to_string(),
            Section::Snoozed => "snoozed".to_string(),
            Section::Bin => "bin".to_string(),
            Section::System(key) => format!("label-{key}"),
            Section::Custom(id) => format!("custom-label-{id}"),
        }
    }

    /// Membership predicate over an active email record.
    ///
    /// Soft-deleted records are excluded from every section except Bin,
    /// whose source is the removed collection rather than this predicate.
    pub fn admits(&self, email: &Email) -> bool {
        if email.is_deleted {
            return matches!(self, Section::Bin);
        }
        match self {
            Section::Inbox => true,
            Section::Starred => email.is_starred,
            Section::Snoozed => false,
            Section::Bin => false,
            Section::System(key) => system_label(key).is_some_and(|def| def.matches(email)),
            Section::Custom(id) => email.has_label(id),
        }
    }
}

/// Runs the full five-stage pipeline over the current state.
pub fn derive_view(
    active: &[Email],
    removed: &[Email],
    labels: &[Label],
    section: &Section,
    query: &str,
    filters: &FilterOptions,
) -> Vec<Conversation> {
    let mut conversations = match section {
        Section::Bin => group_conversations(removed),
        _ => group_conversations(active),
    };

    if !matches!(section, Section::Bin) {
        conversations.retain(|c| section.admits(&c.email));
    }

    let query = query.trim();
    if !query.is_empty() {
        let needle = query.to_lowercase();
        conversations.retain(|c| matches_search(&c.email, labels, &needle));
    }

    conversations.retain(|c| matches_attributes(&c.email, filters));

    sort_conversations(&mut conversations, filters.sort);
    conversations
}

/// Stage 1: each email becomes a conversation root, newest first as a
/// stable baseline before downstream sorting.
fn group_conversations(emails: &[Email]) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> =
        emails.iter().cloned().map(Conversation::new).collect();
    conversations.sort_by(|a, b| b.email.created_at.cmp(&a.email.created_at));
    conversations
}

/// Stage 3: case-insensitive substring match over subject, sender, preview,
/// reply bodies, and resolved label names. Stale label ids skip.
fn matches_search(email: &Email, labels: &[Label], needle: &str) -> bool {
    if email.subject.to_lowercase().contains(needle)
        || email.from_address.to_lowercase().contains(needle)
        || email.snippet.to_lowercase().contains(needle)
    {
        return true;
    }
    if email
        .messages
        .iter()
        .any(|m| m.content.to_lowercase().contains(needle))
    {
        return true;
    }
    email.labels.iter().any(|id| {
        labels
            .iter()
            .find(|l| &l.id == id)
            .is_some_and(|l| l.name.to_lowercase().contains(needle))
    })
}

/// Stage 4: attribute filters from [`FilterOptions`].
fn matches_attributes(email: &Email, filters: &FilterOptions) -> bool {
    match filters.read_status {
        ReadStatus::All => {}
        ReadStatus::Read => {
            if !email.is_read {
                return false;
            }
        }
        ReadStatus::Unread => {
            if email.is_read {
                return false;
            }
        }
    }

    if filters.starred && !email.is_starred {
        return false;
    }

    if filters.has_attachment && !mentions_attachment(email) {
        return false;
    }

    // Date-level comparison keeps both bounds inclusive, with the upper
    // bound covering the whole day.
    let date = email.created_at.date_naive();
    if let Some(from) = filters.date_range.from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = filters.date_range.to {
        if date > to {
            return false;
        }
    }

    matches_intent(email, filters.intent)
}

fn mentions_attachment(email: &Email) -> bool {
    email.messages.iter().any(|m| {
        let content = m.content.to_lowercase();
        ATTACHMENT_KEYWORDS.iter().any(|k| content.contains(k))
    })
}

/// Intent matching checks the literal tag against the selector's mapping;
/// records without a tag fall back to keyword search over subject and
/// preview, and read as "new" for the `New` selector.
fn matches_intent(email: &Email, intent: IntentFilter) -> bool {
    if intent == IntentFilter::All {
        return true;
    }

    match &email.intent {
        Some(tag) => match intent.tag() {
            Some(expected) => tag == expected,
            // Tagged records pass the `new` selector untouched.
            None => true,
        },
        None => {
            if intent == IntentFilter::New {
                return true;
            }
            let content = format!("{} {}", email.subject, email.snippet).to_lowercase();
            intent
                .fallback_keywords()
                .iter()
                .any(|k| content.contains(k))
        }
    }
}

/// Stage 5: sort by the selected key. String comparisons are
/// case-insensitive; starred-first falls back to newest-first within each
/// group.
fn sort_conversations(conversations: &mut [Conversation], sort: SortKey) {
    conversations.sort_by(|a, b| {
        let (a, b) = (&a.email, &b.email);
        match sort {
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::Oldest => a.created_at.cmp(&b.created_at),
            SortKey::SubjectAz => cmp_insensitive(&a.subject, &b.subject),
            SortKey::SubjectZa => cmp_insensitive(&b.subject, &a.subject),
            SortKey::SenderAz => cmp_insensitive(&a.from_address, &b.from_address),
            SortKey::SenderZa => cmp_insensitive(&b.from_address, &a.from_address),
            SortKey::StarredFirst => match (a.is_starred, b.is_starred) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => b.created_at.cmp(&a.created_at),
            },
        }
    });
}

fn cmp_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
