//! View filter configuration.
//!
//! [`FilterOptions`] is the active view configuration, replaced wholesale on
//! every UI change. The intent selector carries its tag mapping and keyword
//! fallback as data so the pipeline stays a flat predicate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Read-status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    /// All emails regardless of read state.
    #[default]
    All,
    /// Only read emails.
    Read,
    /// Only unread emails.
    Unread,
}

/// Sort key for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Newest first by creation timestamp.
    #[default]
    Newest,
    /// Oldest first by creation timestamp.
    Oldest,
    /// Subject ascending.
    SubjectAz,
    /// Subject descending.
    SubjectZa,
    /// Sender address ascending.
    SenderAz,
    /// Sender address descending.
    SenderZa,
    /// Starred first, newest first within each group.
    StarredFirst,
}

/// Inclusive date range; the upper bound covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound, treated as end-of-day.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Returns true when neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Intent filter selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentFilter {
    /// No intent filtering.
    #[default]
    All,
    /// Meeting requests and scheduling.
    Meetings,
    /// System and automated notifications.
    Notifications,
    /// Announcements and marketing campaigns.
    Campaigns,
    /// Support and feedback threads.
    Support,
    /// Unclassified mail.
    New,
}

impl IntentFilter {
    /// The literal intent tag this selector matches, if any.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            IntentFilter::Meetings => Some("meeting"),
            IntentFilter::Notifications => Some("system"),
            IntentFilter::Campaigns => Some("announcement"),
            IntentFilter::Support => Some("feedback"),
            IntentFilter::All | IntentFilter::New => None,
        }
    }

    /// Keywords searched over subject and preview when a record carries no
    /// intent tag.
    pub fn fallback_keywords(&self) -> &'static [&'static str] {
        match self {
            IntentFilter::Meetings => &["meeting", "schedule", "appointment"],
            IntentFilter::Notifications => &["notification", "system", "alert"],
            IntentFilter::Campaigns => &["newsletter", "campaign", "marketing"],
            IntentFilter::Support => &["support", "help", "issue"],
            IntentFilter::All | IntentFilter::New => &[],
        }
    }
}

/// The active view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Read-status selector.
    pub read_status: ReadStatus,
    /// Only starred emails.
    pub starred: bool,
    /// Only emails whose replies mention an attachment.
    pub has_attachment: bool,
    /// Sort key.
    pub sort: SortKey,
    /// Inclusive creation-date range.
    pub date_range: DateRange,
    /// Intent selector.
    pub intent: IntentFilter,
}

impl FilterOptions {
    /// Returns true when every field is at its neutral default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
