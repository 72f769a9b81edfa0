//! Single-level undo records for bulk actions.
//!
//! Each record carries the affected ids and a snapshot of only the fields
//! the action touched, taken before the mutation applied. Exactly one
//! record is retained; a new bulk action overwrites it.

use crate::domain::{Email, EmailId};

/// The most recent undoable bulk action.
#[derive(Debug, Clone)]
pub enum LastAction {
    /// Read flags were set; `prior` holds each record's previous flag.
    MarkAsRead {
        /// Affected email ids.
        ids: Vec<EmailId>,
        /// Previous read state per id.
        prior: Vec<(EmailId, bool)>,
    },
    /// Records were soft-deleted; `prior` holds the full pre-delete records.
    Delete {
        /// Affected email ids.
        ids: Vec<EmailId>,
        /// Full records as they were before deletion.
        prior: Vec<Email>,
    },
    /// A single starred flag was flipped.
    Star {
        /// Affected email id.
        id: EmailId,
        /// Previous starred state.
        prior: bool,
    },
}

impl LastAction {
    /// Short description for status surfaces.
    pub fn description(&self) -> &'static str {
        match self {
            LastAction::MarkAsRead { .. } => "mark as read",
            LastAction::Delete { .. } => "delete",
            LastAction::Star { .. } => "star",
        }
    }

    /// Ids the recorded action touched.
    pub fn affected_ids(&self) -> Vec<EmailId> {
        match self {
            LastAction::MarkAsRead { ids, .. } | LastAction::Delete { ids, .. } => ids.clone(),
            LastAction::Star { id, .. } => vec![id.clone()],
        }
    }
}
