//! Per-section and per-label count aggregation.
//!
//! Counts feed the navigation surface and reflect totals, not the current
//! view: section membership uses the same predicates as the pipeline, but
//! search and attribute filters are ignored. The map is recomputed fully on
//! every call.

use std::collections::HashMap;

use crate::domain::{Email, Label, SYSTEM_LABELS};

/// Computes the count map for every navigable section and label.
///
/// Keys are navigation keys: `inbox`, `starred`, `snoozed`, `bin`,
/// `label-<key>` for system labels and `custom-label-<id>` for user labels.
/// Inbox and starred count all qualifying emails; label entries count unread
/// only; bin counts the removed collection.
pub fn email_counts(
    active: &[Email],
    removed: &[Email],
    labels: &[Label],
) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    counts.insert(
        "inbox".to_string(),
        active.iter().filter(|e| !e.is_deleted).count(),
    );
    counts.insert(
        "starred".to_string(),
        active.iter().filter(|e| e.is_starred && !e.is_deleted).count(),
    );
    counts.insert("snoozed".to_string(), 0);
    counts.insert(
        "bin".to_string(),
        removed.iter().filter(|e| e.is_deleted).count(),
    );

    for def in SYSTEM_LABELS {
        let count = active
            .iter()
            .filter(|e| !e.is_deleted && !e.is_read && def.matches(e))
            .count();
        counts.insert(format!("label-{}", def.key), count);
    }

    for label in labels {
        let count = active
            .iter()
            .filter(|e| !e.is_deleted && !e.is_read && e.has_label(&label.id))
            .count();
        counts.insert(format!("custom-label-{}", label.id), count);
    }

    counts
}
