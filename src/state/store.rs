//! The authoritative in-memory email collection.
//!
//! [`EmailStore`] owns the active records plus a parallel removed collection
//! of soft-deleted records. A poll batch is ground truth: it replaces the
//! active collection wholesale and the removed collection is repopulated
//! from records the batch already flags as deleted. All mutations are total
//! functions; unknown identifiers are silently ignored.

use crate::domain::{Email, EmailId, LabelId};

/// Mutable collection of email records for one browsing session.
#[derive(Debug, Default)]
pub struct EmailStore {
    emails: Vec<Email>,
    removed: Vec<Email>,
}

impl EmailStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active collection with the latest poll batch.
    ///
    /// The removed collection is rebuilt from records the batch flags as
    /// deleted; local state that the batch does not reflect is dropped.
    pub fn apply_batch(&mut self, results: Vec<Email>) {
        self.removed = results.iter().filter(|e| e.is_deleted).cloned().collect();
        self.emails = results;
    }

    /// All records, including soft-deleted ones.
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// The soft-deleted records.
    pub fn removed(&self) -> &[Email] {
        &self.removed
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| &e.id == id)
    }

    /// Returns clones of the records matching the given ids, in store order.
    pub fn collect(&self, ids: &[EmailId]) -> Vec<Email> {
        self.emails
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect()
    }

    /// Flips the starred flag on a record. Returns the new state, or `None`
    /// for an unknown id.
    pub fn toggle_star(&mut self, id: &EmailId) -> Option<bool> {
        let starred = {
            let email = self.emails.iter_mut().find(|e| &e.id == id)?;
            email.is_starred = !email.is_starred;
            email.is_starred
        };
        if let Some(copy) = self.removed.iter_mut().find(|e| &e.id == id) {
            copy.is_starred = starred;
        }
        Some(starred)
    }

    /// Sets the read flag on every matching record.
    pub fn set_read(&mut self, ids: &[EmailId], is_read: bool) {
        self.update_matching(ids, |e| e.is_read = is_read);
    }

    /// Replaces the label list on every matching record.
    pub fn set_labels(&mut self, ids: &[EmailId], labels: Vec<LabelId>) {
        self.update_matching(ids, |e| e.labels = labels.clone());
    }

    /// Removes a label id from every record's label list.
    pub fn strip_label(&mut self, label_id: &LabelId) {
        for email in self.emails.iter_mut().chain(self.removed.iter_mut()) {
            email.labels.retain(|id| id != label_id);
        }
    }

    /// Soft-deletes the matching active records, appending the full flagged
    /// records to the removed collection.
    pub fn soft_delete(&mut self, ids: &[EmailId]) {
        for email in self.emails.iter_mut() {
            if !email.is_deleted && ids.contains(&email.id) {
                email.is_deleted = true;
                self.removed.push(email.clone());
            }
        }
    }

    /// Restores the matching soft-deleted records: the exact inverse of
    /// [`EmailStore::soft_delete`].
    pub fn restore(&mut self, ids: &[EmailId]) {
        let mut restored = Vec::new();
        self.removed.retain(|e| {
            if ids.contains(&e.id) {
                restored.push(e.id.clone());
                false
            } else {
                true
            }
        });
        for id in &restored {
            if let Some(email) = self.emails.iter_mut().find(|e| &e.id == id) {
                email.is_deleted = false;
            }
        }
    }

    /// Re-inserts pre-deletion records, replacing any flagged copies still in
    /// the active collection and dropping the ids from the removed
    /// collection. Used by undo-of-delete.
    pub fn reinstate(&mut self, records: Vec<Email>) {
        for record in records {
            self.removed.retain(|e| e.id != record.id);
            match self.emails.iter_mut().find(|e| e.id == record.id) {
                Some(existing) => *existing = record,
                None => self.emails.push(record),
            }
        }
    }

    /// Restores a per-record read snapshot by id.
    pub fn restore_read_states(&mut self, prior: &[(EmailId, bool)]) {
        for (id, is_read) in prior {
            self.update_matching(std::slice::from_ref(id), |e| e.is_read = *is_read);
        }
    }

    /// Sets the starred flag on a record to a specific value.
    pub fn set_starred(&mut self, id: &EmailId, is_starred: bool) {
        self.update_matching(std::slice::from_ref(id), |e| e.is_starred = is_starred);
    }

    fn update_matching(&mut self, ids: &[EmailId], mut apply: impl FnMut(&mut Email)) {
        for email in self.emails.iter_mut().chain(self.removed.iter_mut()) {
            if ids.contains(&email.id) {
                apply(email);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn email(id: &str) -> Email {
        Email {
            id: EmailId::from(id),
            from_address: format!("{id}@example.com"),
            subject: format!("Subject {id}"),
            snippet: String::new(),
            messages: vec![],
            is_read: false,
            is_starred: false,
            is_deleted: false,
            created_at: Utc::now(),
            labels: vec![],
            intent: None,
        }
    }

    fn ids(raw: &[&str]) -> Vec<EmailId> {
        raw.iter().map(|s| EmailId::from(*s)).collect()
    }

    /// Every record is either active-non-deleted, or flagged and mirrored in
    /// the removed collection, never both and never neither.
    fn assert_partition(store: &EmailStore) {
        for email in store.emails() {
            let in_removed = store.removed().iter().any(|e| e.id == email.id);
            if email.is_deleted {
                assert!(in_removed, "{} flagged but not in removed", email.id);
            } else {
                assert!(!in_removed, "{} active but in removed", email.id);
            }
        }
        for copy in store.removed() {
            assert!(copy.is_deleted, "{} in removed without flag", copy.id);
        }
    }

    #[test]
    fn apply_batch_replaces_and_repopulates_removed() {
        let mut store = EmailStore::new();
        store.apply_batch(vec![email("a")]);

        let mut deleted = email("b");
        deleted.is_deleted = true;
        store.apply_batch(vec![email("c"), deleted]);

        assert_eq!(store.emails().len(), 2);
        assert_eq!(store.removed().len(), 1);
        assert_eq!(store.removed()[0].id, EmailId::from("b"));
        assert!(store.get(&EmailId::from("a")).is_none());
        assert_partition(&store);
    }

    #[test]
    fn toggle_star_flips_and_reports() {
        let mut store = EmailStore::new();
        store.apply_batch(vec![email("a")]);

        assert_eq!(store.toggle_star(&EmailId::from("a")), Some(true));
        assert_eq!(store.toggle_star(&EmailId::from("a")), Some(false));
        assert_eq!(store.toggle_star(&EmailId::from("missing")), None);
    }

    #[test]
    fn set_read_ignores_unknown_ids() {
        let mut store = EmailStore::new();
        store.apply_batch(vec![email("a"), email("b")]);

        store.set_read(&ids(&["a", "missing"]), true);

        assert!(store.get(&EmailId::from("a")).unwrap().is_read);
        assert!(!store.get(&EmailId::from("b")).unwrap().is_read);
    }

    #[test]
    fn soft_delete_then_restore_round_trips() {
        let mut store = EmailStore::new();
        let mut original = email("a");
        original.is_starred = true;
        original.labels = vec![LabelId::from("custom-1")];
        store.apply_batch(vec![original.clone(), email("b")]);

        store.soft_delete(&ids(&["a"]));
        assert!(store.get(&EmailId::from("a")).unwrap().is_deleted);
        assert_eq!(store.removed().len(), 1);
        assert_partition(&store);

        store.restore(&ids(&["a"]));
        assert_eq!(store.get(&EmailId::from("a")), Some(&original));
        assert!(store.removed().is_empty());
        assert_partition(&store);
    }

    #[test]
    fn soft_delete_twice_does_not_duplicate() {
        let mut store = EmailStore::new();
        store.apply_batch(vec![email("a")]);

        store.soft_delete(&ids(&["a"]));
        store.soft_delete(&ids(&["a"]));

        assert_eq!(store.removed().len(), 1);
        assert_partition(&store);
    }

    #[test]
    fn mutations_reach_removed_copies() {
        let mut store = EmailStore::new();
        store.apply_batch(vec![email("a")]);
        store.soft_delete(&ids(&["a"]));

        store.set_read(&ids(&["a"]), true);
        assert!(store.removed()[0].is_read);

        store.toggle_star(&EmailId::from("a"));
        assert!(store.removed()[0].is_starred);
    }

    #[test]
    fn reinstate_replaces_flagged_copy() {
        let mut store = EmailStore::new();
        let original = email("a");
        store.apply_batch(vec![original.clone()]);
        store.soft_delete(&ids(&["a"]));

        store.reinstate(vec![original.clone()]);

        assert_eq!(store.emails().len(), 1);
        assert_eq!(store.get(&EmailId::from("a")), Some(&original));
        assert!(store.removed().is_empty());
        assert_partition(&store);
    }

    #[test]
    fn strip_label_touches_both_collections() {
        let mut store = EmailStore::new();
        let mut a = email("a");
        a.labels = vec![LabelId::from("custom-1"), LabelId::from("custom-2")];
        let mut b = email("b");
        b.labels = vec![LabelId::from("custom-1")];
        store.apply_batch(vec![a, b]);
        store.soft_delete(&ids(&["b"]));

        store.strip_label(&LabelId::from("custom-1"));

        assert_eq!(
            store.get(&EmailId::from("a")).unwrap().labels,
            vec![LabelId::from("custom-2")]
        );
        assert!(store.removed()[0].labels.is_empty());
    }
}
