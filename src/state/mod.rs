//! Engine state: the store, taxonomy, and the [`MailEngine`] facade.
//!
//! [`MailEngine`] is the explicit state container the rest of the
//! application talks to: it owns the email store, the label taxonomy, the
//! active view inputs (section, search, filters), the selection set, the
//! single-level undo record, and the poll tracker. Every mutation runs to
//! completion before the next is observed; view derivation and counts are
//! pure functions of the latest state, recomputed (and memoized) after the
//! fact rather than racing with mutations.

mod store;
mod taxonomy;
mod undo;

pub use store::EmailStore;
pub use taxonomy::{
    LabelError, LabelPatch, LabelResult, LabelTaxonomy, MAX_NAME_LEN, MIN_NAME_LEN,
};
pub use undo::LastAction;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Conversation, Email, EmailId, FilterOptions, Label, LabelId};
use crate::services::{NewMessageAlert, PollPage, PollTracker};
use crate::view::{derive_view, email_counts, Section};

/// Inputs the memoized view depends on.
#[derive(Debug, Clone, PartialEq)]
struct ViewKey {
    revision: u64,
    section: Section,
    query: String,
    filters: FilterOptions,
}

/// The session-wide state container and mutation API.
#[derive(Default)]
pub struct MailEngine {
    store: EmailStore,
    taxonomy: LabelTaxonomy,
    section: Section,
    query: String,
    filters: FilterOptions,
    selection: HashSet<EmailId>,
    last_action: Option<LastAction>,
    tracker: PollTracker,
    revision: u64,
    view_cache: Option<(ViewKey, Vec<Conversation>)>,
}

impl MailEngine {
    /// Creates an engine with no emails and an empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine seeded with existing labels.
    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self {
            taxonomy: LabelTaxonomy::with_labels(labels),
            ..Default::default()
        }
    }

    // --- Poll ingestion ---

    /// Ingests one poll page.
    ///
    /// The result set, when present, replaces the store wholesale; a page
    /// without results leaves prior state untouched. The total count is
    /// always observed, and a change since the previous poll yields a
    /// one-shot alert for the caller to display. The first poll is silent.
    pub fn ingest_poll(&mut self, page: PollPage) -> Option<NewMessageAlert> {
        let alert = self.tracker.observe(page.count).map(NewMessageAlert::new);

        if let Some(results) = page.results {
            debug!(emails = results.len(), count = page.count, "applying poll batch");
            self.store.apply_batch(results);
            self.touch();
        }

        alert
    }

    /// The poll-diff tracker.
    pub fn tracker(&self) -> &PollTracker {
        &self.tracker
    }

    // --- View inputs ---

    /// Navigates to a section, clearing the selection.
    pub fn navigate(&mut self, section: Section) {
        self.section = section;
        self.selection.clear();
    }

    /// The active section.
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Sets the search query.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The current search query.
    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// Replaces the filter configuration wholesale.
    pub fn set_filters(&mut self, filters: FilterOptions) {
        self.filters = filters;
    }

    /// The active filter configuration.
    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    // --- Derived outputs ---

    /// The derived conversation list for the current view inputs.
    ///
    /// Recomputed only when the store, taxonomy, or view inputs changed
    /// since the last call.
    pub fn conversations(&mut self) -> &[Conversation] {
        let key = ViewKey {
            revision: self.revision,
            section: self.section.clone(),
            query: self.query.clone(),
            filters: self.filters.clone(),
        };

        let stale = !matches!(&self.view_cache, Some((cached, _)) if *cached == key);
        if stale {
            let view = derive_view(
                self.store.emails(),
                self.store.removed(),
                self.taxonomy.labels(),
                &self.section,
                &self.query,
                &self.filters,
            );
            self.view_cache = Some((key, view));
        }

        match &self.view_cache {
            Some((_, view)) => view,
            None => &[],
        }
    }

    /// Count map for every navigable section and label.
    pub fn counts(&self) -> HashMap<String, usize> {
        email_counts(
            self.store.emails(),
            self.store.removed(),
            self.taxonomy.labels(),
        )
    }

    /// All records, including soft-deleted ones.
    pub fn emails(&self) -> &[Email] {
        self.store.emails()
    }

    /// The soft-deleted records.
    pub fn removed(&self) -> &[Email] {
        self.store.removed()
    }

    /// Looks up a record by id.
    pub fn email(&self, id: &EmailId) -> Option<&Email> {
        self.store.get(id)
    }

    /// All live user labels.
    pub fn labels(&self) -> &[Label] {
        self.taxonomy.labels()
    }

    /// Looks up a label by id.
    pub fn label(&self, id: &LabelId) -> Option<&Label> {
        self.taxonomy.get(id)
    }

    // --- Selection ---

    /// The checked email ids.
    pub fn selection(&self) -> &HashSet<EmailId> {
        &self.selection
    }

    /// Toggles one id in the selection.
    pub fn toggle_selection(&mut self, id: &EmailId) {
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
    }

    /// Selects every conversation in the current derived view.
    pub fn select_all(&mut self) {
        let ids: Vec<EmailId> = self.conversations().iter().map(|c| c.id().clone()).collect();
        self.selection = ids.into_iter().collect();
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Bulk actions & undo ---

    /// Flips the starred flag on a single email, recording the prior state.
    ///
    /// Unknown ids are ignored and leave any recorded action intact.
    pub fn toggle_star(&mut self, id: &EmailId) {
        let prior = match self.store.get(id) {
            Some(email) => email.is_starred,
            None => return,
        };

        self.last_action = Some(LastAction::Star {
            id: id.clone(),
            prior,
        });
        self.store.toggle_star(id);
        self.touch();
    }

    /// Sets the read flag on a set of emails, recording prior flags.
    ///
    /// An id set that matches no records changes nothing, including the
    /// recorded undo action.
    pub fn mark_read(&mut self, ids: &[EmailId], is_read: bool) {
        if ids.is_empty() {
            return;
        }

        let prior: Vec<(EmailId, bool)> = self
            .store
            .collect(ids)
            .into_iter()
            .map(|e| (e.id, e.is_read))
            .collect();
        if prior.is_empty() {
            return;
        }
        self.last_action = Some(LastAction::MarkAsRead {
            ids: ids.to_vec(),
            prior,
        });

        self.store.set_read(ids, is_read);
        self.selection.clear();
        self.touch();
    }

    /// Soft-deletes a set of emails, recording the full prior records.
    ///
    /// Ids that are unknown or already deleted are skipped; when nothing is
    /// left to delete, the operation changes nothing.
    pub fn delete(&mut self, ids: &[EmailId]) {
        if ids.is_empty() {
            return;
        }

        let prior: Vec<Email> = self
            .store
            .collect(ids)
            .into_iter()
            .filter(|e| !e.is_deleted)
            .collect();
        if prior.is_empty() {
            return;
        }
        self.last_action = Some(LastAction::Delete {
            ids: ids.to_vec(),
            prior,
        });

        self.store.soft_delete(ids);
        self.selection.clear();
        self.touch();
    }

    /// Restores a set of soft-deleted emails. Not undoable.
    pub fn restore(&mut self, ids: &[EmailId]) {
        if ids.is_empty() {
            return;
        }

        self.store.restore(ids);
        self.selection.clear();
        self.touch();
    }

    /// Replaces the label list on a set of emails. Not undoable.
    pub fn set_labels(&mut self, ids: &[EmailId], labels: Vec<LabelId>) {
        if ids.is_empty() {
            return;
        }

        self.store.set_labels(ids, labels);
        self.selection.clear();
        self.touch();
    }

    /// The currently recorded undoable action, if any.
    pub fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    /// Reverses the most recent bulk action.
    ///
    /// Consumes the record; a second call is a no-op until another bulk
    /// action runs. Returns a short description of what was undone.
    pub fn undo(&mut self) -> Option<&'static str> {
        let action = self.last_action.take()?;
        let description = action.description();

        match action {
            LastAction::MarkAsRead { prior, .. } => {
                self.store.restore_read_states(&prior);
            }
            LastAction::Delete { prior, .. } => {
                self.store.reinstate(prior);
            }
            LastAction::Star { id, prior } => {
                self.store.set_starred(&id, prior);
            }
        }

        self.touch();
        Some(description)
    }

    // --- Label management ---

    /// Creates a user label.
    pub fn create_label(
        &mut self,
        name: &str,
        color: &str,
        description: Option<String>,
        category: Option<String>,
    ) -> LabelResult<Label> {
        let label = self.taxonomy.create(name, color, description, category)?;
        self.touch();
        Ok(label)
    }

    /// Merges a patch into an existing label. Unknown ids yield `Ok(None)`.
    pub fn update_label(&mut self, id: &LabelId, patch: LabelPatch) -> LabelResult<Option<Label>> {
        let updated = self.taxonomy.update(id, patch)?;
        if updated.is_some() {
            self.touch();
        }
        Ok(updated)
    }

    /// Deletes a label, stripping its id from every email.
    ///
    /// When the active section was the deleted label, navigation falls back
    /// to the inbox. Returns the deleted id so the caller can react too;
    /// unknown ids return `None` and change nothing.
    pub fn delete_label(&mut self, id: &LabelId) -> Option<LabelId> {
        let label = self.taxonomy.remove(id)?;
        self.store.strip_label(id);

        if self.section == Section::Custom(id.clone()) {
            self.navigate(Section::Inbox);
        }

        debug!(label = %label.id, "deleted label");
        self.touch();
        Some(label.id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
