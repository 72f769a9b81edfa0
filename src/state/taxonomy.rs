//! User label taxonomy.
//!
//! [`LabelTaxonomy`] owns the set of user-created label definitions. Name
//! validation failures are surfaced as recoverable [`LabelError`]s so the
//! caller can re-prompt; they are never fatal. Built-in system labels are
//! not stored here — they live in the static heuristic table in the domain
//! layer and are matched by content, never assigned.

use chrono::Utc;
use thiserror::Error;

use crate::domain::{Label, LabelId};

/// Minimum label name length in characters.
pub const MIN_NAME_LEN: usize = 2;

/// Maximum label name length in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Errors that can occur during label operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    /// Name shorter than [`MIN_NAME_LEN`] after trimming.
    #[error("label name must be at least {MIN_NAME_LEN} characters")]
    NameTooShort,

    /// Name longer than [`MAX_NAME_LEN`] after trimming.
    #[error("label name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,

    /// A live label already uses this name (case-insensitive).
    #[error("a label named \"{0}\" already exists")]
    DuplicateName(String),
}

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Partial update for an existing label. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    /// New display name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// New category, or `Some(None)` to clear it.
    pub category: Option<Option<String>>,
}

/// The set of user-created label definitions.
#[derive(Debug, Default)]
pub struct LabelTaxonomy {
    labels: Vec<Label>,
}

impl LabelTaxonomy {
    /// Creates an empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a taxonomy seeded with existing labels.
    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// All live labels, in creation order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Looks up a label by id.
    pub fn get(&self, id: &LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| &l.id == id)
    }

    /// Creates a new user label.
    ///
    /// The name is trimmed before validation. Ids are unique and stable for
    /// the label's lifetime.
    pub fn create(
        &mut self,
        name: &str,
        color: &str,
        description: Option<String>,
        category: Option<String>,
    ) -> LabelResult<Label> {
        let name = name.trim();
        self.validate_name(name, None)?;

        let label = Label {
            id: LabelId::from(format!("custom-{}", uuid::Uuid::new_v4())),
            name: name.to_string(),
            color: color.to_string(),
            description,
            is_system: false,
            category,
            created_at: Utc::now(),
        };

        self.labels.push(label.clone());
        Ok(label)
    }

    /// Merges a patch into an existing label.
    ///
    /// Returns `Ok(None)` for an unknown id; name validation applies the
    /// same rules as [`LabelTaxonomy::create`], excluding the label being
    /// edited from the duplicate check.
    pub fn update(&mut self, id: &LabelId, patch: LabelPatch) -> LabelResult<Option<Label>> {
        let Some(index) = self.labels.iter().position(|l| &l.id == id) else {
            return Ok(None);
        };

        let name = match &patch.name {
            Some(name) => {
                let name = name.trim().to_string();
                self.validate_name(&name, Some(id))?;
                Some(name)
            }
            None => None,
        };

        let label = &mut self.labels[index];
        if let Some(name) = name {
            label.name = name;
        }
        if let Some(color) = patch.color {
            label.color = color;
        }
        if let Some(description) = patch.description {
            label.description = description;
        }
        if let Some(category) = patch.category {
            label.category = category;
        }

        Ok(Some(label.clone()))
    }

    /// Removes a label definition, returning it when it existed.
    ///
    /// The caller is responsible for cascading the removal into the email
    /// store and for leaving any navigation section that referenced the id.
    pub fn remove(&mut self, id: &LabelId) -> Option<Label> {
        let index = self.labels.iter().position(|l| &l.id == id)?;
        Some(self.labels.remove(index))
    }

    fn validate_name(&self, name: &str, exclude: Option<&LabelId>) -> LabelResult<()> {
        let chars = name.chars().count();
        if chars < MIN_NAME_LEN {
            return Err(LabelError::NameTooShort);
        }
        if chars > MAX_NAME_LEN {
            return Err(LabelError::NameTooLong);
        }

        let lowered = name.to_lowercase();
        let duplicate = self
            .labels
            .iter()
            .filter(|l| exclude.map_or(true, |id| &l.id != id))
            .any(|l| l.name.to_lowercase() == lowered);
        if duplicate {
            return Err(LabelError::DuplicateName(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_label() {
        let mut taxonomy = LabelTaxonomy::new();
        let label = taxonomy
            .create("Clients", "#0066cc", None, Some("corporate".to_string()))
            .unwrap();

        assert_eq!(label.name, "Clients");
        assert!(!label.is_system);
        assert!(label.id.0.starts_with("custom-"));
        assert_eq!(taxonomy.labels().len(), 1);
    }

    #[test]
    fn create_trims_name() {
        let mut taxonomy = LabelTaxonomy::new();
        let label = taxonomy.create("  Clients  ", "#0066cc", None, None).unwrap();
        assert_eq!(label.name, "Clients");
    }

    #[test]
    fn create_rejects_short_and_long_names() {
        let mut taxonomy = LabelTaxonomy::new();

        assert_eq!(
            taxonomy.create("a", "#fff", None, None),
            Err(LabelError::NameTooShort)
        );
        assert_eq!(
            taxonomy.create("   x   ", "#fff", None, None),
            Err(LabelError::NameTooShort)
        );
        assert_eq!(
            taxonomy.create("this name is far too long", "#fff", None, None),
            Err(LabelError::NameTooLong)
        );
    }

    #[test]
    fn create_rejects_case_insensitive_duplicate() {
        let mut taxonomy = LabelTaxonomy::new();
        taxonomy.create("Work", "#fff", None, None).unwrap();

        assert_eq!(
            taxonomy.create("work", "#000", None, None),
            Err(LabelError::DuplicateName("work".to_string()))
        );
    }

    #[test]
    fn update_merges_fields() {
        let mut taxonomy = LabelTaxonomy::new();
        let label = taxonomy.create("Clients", "#0066cc", None, None).unwrap();

        let updated = taxonomy
            .update(
                &label.id,
                LabelPatch {
                    color: Some("#ff0000".to_string()),
                    description: Some(Some("Key accounts".to_string())),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Clients");
        assert_eq!(updated.color, "#ff0000");
        assert_eq!(updated.description, Some("Key accounts".to_string()));
    }

    #[test]
    fn update_rename_excludes_self_from_duplicate_check() {
        let mut taxonomy = LabelTaxonomy::new();
        let label = taxonomy.create("Clients", "#fff", None, None).unwrap();
        taxonomy.create("Invoices", "#fff", None, None).unwrap();

        let same_name = taxonomy.update(
            &label.id,
            LabelPatch {
                name: Some("clients".to_string()),
                ..Default::default()
            },
        );
        assert!(same_name.is_ok());

        let collision = taxonomy.update(
            &label.id,
            LabelPatch {
                name: Some("Invoices".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            collision,
            Err(LabelError::DuplicateName("Invoices".to_string()))
        );
    }

    #[test]
    fn update_unknown_id_is_benign() {
        let mut taxonomy = LabelTaxonomy::new();
        let result = taxonomy.update(&LabelId::from("missing"), LabelPatch::default());
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn remove_frees_the_name() {
        let mut taxonomy = LabelTaxonomy::new();
        let label = taxonomy.create("Clients", "#fff", None, None).unwrap();

        assert!(taxonomy.remove(&label.id).is_some());
        assert!(taxonomy.remove(&label.id).is_none());
        assert!(taxonomy.create("Clients", "#fff", None, None).is_ok());
    }
}
