//! Identifier newtypes shared across the engine.
//!
//! Emails and labels are addressed by opaque string ids, handed to us by the
//! poll source or minted locally. Wrapping them keeps the two id spaces from
//! being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single email record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailId(pub String);

/// Identifier of a label: a system key such as `work`, or a generated
/// `custom-<uuid>` for user-created labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(pub String);

impl EmailId {
    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl LabelId {
    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EmailId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for EmailId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for LabelId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for LabelId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_as_str_expose_the_raw_id() {
        let id = EmailId::from("email-1");
        assert_eq!(id.to_string(), "email-1");
        assert_eq!(id.as_str(), "email-1");
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(EmailId::from("email-1"));
        assert!(set.contains(&EmailId::from("email-1")));
    }

    #[test]
    fn label_ids_compare_by_value() {
        assert_eq!(LabelId::from("work"), LabelId::from("work".to_string()));
        assert_ne!(LabelId::from("work"), LabelId::from("personal"));
    }
}
