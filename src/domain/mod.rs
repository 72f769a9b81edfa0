//! Domain layer types for the Postroom engine.
//!
//! This module contains the core types used throughout the engine: email
//! records, conversations, labels, and the view filter configuration.

mod email;
mod filter;
mod label;
mod types;

pub use email::{Conversation, Email, Message, DEFAULT_INTENT};
pub use filter::{DateRange, FilterOptions, IntentFilter, ReadStatus, SortKey};
pub use label::{system_label, Label, SystemLabelDef, SYSTEM_LABELS};
pub use types::{EmailId, LabelId};
