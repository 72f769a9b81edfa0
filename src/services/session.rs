//! First-run session bootstrap.
//!
//! The engine's host seeds two persisted key/value entries on first run.
//! This is presentation-adjacent convenience rather than engine contract;
//! it is kept because the seeding must be idempotent, which is easy to get
//! wrong in the host.

use std::collections::HashMap;

/// Key under which the session user token is stored.
pub const USER_KEY: &str = "user";

/// Key under which the active project id is stored.
pub const PROJECT_KEY: &str = "project";

/// Default project id seeded on first run.
pub const DEFAULT_PROJECT: &str = "default";

/// Persisted key/value store owned by the host (browser storage, a config
/// file, ...).
pub trait SessionStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str);
}

impl SessionStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Seeds the `user` and `project` entries when absent. Existing values are
/// never overwritten, so repeated calls are no-ops.
pub fn bootstrap_session(store: &mut dyn SessionStore) {
    if store.get(USER_KEY).is_none() {
        let token = uuid::Uuid::new_v4().to_string();
        store.set(USER_KEY, &token);
    }
    if store.get(PROJECT_KEY).is_none() {
        store.set(PROJECT_KEY, DEFAULT_PROJECT);
    }
}
