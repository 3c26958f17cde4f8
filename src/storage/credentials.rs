//! Credential Store
//!
//! Persists the user's personal API key under `API_KEY_KEY`. When no key is saved
//! the remote client falls back to the process-wide default.

use std::sync::Arc;

use super::kv::{load_json, save_json, KeyValueStore, StoredValue, API_KEY_KEY};
use crate::utils::error::AppResult;

/// Saved personal API key
#[derive(Debug, Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved key, if any. An unreadable entry counts as no key.
    pub fn get(&self) -> Option<String> {
        match load_json::<String>(self.store.as_ref(), API_KEY_KEY) {
            StoredValue::Present(key) if !key.trim().is_empty() => Some(key.trim().to_string()),
            _ => None,
        }
    }

    /// Save a key. Blank input clears the saved key.
    pub fn set(&self, key: &str) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return self.clear();
        }
        save_json(self.store.as_ref(), API_KEY_KEY, key)
    }

    /// Forget the saved key.
    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(API_KEY_KEY)
    }

    pub fn has_key(&self) -> bool {
        self.get().is_some()
    }
}
