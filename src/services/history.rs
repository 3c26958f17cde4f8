//! History Cache
//!
//! Bounded, newest-first record of completed analyses, written through to the
//! key-value store on every mutation and reloaded at startup.
//!
//! Insertion order is the only ordering key. Entries are never re-sorted and never
//! mutated; they leave the cache only through capacity eviction, `delete` or `clear`.

use std::sync::Arc;

use phishguard_core::{AnalysisResult, HistoryItem};

use crate::storage::kv::{load_json, save_json, KeyValueStore, HISTORY_KEY};
use crate::utils::error::AppResult;

/// Maximum number of retained entries
pub const HISTORY_CAPACITY: usize = 50;

/// Persistent analysis history
#[derive(Debug)]
pub struct HistoryCache {
    store: Arc<dyn KeyValueStore>,
    items: Vec<HistoryItem>,
}

impl HistoryCache {
    /// Load the persisted history. Never fails: missing or corrupt data yields an
    /// empty cache.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = Self::load_all(store.as_ref());
        tracing::debug!(count = items.len(), "history loaded");
        Self { store, items }
    }

    /// Read the persisted sequence without building a cache.
    pub fn load_all(store: &dyn KeyValueStore) -> Vec<HistoryItem> {
        let mut items = load_json::<Vec<HistoryItem>>(store, HISTORY_KEY).unwrap_or(Vec::new());
        items.truncate(HISTORY_CAPACITY);
        items
    }

    /// Record a completed analysis at the front of the history.
    ///
    /// The new sequence is persisted before the in-memory copy is replaced, so a
    /// storage failure leaves both unchanged and is returned to the caller.
    pub fn insert(&mut self, result: AnalysisResult) -> AppResult<HistoryItem> {
        let timestamp = self.next_timestamp();
        let item = HistoryItem::new(generate_id(timestamp), timestamp, result);

        let mut updated = Vec::with_capacity(HISTORY_CAPACITY);
        updated.push(item.clone());
        updated.extend(
            self.items
                .iter()
                .take(HISTORY_CAPACITY - 1)
                .cloned(),
        );

        self.persist(&updated)?;
        self.items = updated;
        tracing::info!(id = %item.id, count = self.items.len(), "history entry added");
        Ok(item)
    }

    /// All entries, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove one entry. Returns whether it existed.
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        let updated: Vec<HistoryItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        if updated.len() == self.items.len() {
            return Ok(false);
        }
        self.persist(&updated)?;
        self.items = updated;
        Ok(true)
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> AppResult<usize> {
        self.persist(&[])?;
        let removed = self.items.len();
        self.items.clear();
        Ok(removed)
    }

    fn persist(&self, items: &[HistoryItem]) -> AppResult<()> {
        save_json(self.store.as_ref(), HISTORY_KEY, items)
    }

    /// Current time, never earlier than the newest entry.
    fn next_timestamp(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        match self.items.first() {
            Some(head) => now.max(head.timestamp),
            None => now,
        }
    }
}

/// Time-prefixed id with a random suffix so that entries created within the same
/// millisecond stay distinct.
fn generate_id(timestamp: i64) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", timestamp, &suffix[..8])
}
