//! App Catalog
//!
//! Admin-managed list of recommended apps, persisted under `APPS_KEY`.
//! Reads are open to everyone; every mutation needs an `AdminToken`.

use std::sync::Arc;

use crate::models::catalog::{default_apps, AppItem};
use crate::services::admin::AdminToken;
use crate::storage::kv::{load_json, save_json, KeyValueStore, StoredValue, APPS_KEY};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug)]
pub struct AppCatalog {
    store: Arc<dyn KeyValueStore>,
    apps: Vec<AppItem>,
}

impl AppCatalog {
    /// Load the saved catalog. A never-saved catalog starts with the default entries;
    /// an unreadable one starts empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let apps = match load_json::<Vec<AppItem>>(store.as_ref(), APPS_KEY) {
            StoredValue::Present(apps) => apps,
            StoredValue::Missing => default_apps(),
            StoredValue::Corrupt => Vec::new(),
        };
        Self { store, apps }
    }

    pub fn list(&self) -> &[AppItem] {
        &self.apps
    }

    /// Append a new entry.
    pub fn add(&mut self, _token: &AdminToken, title: &str, description: &str) -> AppResult<AppItem> {
        let (title, description) = (title.trim(), description.trim());
        if title.is_empty() || description.is_empty() {
            return Err(AppError::validation("title and description are required"));
        }

        let item = AppItem::new(self.next_id(), title, description);
        let mut updated = self.apps.clone();
        updated.push(item.clone());
        self.commit(updated)?;
        tracing::info!(id = %item.id, "app added to catalog");
        Ok(item)
    }

    /// Remove the entry with `id`.
    pub fn delete(&mut self, _token: &AdminToken, id: &str) -> AppResult<()> {
        if !self.apps.iter().any(|app| app.id == id) {
            return Err(AppError::not_found(format!("app {}", id)));
        }
        let updated = self.apps.iter().filter(|app| app.id != id).cloned().collect();
        self.commit(updated)
    }

    /// Remove every entry. The empty catalog is saved, so defaults do not come back.
    pub fn clear(&mut self, _token: &AdminToken) -> AppResult<()> {
        self.commit(Vec::new())
    }

    fn commit(&mut self, apps: Vec<AppItem>) -> AppResult<()> {
        save_json(self.store.as_ref(), APPS_KEY, &apps)?;
        self.apps = apps;
        Ok(())
    }

    fn next_id(&self) -> String {
        let ts = chrono::Utc::now().timestamp_millis();
        let mut id = ts.to_string();
        let mut n = 1;
        while self.apps.iter().any(|app| app.id == id) {
            id = format!("{}-{}", ts, n);
            n += 1;
        }
        id
    }
}
