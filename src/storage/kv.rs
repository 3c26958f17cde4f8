//! Key-Value Store
//!
//! Durable local state as namespaced keys mapping to JSON text. Services receive the
//! store as an injected `Arc<dyn KeyValueStore>`, so tests can swap in `MemoryStore`.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Key holding the user's personal API key
pub const API_KEY_KEY: &str = "phishguard_api_key";

/// Key holding the analysis history
pub const HISTORY_KEY: &str = "phishguard_history";

/// Key holding the recommended-app catalog
pub const APPS_KEY: &str = "phishguard_apps";

/// Synchronous key-value persistence.
///
/// `save` must not return before the value is durable.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value under `key`, `None` if absent.
    fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value under `key`.
    fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::validation(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        write_synced(&tmp, value)
            .map_err(|e| AppError::storage(format!("failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| {
            AppError::storage(format!("failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Write `value` to `path` and flush it to disk before returning.
fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AppError::internal("lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::internal("lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AppError::internal("lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Outcome of reading a JSON value from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue<T> {
    /// Key absent or blank
    Missing,
    /// Present but unreadable or unparseable
    Corrupt,
    Present(T),
}

impl<T> StoredValue<T> {
    /// The value, or `fallback` for both missing and corrupt entries.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            StoredValue::Present(value) => value,
            StoredValue::Missing | StoredValue::Corrupt => fallback,
        }
    }
}

/// Read and decode the JSON value under `key`. Never fails; corruption is logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> StoredValue<T> {
    let raw = match store.load(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return StoredValue::Missing,
        Err(e) => {
            tracing::warn!(key, "failed to read stored value, treating as corrupt: {}", e);
            return StoredValue::Corrupt;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => StoredValue::Present(value),
        Err(e) => {
            tracing::warn!(key, "discarding unparseable stored value: {}", e);
            StoredValue::Corrupt
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    store.save(key, &serde_json::to_string(value)?)
}
