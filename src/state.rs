//! Application State
//!
//! Owns every service and wires them to one storage backend and one provider.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use phishguard_llm::{default_key_from_env, AnalysisProvider, GeminiProvider};

use crate::models::settings::AppConfig;
use crate::services::{AdminGate, AnalysisSession, AppCatalog, HistoryCache};
use crate::storage::{ConfigService, CredentialStore, JsonFileStore, KeyValueStore};
use crate::utils::error::AppResult;
use crate::utils::paths::{config_path_in, ensure_dir, ensure_phishguard_dir, store_dir_in};

pub struct AppState {
    config: RwLock<ConfigService>,
    credentials: CredentialStore,
    history: Arc<Mutex<HistoryCache>>,
    catalog: Mutex<AppCatalog>,
    admin: AdminGate,
    session: AnalysisSession,
}

impl AppState {
    /// Open the state rooted at the default data directory.
    pub fn open_default() -> AppResult<Self> {
        let dir = ensure_phishguard_dir()?;
        Self::open(&dir)
    }

    /// Open the state rooted at `data_dir`: config file, file-backed store and the
    /// Gemini provider built from the config.
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        ensure_dir(data_dir)?;
        let config = ConfigService::open(config_path_in(data_dir))?;
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(store_dir_in(data_dir))?);

        let provider_config = config.get_config().provider_config(default_key_from_env());
        let provider: Arc<dyn AnalysisProvider> = Arc::new(GeminiProvider::new(provider_config)?);

        tracing::debug!(dir = %data_dir.display(), model = provider.model(), "state opened");
        Ok(Self::with_parts(config, store, provider))
    }

    /// Assemble the state from already-built parts.
    pub fn with_parts(
        config: ConfigService,
        store: Arc<dyn KeyValueStore>,
        provider: Arc<dyn AnalysisProvider>,
    ) -> Self {
        let credentials = CredentialStore::new(Arc::clone(&store));
        let history = Arc::new(Mutex::new(HistoryCache::load(Arc::clone(&store))));
        let catalog = AppCatalog::load(store);
        let session = AnalysisSession::new(provider, credentials.clone(), Arc::clone(&history));

        Self {
            config: RwLock::new(config),
            credentials,
            history,
            catalog: Mutex::new(catalog),
            admin: AdminGate::new(),
            session,
        }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn history(&self) -> &Arc<Mutex<HistoryCache>> {
        &self.history
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn catalog(&self) -> &Mutex<AppCatalog> {
        &self.catalog
    }

    pub fn admin(&self) -> &AdminGate {
        &self.admin
    }

    pub fn config_service(&self) -> &RwLock<ConfigService> {
        &self.config
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> AppConfig {
        self.config.read().await.get_config().clone()
    }
}
