//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use phishguard_llm::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Link appended to shared results
pub const DEFAULT_APP_LINK: &str = "https://phishguard.app/";

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini model used for analysis
    pub model: String,
    /// Gemini REST base URL
    pub api_base_url: String,
    /// Link included in share text
    pub app_link: String,
    /// Optional proxy for outgoing requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            app_link: DEFAULT_APP_LINK.to_string(),
            proxy_url: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub model: Option<String>,
    pub api_base_url: Option<String>,
    pub app_link: Option<String>,
    /// `Some("")` clears the proxy
    pub proxy_url: Option<String>,
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(model) = update.model {
            self.model = model.trim().to_string();
        }
        if let Some(url) = update.api_base_url {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(link) = update.app_link {
            self.app_link = link.trim().to_string();
        }
        if let Some(proxy) = update.proxy_url {
            let proxy = proxy.trim();
            self.proxy_url = (!proxy.is_empty()).then(|| proxy.to_string());
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !is_http_url(&self.api_base_url) {
            return Err(format!(
                "Invalid api_base_url: {}. Must start with http:// or https://",
                self.api_base_url
            ));
        }
        if !is_http_url(&self.app_link) {
            return Err(format!(
                "Invalid app_link: {}. Must start with http:// or https://",
                self.app_link
            ));
        }
        Ok(())
    }

    /// Provider settings derived from this configuration.
    pub fn provider_config(&self, default_api_key: Option<String>) -> ProviderConfig {
        ProviderConfig {
            default_api_key,
            model: self.model.clone(),
            base_url: Some(self.api_base_url.clone()),
            proxy_url: self.proxy_url.clone(),
        }
    }
}
