//! Cross-Platform Path Utilities
//!
//! Resolves the PhishGuard data directory (~/.phishguard/ unless `PHISHGUARD_HOME`
//! points elsewhere) and the files inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Environment variable overriding the data directory
pub const HOME_ENV_VAR: &str = "PHISHGUARD_HOME";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the PhishGuard directory (~/.phishguard/ or `$PHISHGUARD_HOME`)
pub fn phishguard_dir() -> AppResult<PathBuf> {
    match std::env::var(HOME_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir.trim())),
        _ => Ok(home_dir()?.join(".phishguard")),
    }
}

/// Config file inside a data directory
pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

/// Key-value store directory inside a data directory
pub fn store_dir_in(dir: &Path) -> PathBuf {
    dir.join("store")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the PhishGuard directory, creating if it doesn't exist
pub fn ensure_phishguard_dir() -> AppResult<PathBuf> {
    let path = phishguard_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
