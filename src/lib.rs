//! PhishGuard - phone number risk analysis
//!
//! This library provides everything behind the `phishguard` binary:
//! - the analysis session (single-flight state machine over the Gemini provider)
//! - the persistent history cache and app catalog
//! - storage (key-value store, credentials, config file)
//! - share and report text

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::catalog::AppItem;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use phishguard_core::{AnalysisResult, HistoryItem, RiskTier};
pub use phishguard_llm::{AnalysisProvider, ErrorKind, GeminiProvider, LlmError};
pub use services::{AnalysisSession, HistoryCache, SessionState, SubmitOutcome};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
