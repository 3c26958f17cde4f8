//! PhishGuard Core
//!
//! Domain value types and error types shared by every PhishGuard crate. This crate has
//! no dependency on networking, storage or the CLI.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `analysis` - Analysis results, history entries and risk tiers

pub mod analysis;
pub mod error;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Analysis Types ─────────────────────────────────────────────────────
pub use analysis::{AnalysisResult, HistoryItem, RiskTier, MAX_RISK_SCORE};
