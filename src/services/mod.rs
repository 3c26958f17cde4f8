//! Services
//!
//! Application logic on top of the storage layer and the remote provider.
//! The CLI calls into these; none of them know about the terminal.

pub mod admin;
pub mod catalog;
pub mod history;
pub mod report;
pub mod session;
pub mod share;

pub use admin::{AdminGate, AdminToken};
pub use catalog::AppCatalog;
pub use history::{HistoryCache, HISTORY_CAPACITY};
pub use report::{ReportKind, SpamReport};
pub use session::{
    error_message, AnalysisSession, RejectReason, SessionState, SubmitOptions, SubmitOutcome,
};
pub use share::{format_app_share, format_result_share, verification_links, VerificationLink};
