//! Admin Gate
//!
//! Catalog mutations require an `AdminToken`, which can only be obtained by passing
//! the password check here.

use crate::utils::error::{AppError, AppResult};

/// Fixed admin password
const ADMIN_PASSWORD: &str = "1234";

/// Proof that the admin password was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminToken {
    _private: (),
}

/// Password check for admin-only operations
#[derive(Debug, Clone, Default)]
pub struct AdminGate;

impl AdminGate {
    pub fn new() -> Self {
        Self
    }

    /// Exchange the password for a token.
    pub fn login(&self, password: &str) -> AppResult<AdminToken> {
        if password == ADMIN_PASSWORD {
            tracing::info!("admin login accepted");
            Ok(AdminToken { _private: () })
        } else {
            tracing::warn!("admin login rejected");
            Err(AppError::unauthorized("비밀번호가 틀렸습니다."))
        }
    }
}
