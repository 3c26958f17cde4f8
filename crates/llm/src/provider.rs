//! Analysis Provider Trait
//!
//! Defines the common interface for remote analysis services plus the helpers every
//! implementation uses to classify failures.

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{LlmError, LlmResult};
use phishguard_core::AnalysisResult;

/// Trait that all remote analysis providers must implement.
///
/// One call to `analyze` issues at most one remote request. Implementations hold no
/// state between calls and never retry.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the model being used.
    fn model(&self) -> &str;

    /// Analyze a phone number.
    ///
    /// # Arguments
    /// * `phone_number` - Number as typed by the user (callers reject blank input)
    /// * `credential` - Caller-supplied API key; `None` or blank uses the provider default
    ///
    /// # Returns
    /// A structurally complete result. The score range is not checked here.
    async fn analyze(
        &self,
        phone_number: &str,
        credential: Option<&str>,
    ) -> LlmResult<AnalysisResult>;
}

/// Pick the caller credential if present and non-blank, else the default.
pub fn resolve_credential(
    explicit: Option<&str>,
    default: Option<&str>,
    provider: &str,
) -> LlmResult<String> {
    explicit
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| default.map(str::trim).filter(|k| !k.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| missing_api_key_error(provider))
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::MissingCredential {
        message: format!("no API key configured for {}", provider),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    status: Option<String>,
}

/// Helper function to parse HTTP error status codes
///
/// Google APIs answer an invalid key with `400 INVALID_ARGUMENT`, and quota exhaustion
/// can surface as `RESOURCE_EXHAUSTED` on statuses other than 429, so the body is
/// inspected as well as the status.
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error);
    let rpc_status = detail
        .as_ref()
        .and_then(|d| d.status.clone())
        .unwrap_or_default();
    let message = detail
        .and_then(|d| d.message)
        .unwrap_or_else(|| body.to_string());

    let invalid_key = body.contains("API_KEY_INVALID") || body.contains("API key not valid");
    let exhausted = rpc_status == "RESOURCE_EXHAUSTED" || body.contains("RESOURCE_EXHAUSTED");

    match status {
        401 | 403 => LlmError::AuthenticationFailed {
            message: format!("{}: {}", provider, message),
            status: Some(status),
        },
        400 if invalid_key => LlmError::AuthenticationFailed {
            message: format!("{}: {}", provider, message),
            status: Some(status),
        },
        429 => LlmError::RateLimited {
            message: format!("{}: {}", provider, message),
        },
        _ if exhausted => LlmError::RateLimited {
            message: format!("{}: {}", provider, message),
        },
        _ => LlmError::Transient {
            message: format!("{} HTTP {}: {}", provider, status, message),
            status: Some(status),
        },
    }
}

/// Map a reqwest transport error. Every transport failure is transient.
pub fn map_transport_error(err: reqwest::Error, provider: &str) -> LlmError {
    let message = if err.is_timeout() {
        format!("{}: request timed out: {}", provider, err)
    } else if err.is_connect() {
        format!("{}: cannot connect: {}", provider, err)
    } else {
        format!("{}: {}", provider, err)
    };
    LlmError::Transient {
        message,
        status: err.status().map(|s| s.as_u16()),
    }
}
