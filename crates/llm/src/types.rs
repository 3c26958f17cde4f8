//! Provider Types
//!
//! Configuration and error types for the remote analysis client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted, in order, for the process-wide default credential.
pub const DEFAULT_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Classified failure category of a remote analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No credential available at all
    MissingCredential,
    /// Credential rejected by the service
    AuthError,
    /// Service throttling
    RateLimited,
    /// Body not parseable as the expected schema
    MalformedResponse,
    /// Network, timeout, 5xx and anything unclassified
    TransientFailure,
}

/// Errors returned by an `AnalysisProvider`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("API key not configured: {message}")]
    MissingCredential { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String, status: Option<u16> },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Transient failure: {message}")]
    Transient { message: String, status: Option<u16> },
}

/// Result type alias for provider calls
pub type LlmResult<T> = Result<T, LlmError>;

impl LlmError {
    /// The classification bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::MissingCredential { .. } => ErrorKind::MissingCredential,
            LlmError::AuthenticationFailed { .. } => ErrorKind::AuthError,
            LlmError::RateLimited { .. } => ErrorKind::RateLimited,
            LlmError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            LlmError::Transient { .. } => ErrorKind::TransientFailure,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
        }
    }

    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient {
            message: msg.into(),
            status: None,
        }
    }
}

/// Configuration for a remote analysis provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderConfig {
    /// Process-wide fallback credential
    pub default_api_key: Option<String>,
    /// Model name; empty means `DEFAULT_MODEL`
    pub model: String,
    /// Override for the REST base URL
    pub base_url: Option<String>,
    /// Optional proxy URL (http, https or socks5)
    pub proxy_url: Option<String>,
}

impl ProviderConfig {
    /// Default configuration with the fallback credential taken from the environment.
    pub fn from_env() -> Self {
        Self {
            default_api_key: default_key_from_env(),
            model: DEFAULT_MODEL.to_string(),
            ..Default::default()
        }
    }
}

/// First non-blank value among `DEFAULT_KEY_ENV_VARS`.
pub fn default_key_from_env() -> Option<String> {
    DEFAULT_KEY_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
