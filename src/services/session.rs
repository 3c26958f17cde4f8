//! Analysis Session
//!
//! Drives one analysis attempt at a time through `Idle -> Loading -> Success | Error`.
//!
//! ## Single-flight
//!
//! The `Loading` state is the mutual-exclusion mechanism for the remote call. The
//! blank-input check, the in-flight check and the transition to `Loading` happen under
//! one write guard; a `submit` that finds the session `Loading` is rejected, never
//! queued. The guard is released before the provider is awaited, so observers can read
//! the state while a request is in flight.
//!
//! ## Failure semantics
//!
//! No retry. A timeout, when requested, bounds only the provider call and surfaces as a
//! transient failure. Every remote failure becomes `Error` with a fixed user-facing
//! message; storage failures while recording history are logged and do not affect the
//! outcome. If a `submit` future is dropped while `Loading`, the session falls back to
//! `Idle` so the next `submit` is accepted.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use phishguard_core::{AnalysisResult, HistoryItem};
use phishguard_llm::{AnalysisProvider, ErrorKind, LlmError, LlmResult};

use crate::services::history::HistoryCache;
use crate::storage::credentials::CredentialStore;

/// Shown for missing or rejected credentials
pub const CREDENTIAL_ERROR_MESSAGE: &str =
    "API Key 오류입니다. 설정에서 올바른 키를 입력해주세요.";

/// Shown when the service throttles requests
pub const RATE_LIMITED_MESSAGE: &str =
    "사용량이 많아 분석이 지연되고 있습니다. 잠시 후 시도하거나 개인 API Key를 설정해주세요.";

/// Shown for every other failure
pub const TRANSIENT_ERROR_MESSAGE: &str =
    "분석 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// User-facing message for an error kind.
pub fn error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::MissingCredential | ErrorKind::AuthError => CREDENTIAL_ERROR_MESSAGE,
        ErrorKind::RateLimited => RATE_LIMITED_MESSAGE,
        ErrorKind::MalformedResponse | ErrorKind::TransientFailure => TRANSIENT_ERROR_MESSAGE,
    }
}

/// Current state of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Error { message: String, kind: ErrorKind },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// The displayed result, if any.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SessionState::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// Why a `submit` was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Number was empty after trimming
    EmptyInput,
    /// Another attempt is still `Loading`
    AlreadyInFlight,
}

/// Result of a `submit` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Ignored; the state was not touched
    Rejected(RejectReason),
    /// The attempt ran to completion and left the session in this state
    Completed(SessionState),
}

/// Per-call settings for `submit_with`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Used instead of the saved credential when present
    pub credential: Option<String>,
    /// Upper bound on the provider call
    pub timeout: Option<Duration>,
}

/// Puts a `Loading` session back to `Idle` unless disarmed, so an abandoned
/// attempt cannot hold the single-flight slot.
struct LoadingGuard<'a> {
    state: &'a RwLock<SessionState>,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a RwLock<SessionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.state.try_write() {
            Ok(mut state) if state.is_loading() => {
                tracing::info!("analysis abandoned, session back to idle");
                *state = SessionState::Idle;
            }
            Ok(_) => {}
            Err(_) => tracing::warn!("analysis abandoned while state was locked"),
        }
    }
}

/// Single-flight analysis state machine
pub struct AnalysisSession {
    provider: Arc<dyn AnalysisProvider>,
    credentials: CredentialStore,
    history: Arc<Mutex<HistoryCache>>,
    state: RwLock<SessionState>,
}

impl AnalysisSession {
    pub fn new(
        provider: Arc<dyn AnalysisProvider>,
        credentials: CredentialStore,
        history: Arc<Mutex<HistoryCache>>,
    ) -> Self {
        Self {
            provider,
            credentials,
            history,
            state: RwLock::new(SessionState::Idle),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Shared handle to the history cache this session records into.
    pub fn history(&self) -> Arc<Mutex<HistoryCache>> {
        Arc::clone(&self.history)
    }

    /// Analyze `number` using the saved credential (or the provider default).
    pub async fn submit(&self, number: &str) -> SubmitOutcome {
        self.submit_with(number, &SubmitOptions::default()).await
    }

    /// Analyze `number` with a credential override and/or a timeout on the remote call.
    pub async fn submit_with(&self, number: &str, options: &SubmitOptions) -> SubmitOutcome {
        if let Err(reason) = self.begin(number).await {
            tracing::debug!(?reason, "submit rejected");
            return SubmitOutcome::Rejected(reason);
        }
        let guard = LoadingGuard::new(&self.state);

        let credential = options
            .credential
            .clone()
            .or_else(|| self.credentials.get());
        let outcome = self
            .run(number, credential.as_deref(), options.timeout)
            .await;

        let next = match outcome {
            Ok(result) => {
                self.record(&result).await;
                tracing::info!(
                    score = result.risk_score,
                    tier = %result.tier(),
                    "analysis succeeded"
                );
                SessionState::Success(result)
            }
            Err(err) => {
                let kind = err.kind();
                tracing::warn!(?kind, "analysis failed: {}", err);
                SessionState::Error {
                    message: error_message(kind).to_string(),
                    kind,
                }
            }
        };

        *self.state.write().await = next.clone();
        guard.disarm();
        SubmitOutcome::Completed(next)
    }

    /// Show a stored result without contacting the service.
    pub async fn load_from_history(&self, item: &HistoryItem) {
        *self.state.write().await = SessionState::Success(item.result.clone());
    }

    /// Return to `Idle`.
    pub async fn reset(&self) {
        *self.state.write().await = SessionState::Idle;
    }

    /// Guard checks and the `Loading` transition, atomically.
    async fn begin(&self, number: &str) -> Result<(), RejectReason> {
        if number.trim().is_empty() {
            return Err(RejectReason::EmptyInput);
        }
        let mut state = self.state.write().await;
        if state.is_loading() {
            return Err(RejectReason::AlreadyInFlight);
        }
        *state = SessionState::Loading;
        Ok(())
    }

    async fn run(
        &self,
        number: &str,
        credential: Option<&str>,
        timeout: Option<Duration>,
    ) -> LlmResult<AnalysisResult> {
        let call = self.provider.analyze(number, credential);
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                LlmError::transient(format!("no response within {}s", limit.as_secs_f32()))
            })??,
            None => call.await?,
        };
        result
            .validate()
            .map_err(|e| LlmError::malformed(e.to_string()))?;
        Ok(result)
    }

    async fn record(&self, result: &AnalysisResult) {
        let mut history = self.history.lock().await;
        if let Err(e) = history.insert(result.clone()) {
            tracing::warn!("failed to record analysis in history: {}", e);
        }
    }
}

impl std::fmt::Debug for AnalysisSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("provider", &self.provider.name())
            .finish()
    }
}
