//! Session Flow Integration Tests
//!
//! The analysis session wired to file-backed storage, with either the real Gemini
//! client against a local server or a gated fake provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use phishguard::services::session::CREDENTIAL_ERROR_MESSAGE;
use phishguard::services::{HistoryCache, RejectReason};
use phishguard::storage::{ConfigService, CredentialStore, JsonFileStore, KeyValueStore};
use phishguard::{AnalysisSession, AppState, ErrorKind, SessionState, SubmitOutcome};
use phishguard_core::{AnalysisResult, RiskTier};
use phishguard_llm::{AnalysisProvider, GeminiProvider, LlmResult, ProviderConfig};

use crate::mock_server::{gemini_envelope, high_risk_analysis, serve_once};

fn open_state(dir: &std::path::Path, base_url: &str) -> (Arc<dyn KeyValueStore>, AppState) {
    let config = ConfigService::open(dir.join("config.json")).unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(dir.join("store")).unwrap());
    let provider = GeminiProvider::new(ProviderConfig {
        default_api_key: Some("AIzaSyDefault".to_string()),
        model: "gemini-2.5-flash".to_string(),
        base_url: Some(base_url.to_string()),
        proxy_url: None,
    })
    .unwrap();
    let state = AppState::with_parts(config, Arc::clone(&store), Arc::new(provider));
    (store, state)
}

// ============================================================================
// Scenarios over HTTP
// ============================================================================

#[tokio::test]
async fn test_high_risk_number_is_analyzed_and_recorded() {
    let temp = tempfile::tempdir().unwrap();
    let (base, server) = serve_once(200, gemini_envelope(&high_risk_analysis())).await;
    let (store, state) = open_state(temp.path(), &base);

    let outcome = state.session().submit("010-1234-5678").await;
    server.await.unwrap();

    let result = match outcome {
        SubmitOutcome::Completed(SessionState::Success(result)) => result,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(result.risk_score, 85);
    assert_eq!(result.tier(), RiskTier::High);
    assert_eq!(result.tier().headline(), "보이스피싱 위험!");

    let history = state.history().lock().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.items()[0].result, result);

    // Written through to disk
    let persisted = HistoryCache::load_all(store.as_ref());
    assert_eq!(persisted, history.items());
}

#[tokio::test]
async fn test_rejected_key_shows_credential_message() {
    let temp = tempfile::tempdir().unwrap();
    let body = r#"{"error":{"code":403,"message":"permission denied","status":"PERMISSION_DENIED"}}"#;
    let (base, server) = serve_once(403, body).await;
    let (_store, state) = open_state(temp.path(), &base);
    state.credentials().set("AIzaSyRevoked").unwrap();

    let outcome = state.session().submit("010-1234-5678").await;
    let request = server.await.unwrap();

    assert_eq!(request.header("x-goog-api-key"), Some("AIzaSyRevoked"));
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(SessionState::Error {
            message: CREDENTIAL_ERROR_MESSAGE.to_string(),
            kind: ErrorKind::AuthError,
        })
    );
    assert!(state.history().lock().await.is_empty());
}

#[tokio::test]
async fn test_history_survives_restart() {
    let temp = tempfile::tempdir().unwrap();
    {
        let (base, server) = serve_once(200, gemini_envelope(&high_risk_analysis())).await;
        let (_store, state) = open_state(temp.path(), &base);
        state.session().submit("010-1234-5678").await;
        server.await.unwrap();
    }

    let (_store, state) = open_state(temp.path(), "http://127.0.0.1:9");
    let history = state.history().lock().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.items()[0].result.normalized_number, "010-1234-5678");
}

// ============================================================================
// Single-flight
// ============================================================================

/// Provider that blocks until released.
struct GatedProvider {
    gate: Notify,
    calls: AtomicUsize,
    result: AnalysisResult,
}

#[async_trait]
impl AnalysisProvider for GatedProvider {
    fn name(&self) -> &'static str {
        "gated"
    }

    fn model(&self) -> &str {
        "test"
    }

    async fn analyze(&self, _phone_number: &str, _credential: Option<&str>) -> LlmResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.result.clone())
    }
}

#[tokio::test]
async fn test_submit_while_loading_is_rejected() {
    let result: AnalysisResult = serde_json::from_value(high_risk_analysis()).unwrap();
    let provider = Arc::new(GatedProvider {
        gate: Notify::new(),
        calls: AtomicUsize::new(0),
        result: result.clone(),
    });

    let store: Arc<dyn KeyValueStore> = Arc::new(phishguard::storage::MemoryStore::new());
    let session = Arc::new(AnalysisSession::new(
        provider.clone(),
        CredentialStore::new(Arc::clone(&store)),
        Arc::new(Mutex::new(HistoryCache::load(store))),
    ));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("010-1234-5678").await })
    };

    while !session.state().await.is_loading() {
        tokio::task::yield_now().await;
    }

    assert_eq!(
        session.submit("010-9999-0000").await,
        SubmitOutcome::Rejected(RejectReason::AlreadyInFlight)
    );
    assert_eq!(
        session.submit("   ").await,
        SubmitOutcome::Rejected(RejectReason::EmptyInput)
    );
    assert_eq!(session.state().await, SessionState::Loading);

    provider.gate.notify_one();
    assert_eq!(
        first.await.unwrap(),
        SubmitOutcome::Completed(SessionState::Success(result.clone()))
    );
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.history().lock().await.len(), 1);
}
