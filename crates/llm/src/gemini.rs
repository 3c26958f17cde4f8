//! Gemini Provider
//!
//! Implementation of `AnalysisProvider` on top of Google's Gemini REST API.
//!
//! ## API Details
//!
//! - Endpoint: `POST {base}/models/{model}:generateContent`
//! - Auth: `x-goog-api-key: {api_key}`
//! - Body: `{ systemInstruction, contents, generationConfig: { responseMimeType, responseSchema } }`
//! - Response: `{ candidates: [{ content: { parts: [{ text }] } }] }` where `text` is the
//!   JSON document described by the declared schema

use async_trait::async_trait;
use serde::Deserialize;

use super::prompt::{response_schema, user_content, SYSTEM_INSTRUCTION};
use super::provider::{map_transport_error, parse_http_error, resolve_credential, AnalysisProvider};
use super::types::{LlmError, LlmResult, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::http_client::build_http_client;
use phishguard_core::AnalysisResult;

const PROVIDER_NAME: &str = "gemini";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy_url.as_deref()).map_err(|e| {
            LlmError::transient(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url(), self.model())
    }

    /// Build the request body for the API
    fn build_request_body(&self, phone_number: &str) -> serde_json::Value {
        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": user_content(phone_number) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: &GenerateContentResponse) -> LlmResult<String> {
    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .unwrap_or("no candidates");
        return Err(LlmError::malformed(format!(
            "response has no candidates ({})",
            reason
        )));
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::malformed(format!(
            "no response text received (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text)
}

/// Parse the model's JSON document into a typed result.
///
/// Every field is mandatory; nothing falls back to a default.
pub fn parse_analysis(text: &str) -> LlmResult<AnalysisResult> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    serde_json::from_str::<AnalysisResult>(json)
        .map_err(|e| LlmError::malformed(format!("failed to parse analysis: {}", e)))
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        if self.config.model.trim().is_empty() {
            DEFAULT_MODEL
        } else {
            &self.config.model
        }
    }

    async fn analyze(
        &self,
        phone_number: &str,
        credential: Option<&str>,
    ) -> LlmResult<AnalysisResult> {
        let api_key = resolve_credential(
            credential,
            self.config.default_api_key.as_deref(),
            PROVIDER_NAME,
        )?;

        let url = self.endpoint();
        tracing::debug!("Gemini analyze POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(phone_number.trim()))
            .send()
            .await
            .map_err(|e| map_transport_error(e, PROVIDER_NAME))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, PROVIDER_NAME))?;

        if status != 200 {
            let err = parse_http_error(status, &body_text, PROVIDER_NAME);
            tracing::warn!(status, kind = ?err.kind(), "Gemini request failed");
            return Err(err);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body_text)
            .map_err(|e| LlmError::malformed(format!("failed to parse response: {}", e)))?;

        parse_analysis(&extract_text(&parsed)?)
    }
}
