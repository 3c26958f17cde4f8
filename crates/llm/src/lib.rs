//! PhishGuard LLM
//!
//! The remote analysis client: turns a phone number into a typed `AnalysisResult`
//! by calling a generative-AI service, or fails with a classified error.
//!
//! - `provider` - the `AnalysisProvider` trait and HTTP error classification
//! - `gemini` - Google Gemini `generateContent` implementation
//! - `prompt` - the fixed instruction set and declared response schema
//! - `types` - provider configuration and error types
//! - `http_client` - reqwest client factory

pub mod gemini;
pub mod http_client;
pub mod prompt;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::AnalysisProvider;
pub use types::*;
