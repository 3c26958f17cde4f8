//! Integration Tests Module
//!
//! End-to-end tests for PhishGuard: the Gemini client against a local HTTP server,
//! the analysis session with persistent history, and the admin-gated app catalog.

// Canned-response HTTP server shared by the network tests
mod mock_server;

// Gemini client request shape and error classification
mod gemini_client_test;

// Session state machine wired to real storage
mod session_flow_test;

// App catalog, admin gate, share and report surfaces
mod catalog_test;
