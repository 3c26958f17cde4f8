//! Storage Layer
//!
//! Handles all data persistence: the key-value store behind history, credentials and
//! the app catalog, plus the JSON config file.

pub mod config;
pub mod credentials;
pub mod kv;

pub use config::*;
pub use credentials::*;
pub use kv::*;
