//! Data Models
//!
//! Contains the data structures owned by the application crate. Analysis results and
//! history entries live in `phishguard-core`.

pub mod catalog;
pub mod settings;

pub use catalog::*;
pub use settings::*;
