//! Shared Module
//!
//! Types that mirror the JSON contract of the revision API, plus
//! configuration and error types used across the client.
//!
//! # Overview
//!
//! Nothing in here performs I/O. The HTTP layer lives in
//! `egui_app::api` and the persistent session in `egui_app::session`.

/// API data model
pub mod models;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Static class/subject catalogue
pub mod syllabus;

/// CSV import of question banks
pub mod bulk;

/// Re-export commonly used types for convenience
pub use models::{QuestionType, Role, UserProfile};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, FileConfig};
