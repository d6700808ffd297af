//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Mock API server helpers
//! - Session and user fixtures
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod mock_server;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use mock_server::*;
