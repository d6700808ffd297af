//! Integration and property tests for the ReviseWise client
//!
//! - `common` - shared fixtures, mock API server helpers and assertions
//! - `integration` - HTTP client and session flows against a mock server
//! - `property` - guard and routing invariants

pub mod common;
pub mod integration;
pub mod property;
