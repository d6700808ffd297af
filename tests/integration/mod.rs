//! Integration tests
//!
//! Exercise the HTTP client and the login flow against a mock API server.

pub mod api_client_test;
pub mod session_flow_test;
