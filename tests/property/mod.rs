//! Property-based tests
//!
//! Guard and routing invariants checked over generated sessions and paths.

pub mod guard_proptest;
pub mod route_proptest;
