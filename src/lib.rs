//! ReviseWise - Main Library
//!
//! ReviseWise is a native desktop client for a K-12 revision service. Students
//! log in, browse the syllabus, take practice quizzes and follow their
//! progress; teachers upload questions and review student performance; admins
//! manage subjects, questions and users.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that mirror the remote REST API
//!   - Users, roles, subjects, topics, questions, performance records
//!   - Configuration and shared error types
//!   - The static syllabus catalogue
//!   - CSV import of question banks
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session store backed by local key/value storage
//!   - Route guards and navigation
//!   - HTTP client wrapper that injects credentials and classifies failures
//!   - One view per route
//!
//! # Sessions and guards
//!
//! A session is the pair of an opaque bearer token and the user profile
//! returned by the login endpoint. Both are written together on login and
//! removed together on logout. Every navigation is checked against the
//! route's access policy:
//!
//! ```rust
//! use revisewise::egui_app::guards::{require_role, GuardDecision};
//! use revisewise::egui_app::session::Session;
//! use revisewise::shared::{Role, UserProfile};
//!
//! let user = UserProfile::new(7, "Asha", "asha@example.com", Role::Student);
//! let session = Session::new(Some("abc".to_string()), Some(user));
//!
//! assert_eq!(require_role(&session, &[Role::Student, Role::Teacher]), GuardDecision::Render);
//! assert_eq!(require_role(&session, &[Role::Admin]), GuardDecision::RedirectForbidden);
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, with `thiserror` enums per layer
//! - Corrupt session data is never an error for callers: it reads as "no user"
//! - Class-access denials (HTTP 403 mentioning the student's class) are
//!   published as notifications; the UI shows them in a blocking dialog

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
