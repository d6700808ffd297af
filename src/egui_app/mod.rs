//! egui Native Desktop App Module
//!
//! Native client for the revision API, built on egui/eframe.
//!
//! # Architecture
//!
//! - **`config`** - Configuration loading (defaults, TOML file, environment)
//! - **`storage`** - Persistent key/value store (JSON file or in-memory)
//! - **`session`** - Session store; the only reader/writer of `token` and `user`
//! - **`guards`** - Pure access decisions for routes
//! - **`routes`** - Route table, paths and guard-aware resolution
//! - **`api`** - HTTP client with credential injection and failure classification
//! - **`notifications`** - Fan-out of user-facing notifications raised below the UI
//! - **`auth`** - Login and signup forms and flows
//! - **`quiz`** - Practice quiz timing, scoring and history
//! - **`tasks`** - Background requests polled from the UI thread
//! - **`state`** - Application state and per-page state
//! - **`views`** - One render function per route
//! - **`theme`** - Colors and frame styles
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs
//! ├── main.rs          - Binary entry point
//! ├── config.rs
//! ├── storage.rs
//! ├── session.rs
//! ├── guards.rs
//! ├── routes.rs
//! ├── notifications.rs
//! ├── auth.rs
//! ├── quiz.rs
//! ├── tasks.rs
//! ├── api/             - Client and typed endpoints
//! ├── state/           - AppState, Services, Page
//! ├── views/           - Page renderers
//! └── theme/           - Colors and styles
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop client:
//! // cargo run --bin revisewise
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod guards;
pub mod notifications;
pub mod quiz;
pub mod routes;
pub mod session;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use auth::AuthState;
pub use routes::Route;
pub use session::{Session, SessionContext, SessionEvent};
pub use state::{AppState, Services};
