//! Session fixtures
//!
//! Builders for user profiles, sessions and login payloads shared by the
//! integration and property tests.

use revisewise::egui_app::session::{Session, SessionContext};
use revisewise::shared::{Role, UserProfile};
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "test-token-abc";

/// Test user profile for a role. Students are enrolled in Class 6.
pub fn test_user(id: i64, role: Role) -> UserProfile {
    let user = UserProfile::new(id, format!("User {}", id), format!("user{}@example.com", id), role);
    match role {
        Role::Student => user.with_class("Class 6"),
        _ => user,
    }
}

/// Session snapshot with a token and a decoded user
pub fn logged_in(role: Role) -> Session {
    Session::new(Some(TEST_TOKEN.to_string()), Some(test_user(7, role)))
}

/// In-memory session store already holding a session for `user`
pub fn stored_session(user: &UserProfile) -> SessionContext {
    let sessions = SessionContext::in_memory();
    sessions
        .set_session(TEST_TOKEN, user)
        .expect("Failed to store test session");
    sessions
}

/// Body of a successful `/login` response
pub fn login_body(token: &str, user: &UserProfile) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user,
    })
}
