//! # Session Store
//!
//! The session is the pair (bearer token, user profile) persisted in local
//! storage under the `token` and `user` keys. [`SessionContext`] is the only
//! code that reads or writes those keys; everything else asks it for a
//! [`Session`] snapshot or subscribes to [`SessionEvent`]s.
//!
//! Token and user are written together on login and removed together on
//! logout. The two writes are not atomic: an interrupted login can leave a
//! token without a user. Such a session counts as logged in for the
//! authentication guard and as "no session" for role guards.
//!
//! Sessions never expire on their own. There is no refresh and no
//! inspection of the token's claims.
//!
//! ## Usage
//!
//! ```rust
//! use revisewise::egui_app::session::SessionContext;
//! use revisewise::shared::{Role, UserProfile};
//!
//! let sessions = SessionContext::in_memory();
//! let user = UserProfile::new(7, "Asha", "asha@example.com", Role::Student);
//! sessions.set_session("abc", &user).unwrap();
//! assert!(sessions.get_session().is_logged_in);
//!
//! sessions.clear_session().unwrap();
//! assert!(!sessions.get_session().is_logged_in);
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::egui_app::storage::{KeyValueStore, MemoryStore, StorageError, TOKEN_KEY, USER_KEY};
use crate::shared::{Role, UserProfile};

const EVENT_CAPACITY: usize = 16;

/// Snapshot of the persisted session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    /// True whenever a non-empty token is stored
    pub is_logged_in: bool,
}

impl Session {
    pub fn new(token: Option<String>, user: Option<UserProfile>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        Self {
            is_logged_in: token.is_some(),
            token,
            user,
        }
    }

    /// No token, no user
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user stored")]
    MissingUser,
    #[error("stored user is malformed: {0}")]
    MalformedUser(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Session lifecycle notifications
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { user_id: i64, role: Role },
    Cleared,
}

/// Typed decode of the stored user record.
pub fn decode_user(raw: Option<&str>) -> Result<UserProfile, SessionError> {
    let raw = raw.ok_or(SessionError::MissingUser)?;
    Ok(serde_json::from_str(raw)?)
}

/// Single entry point for session reads and writes.
///
/// Cloning is cheap; clones share the store and the subscriber list.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    /// Context over a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Backing store, shared with the quiz and practice history
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Read the current session. Storage failures and malformed user records
    /// are logged and read as absent values.
    pub fn get_session(&self) -> Session {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(target: "revisewise::session", error = %e, "cannot read token");
                None
            }
        };

        let user = match self.store.get(USER_KEY) {
            Ok(raw) => match decode_user(raw.as_deref()) {
                Ok(user) => Some(user),
                Err(SessionError::MissingUser) => None,
                Err(e) => {
                    tracing::warn!(target: "revisewise::session", error = %e, "ignoring stored user");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(target: "revisewise::session", error = %e, "cannot read user");
                None
            }
        };

        Session::new(token, user)
    }

    /// Persist a new session, token first.
    pub fn set_session(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(user)?;
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &encoded)?;

        tracing::info!(target: "revisewise::session", user_id = user.id, role = %user.role, "session started");
        self.notify(SessionEvent::Started {
            user_id: user.id,
            role: user.role,
        });
        Ok(())
    }

    /// Remove both keys. Subscribers are notified even if a removal fails,
    /// and the first failure is returned.
    pub fn clear_session(&self) -> Result<(), SessionError> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);

        tracing::info!(target: "revisewise::session", "session cleared");
        self.notify(SessionEvent::Cleared);

        token?;
        user?;
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: SessionEvent) {
        // Err only means nobody is subscribed.
        let _ = self.events.send(event);
    }
}
