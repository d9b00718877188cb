//! Explicit session state for the front end.
//!
//! The navigation chrome receives a `Session` snapshot at construction
//! instead of probing ambient browser storage. Login and logout are the
//! only transitions, owned by `SessionManager`; there is no credential
//! verification or persistence here.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from session transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a session is already active for '{0}'")]
    AlreadyAuthenticated(String),

    #[error("no active session")]
    NotAuthenticated,
}

/// Read-only session snapshot handed to the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user, if any.
    pub user: Option<String>,
    /// When the session started.
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Owns the session state and its transitions.
#[derive(Debug, Default)]
pub struct SessionManager {
    state: Mutex<Session>,
}

impl SessionManager {
    /// Create a manager with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user`.
    pub fn login(&self, user: impl Into<String>) -> Result<Session, SessionError> {
        let mut state = self.state.lock();
        if let Some(existing) = &state.user {
            return Err(SessionError::AlreadyAuthenticated(existing.clone()));
        }
        *state = Session {
            user: Some(user.into()),
            started_at: Some(Utc::now()),
        };
        tracing::info!(user = state.user.as_deref(), "session started");
        Ok(state.clone())
    }

    /// End the active session.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        if state.user.is_none() {
            return Err(SessionError::NotAuthenticated);
        }
        tracing::info!(user = state.user.as_deref(), "session ended");
        *state = Session::default();
        Ok(())
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.lock().clone()
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.lock().is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_logout_round_trips() {
        let manager = SessionManager::new();
        assert!(!manager.is_authenticated());

        let session = manager.login("inspector").unwrap();
        assert_eq!(session.user.as_deref(), Some("inspector"));
        assert!(session.started_at.is_some());
        assert!(manager.is_authenticated());

        manager.logout().unwrap();
        assert!(!manager.is_authenticated());
        assert!(manager.session().started_at.is_none());
    }

    #[test]
    fn double_login_is_rejected() {
        let manager = SessionManager::new();
        manager.login("first").unwrap();
        assert_eq!(
            manager.login("second").unwrap_err(),
            SessionError::AlreadyAuthenticated("first".into())
        );
    }

    #[test]
    fn logout_without_session_is_rejected() {
        let manager = SessionManager::new();
        assert_eq!(manager.logout().unwrap_err(), SessionError::NotAuthenticated);
    }
}
