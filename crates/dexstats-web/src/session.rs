//! Login sessions and the cookie that names them.
//!
//! The dashboard never creates or reads sessions; the Discord OAuth
//! callback (served elsewhere) does. Logout only needs to find the
//! session id of a request and destroy it.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "dexstats.sid";

/// Errors reported by a session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing store could not be used.
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// A logged-in Discord user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Discord user id.
    pub user_id: String,
    /// Discord username at login time.
    pub username: String,
}

/// Storage for login sessions, keyed by session id.
pub trait SessionStore: Debug + Send + Sync {
    /// Remove the session stored under `id`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be written.
    fn destroy(&self, id: &str) -> Result<bool, SessionError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<BTreeMap<String, Session>>,
}

impl MemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under `id`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the lock is poisoned.
    pub fn insert(&self, id: &str, session: Session) -> Result<(), SessionError> {
        self.sessions
            .write()
            .map_err(poisoned)?
            .insert(id.to_owned(), session);
        Ok(())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |sessions| sessions.len())
    }

    /// Whether no session is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_err: E) -> SessionError {
    SessionError::Unavailable(String::from("session lock poisoned"))
}

impl SessionStore for MemorySessionStore {
    fn destroy(&self, id: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.write().map_err(poisoned)?.remove(id).is_some())
    }
}

/// Extract the session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that expires the session cookie.
pub fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
