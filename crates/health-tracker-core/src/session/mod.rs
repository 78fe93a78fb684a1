//! Session gate over a pluggable auth provider.
//!
//! The gate only persists whatever session the provider hands back and
//! rebuilds the signed-in user from storage. Credential checking is the
//! provider's business; see [`MockAuthProvider`] for the placeholder.

mod mock;

pub use mock::*;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::StorageKeys;
use crate::models::{Session, User};
use crate::store::{KeyValueStore, StoreError};

/// Session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Source of sessions.
pub trait AuthProvider: Send + Sync {
    /// Sign in an existing user.
    fn login(&self, email: &str, password: &str) -> SessionResult<Session>;

    /// Create an account and sign it in.
    fn register(&self, name: &str, email: &str, password: &str) -> SessionResult<Session>;
}

/// Persists the current session and answers "who is signed in".
pub struct SessionGate<A: AuthProvider> {
    provider: A,
    store: Arc<dyn KeyValueStore>,
    token_key: String,
    user_key: String,
}

impl<A: AuthProvider> SessionGate<A> {
    pub fn new(provider: A, store: Arc<dyn KeyValueStore>, keys: &StorageKeys) -> Self {
        Self {
            provider,
            store,
            token_key: keys.token.clone(),
            user_key: keys.user.clone(),
        }
    }

    /// Sign in and persist the session.
    pub fn login(&self, email: &str, password: &str) -> SessionResult<Session> {
        let session = self.provider.login(email, password)?;
        self.persist(&session)?;
        info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    /// Register, sign in, and persist the session.
    pub fn register(&self, name: &str, email: &str, password: &str) -> SessionResult<Session> {
        let session = self.provider.register(name, email, password)?;
        self.persist(&session)?;
        info!(user_id = %session.user.id, "registered");
        Ok(session)
    }

    /// Clear persisted session state. The token goes first, so a partial
    /// logout still reads as signed out.
    pub fn logout(&self) -> SessionResult<()> {
        self.store.remove(&self.token_key)?;
        self.store.remove(&self.user_key)?;
        info!("signed out");
        Ok(())
    }

    /// The persisted user, or `None` when signed out, absent, or unreadable.
    pub fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }
        let raw = match self.store.get(&self.user_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read session user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "discarding malformed session user");
                None
            }
        }
    }

    /// Whether a session token is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.get(&self.token_key), Ok(Some(_)))
    }

    fn persist(&self, session: &Session) -> SessionResult<()> {
        // token last: its presence marks a complete session
        let user_json = serde_json::to_string(&session.user)?;
        self.store.set(&self.user_key, &user_json)?;
        self.store.set(&self.token_key, &session.token)?;
        Ok(())
    }
}
