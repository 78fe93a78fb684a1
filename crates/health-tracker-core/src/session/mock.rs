//! Placeholder credential check.
//!
//! Not a security control. The rules below only decide whether the demo
//! UI lets someone through.

use super::{AuthProvider, SessionError, SessionResult};
use crate::models::{Session, User};

/// Minimum password length accepted by the mock check.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Accepts any email containing `@` with a password of at least
/// [`MIN_PASSWORD_LEN`] characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthProvider;

impl MockAuthProvider {
    fn check(email: &str, password: &str) -> SessionResult<()> {
        if email.contains('@') && password.chars().count() >= MIN_PASSWORD_LEN {
            Ok(())
        } else {
            Err(SessionError::InvalidCredentials)
        }
    }

    /// Opaque presence token: hex of the email and issue time.
    fn token_for(email: &str) -> String {
        let issued = chrono::Utc::now().timestamp_millis();
        hex::encode(format!("{}:{}", email, issued))
    }
}

impl AuthProvider for MockAuthProvider {
    fn login(&self, email: &str, password: &str) -> SessionResult<Session> {
        Self::check(email, password)?;
        let name = User::local_part(email).to_string();
        Ok(Session {
            token: Self::token_for(email),
            user: User::new(name, email.to_string()),
        })
    }

    fn register(&self, name: &str, email: &str, password: &str) -> SessionResult<Session> {
        let mut session = self.login(email, password)?;
        if !name.trim().is_empty() {
            session.user.name = name.to_string();
        }
        Ok(session)
    }
}
