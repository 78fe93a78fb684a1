//! Signed-in user and session models.

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a user with a fresh local id.
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
        }
    }

    /// Part of the email before the `@`, used as a display name fallback.
    pub fn local_part(email: &str) -> &str {
        email.split('@').next().unwrap_or(email)
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque presence token. Carries no authority.
    pub token: String,
    pub user: User,
}
