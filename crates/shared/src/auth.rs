//! Session context and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Resolved proof of an authenticated request.
///
/// Built by the session middleware from the session cookie and passed
/// explicitly through the call chain; there is no ambient session global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// The authenticated user's id.
    pub user_id: i64,
    /// The authenticated user's role.
    pub role: Role,
    /// When the backing session expires. Fixed at issuance.
    pub expires_at: DateTime<Utc>,
}

impl SessionContext {
    /// Creates a new session context.
    #[must_use]
    pub const fn new(user_id: i64, role: Role, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            role,
            expires_at,
        }
    }
}

/// Registration request payload.
///
/// The role arrives as a string and is parsed against the closed enum in the
/// handler so a bad value fails as a field-level validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username. Unique across all roles, case-sensitive.
    pub username: String,
    /// Plaintext password. Hashed before it touches the store.
    pub password: String,
    /// Requested role: "agency", "donor", or "government".
    pub role: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_context_round_trip() {
        let ctx = SessionContext::new(7, Role::Donor, Utc::now());
        let json = serde_json::to_string(&ctx).unwrap();
        let back: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, 7);
        assert_eq!(back.role, Role::Donor);
    }
}
