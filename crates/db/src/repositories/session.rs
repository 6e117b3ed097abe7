//! Session repository for database operations.
//!
//! Sessions are keyed by an opaque bearer token. The plaintext token is
//! returned to the caller exactly once at creation; only its SHA-256 hash
//! is stored.

use std::str::FromStr;

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use sha2::{Digest, Sha256};

use fundtrack_shared::{Role, SessionContext};

use crate::entities::sessions;

/// A freshly created session together with its one-time plaintext token.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    /// The opaque bearer token to hand to the transport layer.
    pub token: String,
    /// The persisted session row.
    pub model: sessions::Model,
}

/// Session repository for issue, resolve, and destroy operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hashes a bearer token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Generates a cryptographically random, unguessable bearer token.
    fn generate_token() -> String {
        let bytes: [u8; 32] = rand::random();
        base64_url::encode(&bytes)
    }

    /// Creates a new session for a user with a fixed TTL from now.
    ///
    /// A non-positive TTL produces an already-expired session; tests lean on
    /// this instead of sleeping.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i64,
        role: Role,
        ttl: Duration,
    ) -> Result<CreatedSession, DbErr> {
        let token = Self::generate_token();
        let now = Utc::now();

        let session = sessions::ActiveModel {
            token_hash: Set(Self::hash_token(&token)),
            user_id: Set(user_id),
            role: Set(role.as_str().to_string()),
            expires_at: Set((now + ttl).into()),
            created_at: Set(now.into()),
            ..Default::default()
        };

        let model = session.insert(&self.db).await?;
        Ok(CreatedSession { token, model })
    }

    /// Resolves a bearer token to a session context.
    ///
    /// Returns `Ok(None)` for an unknown token and equally for one past its
    /// expiry; expiry is fixed from issuance, never slid forward.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails, or if a stored role
    /// string no longer parses.
    pub async fn resolve(&self, token: &str) -> Result<Option<SessionContext>, DbErr> {
        let found = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .one(&self.db)
            .await?;

        let Some(session) = found else {
            return Ok(None);
        };

        let expires_at = session.expires_at.with_timezone(&Utc);
        if expires_at <= Utc::now() {
            return Ok(None);
        }

        let role = Role::from_str(&session.role).map_err(DbErr::Type)?;
        Ok(Some(SessionContext::new(session.user_id, role, expires_at)))
    }

    /// Destroys the session behind a token. Idempotent: destroying a token
    /// twice, or one that never existed, is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn destroy(&self, token: &str) -> Result<(), DbErr> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Deletes expired sessions (for maintenance).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn cleanup_expired(&self) -> Result<u64, DbErr> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lt(Utc::now()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
