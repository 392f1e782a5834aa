// ABOUTME: Database operations for login sessions
// ABOUTME: Token lookup joins the owning user so one query resolves a request identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use super::users::user_from_row;
use super::{db_now, parse_db_timestamp, to_db_timestamp};
use crate::constants::session::TOKEN_BYTES;
use crate::errors::{AppError, AppResult};
use crate::models::{AuthSession, Session};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Session database operations
pub struct SessionManager {
    pool: SqlitePool,
}

impl SessionManager {
    /// Create a new session manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Issue a session for a user with a random hex token
    ///
    /// # Errors
    ///
    /// Returns `AppError::invalid_input` if `now + ttl` is not a representable
    /// timestamp, or an error if database operation fails
    pub async fn create_session(&self, user_id: &str, ttl: Duration) -> AppResult<Session> {
        let now = db_now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::invalid_input("session lifetime is out of range"))?;
        self.insert_session(user_id, generate_token(), now, expires_at)
            .await
    }

    /// Insert a session with explicit token and expiry
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn insert_session(
        &self,
        user_id: &str,
        token: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        let id = Uuid::new_v4().to_string();
        let created = to_db_timestamp(created_at);

        sqlx::query(
            r"
            INSERT INTO sessions (id, user_id, token, expires_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&token)
        .bind(to_db_timestamp(expires_at))
        .bind(&created)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create session: {e}")))?;

        Ok(Session {
            id,
            user_id: user_id.to_owned(),
            token,
            expires_at,
            created_at,
        })
    }

    /// Find the session for `token` together with its user
    ///
    /// Expiry is not checked here; see [`Session::is_expired_at`].
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<AuthSession>> {
        let row = sqlx::query(
            r"
            SELECT s.id AS session_id, s.user_id AS session_user_id, s.token,
                   s.expires_at, s.created_at AS session_created_at,
                   u.id, u.email, u.name, u.email_verified, u.image, u.created_at, u.updated_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up session: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at: String = row.get("expires_at");
        let created_at: String = row.get("session_created_at");
        let session = Session {
            id: row.get("session_id"),
            user_id: row.get("session_user_id"),
            token: row.get("token"),
            expires_at: parse_db_timestamp("sessions.expires_at", &expires_at)?,
            created_at: parse_db_timestamp("sessions.created_at", &created_at)?,
        };

        Ok(Some(AuthSession {
            user: user_from_row(&row)?,
            session,
        }))
    }

    /// Remove sessions that expired at or before `now`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(to_db_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to prune sessions: {e}")))?;

        Ok(result.rows_affected())
    }
}

/// Random session token, hex encoded
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let first = generate_token();
        let second = generate_token();
        assert_eq!(first.len(), TOKEN_BYTES * 2);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
