// ABOUTME: Database operations for users, credential accounts and dev personas
// ABOUTME: The server only reads users; writes exist for seeding and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use super::{db_now, parse_db_timestamp, to_db_timestamp};
use crate::constants::dev::CREDENTIAL_PROVIDER_ID;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Fields needed to create a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// User id; generated when `None`
    pub id: Option<String>,
    /// Unique email
    pub email: String,
    /// Display name
    pub name: String,
    /// Whether the email is verified
    pub email_verified: bool,
    /// Avatar URL
    pub image: Option<String>,
}

/// A dev persona with activity counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaRecord {
    /// The persona's user row
    pub user: User,
    /// Conversations owned by the persona
    pub conversation_count: i64,
    /// Messages across all of the persona's conversations
    pub message_count: i64,
}

/// User database operations
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (duplicate id or email included)
    pub async fn create_user(&self, new_user: &NewUser) -> AppResult<User> {
        let now = db_now();
        let stamp = to_db_timestamp(now);
        let id = new_user
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r"
            INSERT INTO users (id, email, name, email_verified, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(&id)
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(new_user.email_verified)
        .bind(new_user.image.as_deref())
        .bind(&stamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(User {
            id,
            email: new_user.email.clone(),
            name: new_user.name.clone(),
            email_verified: new_user.email_verified,
            image: new_user.image.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_user(&self, user_id: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, name, email_verified, image, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Store an email/password account for a user unless one already exists
    ///
    /// Returns `true` if a new account row was written.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn ensure_credential_account(
        &self,
        user_id: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<bool> {
        let stamp = to_db_timestamp(db_now());

        let result = sqlx::query(
            r"
            INSERT INTO accounts (id, user_id, account_id, provider_id, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (provider_id, account_id) DO NOTHING
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(email)
        .bind(CREDENTIAL_PROVIDER_ID)
        .bind(password_hash)
        .bind(&stamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create account: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Users whose email ends in `@{email_domain}`, with activity counts, ordered by email
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_personas(&self, email_domain: &str) -> AppResult<Vec<PersonaRecord>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.name, u.email_verified, u.image, u.created_at, u.updated_at,
                   (SELECT COUNT(*) FROM conversations c WHERE c.user_id = u.id) AS conversation_count,
                   (SELECT COUNT(*)
                      FROM messages m
                      JOIN conversations c ON m.conversation_id = c.id
                     WHERE c.user_id = u.id) AS message_count
            FROM users u
            WHERE u.email LIKE $1
            ORDER BY u.email ASC
            ",
        )
        .bind(format!("%@{email_domain}"))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list dev personas: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(PersonaRecord {
                    user: user_from_row(row)?,
                    conversation_count: row.get("conversation_count"),
                    message_count: row.get("message_count"),
                })
            })
            .collect()
    }
}

pub(super) fn user_from_row(row: &SqliteRow) -> AppResult<User> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        email_verified: row.get("email_verified"),
        image: row.get("image"),
        created_at: parse_db_timestamp("users.created_at", &created_at)?,
        updated_at: parse_db_timestamp("users.updated_at", &updated_at)?,
    })
}
