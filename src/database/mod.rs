// ABOUTME: Database connection management and schema migrations
// ABOUTME: Owns the SqlitePool and hands out per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! # Database Management
//!
//! `SQLite` storage for the auth collaborator's tables (users, accounts,
//! sessions, verifications) and for conversations and messages. Foreign keys
//! are enforced on every connection so deleting a conversation removes its
//! messages.
//!
//! Timestamps are stored as RFC 3339 text with fixed microsecond precision
//! and a `Z` suffix, so string order matches time order.

mod conversations;
/// Development data seeding
pub mod seed;
mod sessions;
mod users;

pub use conversations::{ConversationManager, NewMessage};
pub use seed::{DevDataSeeder, SeedReport};
pub use sessions::{generate_token, SessionManager};
pub use users::{NewUser, PersonaRecord, UserManager};

use crate::config::DatabaseUrl;
use crate::errors::DatabaseError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Database handle shared by all request handlers
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// File databases are created if missing. In-memory databases are pinned
    /// to a single connection that never expires, since every new `SQLite`
    /// memory connection is a fresh empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or migrations fail
    pub async fn new(url: &DatabaseUrl) -> Result<Self, DatabaseError> {
        let connection_string = url.to_connection_string();
        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| DatabaseError::ConnectionFailed {
                context: format!("invalid connection string {connection_string}: {e}"),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let DatabaseUrl::SQLite { path } = url {
                ensure_parent_dir(path).await?;
            }
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                context: format!("{connection_string}: {e}"),
            })?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Conversation and message operations
    #[must_use]
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.pool.clone())
    }

    /// Session lookups and creation
    #[must_use]
    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(self.pool.clone())
    }

    /// User, account and persona operations
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Dev persona and sample data seeding
    #[must_use]
    pub fn seeder(&self) -> DevDataSeeder {
        DevDataSeeder::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_auth().await?;
        self.migrate_conversations().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Tables owned by the authentication collaborator
    async fn migrate_auth(&self) -> Result<(), DatabaseError> {
        self.execute_schema(
            "users",
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                email_verified INTEGER NOT NULL DEFAULT 0,
                image TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "accounts",
            r"
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                account_id TEXT NOT NULL,
                provider_id TEXT NOT NULL,
                password TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (provider_id, account_id)
            )
            ",
        )
        .await?;

        self.execute_schema(
            "sessions",
            r"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                token TEXT NOT NULL UNIQUE,
                expires_at TEXT NOT NULL,
                ip_address TEXT,
                user_agent TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "verifications",
            r"
            CREATE TABLE IF NOT EXISTS verifications (
                id TEXT PRIMARY KEY,
                identifier TEXT NOT NULL,
                value TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "idx_sessions_user_id",
            "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id)",
        )
        .await
    }

    async fn migrate_conversations(&self) -> Result<(), DatabaseError> {
        self.execute_schema(
            "conversations",
            r"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "messages",
            r"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
                role TEXT NOT NULL CHECK (role IN ('user', 'assistant', 'system')),
                content TEXT NOT NULL,
                model TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "idx_conversations_user_updated",
            "CREATE INDEX IF NOT EXISTS idx_conversations_user_updated ON conversations(user_id, updated_at DESC)",
        )
        .await?;

        self.execute_schema(
            "idx_messages_conversation_created",
            "CREATE INDEX IF NOT EXISTS idx_messages_conversation_created ON messages(conversation_id, created_at)",
        )
        .await
    }

    async fn execute_schema(&self, object: &str, statement: &str) -> Result<(), DatabaseError> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationFailed {
                context: format!("{object}: {e}"),
            })?;
        Ok(())
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                context: format!("cannot create {}: {e}", parent.display()),
            }),
        _ => Ok(()),
    }
}

// ============================================================================
// Timestamp helpers
// ============================================================================

/// Current time truncated to the stored precision
#[must_use]
pub fn db_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage
#[must_use]
pub fn to_db_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
///
/// # Errors
///
/// Returns `DatabaseError::InvalidData` if the value is not RFC 3339
pub fn parse_db_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::InvalidData {
            field,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(to_db_timestamp(whole), "2025-01-02T03:04:05.000000Z");

        let later = whole + chrono::Duration::microseconds(1);
        assert!(to_db_timestamp(later) > to_db_timestamp(whole));
    }

    #[test]
    fn test_timestamp_round_trip_at_stored_precision() {
        let now = db_now();
        let parsed = parse_db_timestamp("created_at", &to_db_timestamp(now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_db_timestamp("updated_at", "yesterday").unwrap_err();
        assert!(err.to_string().contains("updated_at"));
    }
}
