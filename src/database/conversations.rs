// ABOUTME: Database operations for conversations and their messages
// ABOUTME: Every conversation query is scoped by owner; multi-row writes run in transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use super::{db_now, parse_db_timestamp, to_db_timestamp};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{Conversation, Message, MessageRole};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const CONVERSATION_COLUMNS: &str = "id, user_id, title, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, conversation_id, role, content, model, created_at";

/// Message to append to an existing conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Author role
    pub role: MessageRole,
    /// Non-empty content
    pub content: String,
    /// Producing model, if any
    pub model: Option<String>,
}

// ============================================================================
// Conversation Manager
// ============================================================================

/// Conversation and message database operations
pub struct ConversationManager {
    pool: SqlitePool,
}

impl ConversationManager {
    /// Create a new conversation manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Conversation Operations
    // ========================================================================

    /// List a user's conversations, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Conversation>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {CONVERSATION_COLUMNS}
            FROM conversations
            WHERE user_id = $1
            ORDER BY updated_at DESC, created_at DESC
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list conversations: {e}")))?;

        rows.iter().map(conversation_from_row).collect()
    }

    /// Get a conversation only if it belongs to `user_id`
    ///
    /// Absent and foreign conversations both return `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_owned(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Conversation>> {
        let row = sqlx::query(&format!(
            r"
            SELECT {CONVERSATION_COLUMNS}
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "
        ))
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get conversation: {e}")))?;

        row.as_ref().map(conversation_from_row).transpose()
    }

    /// Create a conversation, optionally with a first user message
    ///
    /// Both rows are written in one transaction: either both exist afterwards
    /// or neither does.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        first_message: Option<&str>,
    ) -> AppResult<(Conversation, Option<Message>)> {
        let now = db_now();
        let stamp = to_db_timestamp(now);
        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            title: title.to_owned(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO conversations (id, user_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&conversation.id)
        .bind(user_id)
        .bind(title)
        .bind(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create conversation: {e}")))?;

        let message = match first_message {
            Some(content) => {
                let message = Message {
                    id: Uuid::new_v4().to_string(),
                    conversation_id: conversation.id.clone(),
                    role: MessageRole::User,
                    content: content.to_owned(),
                    model: None,
                    created_at: now,
                };

                sqlx::query(
                    r"
                    INSERT INTO messages (id, conversation_id, role, content, model, created_at)
                    VALUES ($1, $2, $3, $4, NULL, $5)
                    ",
                )
                .bind(&message.id)
                .bind(&message.conversation_id)
                .bind(message.role.as_str())
                .bind(&message.content)
                .bind(&stamp)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to create first message: {e}")))?;

                Some(message)
            }
            None => None,
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit conversation: {e}")))?;

        Ok((conversation, message))
    }

    /// Rename a conversation owned by `user_id` and bump `updated_at`
    ///
    /// Returns `None` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn rename(
        &self,
        conversation_id: &str,
        user_id: &str,
        title: &str,
    ) -> AppResult<Option<Conversation>> {
        let now = to_db_timestamp(db_now());

        let row = sqlx::query(&format!(
            r"
            UPDATE conversations
            SET title = $1, updated_at = MAX(updated_at, $2)
            WHERE id = $3 AND user_id = $4
            RETURNING {CONVERSATION_COLUMNS}
            "
        ))
        .bind(title)
        .bind(&now)
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update conversation title: {e}")))?;

        row.as_ref().map(conversation_from_row).transpose()
    }

    /// Delete a conversation owned by `user_id`; messages cascade
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, conversation_id: &str, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM conversations
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete conversation: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Message Operations
    // ========================================================================

    /// Messages of a conversation in creation order
    ///
    /// Callers must have checked ownership of the conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_messages(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC, rowid ASC
            "
        ))
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get messages: {e}")))?;

        rows.iter().map(message_from_row).collect()
    }

    /// Append a message and bump the parent's `updated_at` in one transaction
    ///
    /// `updated_at` never moves backwards. Returns `None` if the insert
    /// produced no row. Callers must have checked ownership.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn append_message(
        &self,
        conversation_id: &str,
        message: &NewMessage,
    ) -> AppResult<Option<Message>> {
        let now = to_db_timestamp(db_now());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let row = sqlx::query(&format!(
            r"
            INSERT INTO messages (id, conversation_id, role, content, model, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MESSAGE_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(conversation_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.model.as_deref())
        .bind(&now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to add message: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let created = message_from_row(&row)?;

        sqlx::query(
            r"
            UPDATE conversations
            SET updated_at = MAX(updated_at, $1)
            WHERE id = $2
            ",
        )
        .bind(&now)
        .bind(conversation_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update conversation timestamp: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit message: {e}")))?;

        Ok(Some(created))
    }

    /// Number of stored messages for a conversation id, owned or not
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count_messages(&self, conversation_id: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE conversation_id = $1")
            .bind(conversation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count messages: {e}")))
    }
}

// ============================================================================
// Row mapping
// ============================================================================

fn conversation_from_row(row: &SqliteRow) -> AppResult<Conversation> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Conversation {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        created_at: parse_db_timestamp("conversations.created_at", &created_at)?,
        updated_at: parse_db_timestamp("conversations.updated_at", &updated_at)?,
    })
}

fn message_from_row(row: &SqliteRow) -> AppResult<Message> {
    let role: String = row.get("role");
    let created_at: String = row.get("created_at");

    Ok(Message {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        role: role.parse().map_err(|_| DatabaseError::InvalidData {
            field: "messages.role",
            value: role.clone(),
        })?,
        content: row.get("content"),
        model: row.get("model"),
        created_at: parse_db_timestamp("messages.created_at", &created_at)?,
    })
}
