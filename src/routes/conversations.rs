// ABOUTME: Conversation route handlers enforcing per-user ownership
// ABOUTME: List, read, create, rename and delete conversations, and append messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Conversation routes
//!
//! Requests pass through the session middleware and every handler requires
//! an authenticated user. A conversation that does not exist and one that
//! belongs to someone else both answer `404 {"error": "Conversation not found"}`,
//! so other users' conversation ids are never confirmed.

use super::extractors::{ApiJson, AuthenticatedUser};
use crate::constants::error_messages;
use crate::constants::limits::{MAX_CONVERSATION_TITLE_CHARS, MIN_CONVERSATION_TITLE_CHARS};
use crate::database::{ConversationManager, NewMessage};
use crate::errors::{AppError, AppResult};
use crate::middleware::session_middleware;
use crate::models::{Conversation, Message, MessageRole};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

/// First message supplied when creating a conversation
#[derive(Debug, Clone, Deserialize)]
pub struct FirstMessage {
    /// Message content, must be non-empty
    pub content: String,
}

/// Request to create a new conversation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    /// Conversation title, empty when omitted
    #[serde(default)]
    pub title: Option<String>,
    /// Optional first user message
    #[serde(default)]
    pub first_message: Option<FirstMessage>,
}

/// Request to rename a conversation
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateConversationRequest {
    /// New title, 1 to 255 characters
    pub title: String,
}

/// Request to append a message
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageRequest {
    /// Author role
    pub role: MessageRole,
    /// Message content, must be non-empty
    pub content: String,
    /// Producing model
    #[serde(default)]
    pub model: Option<String>,
}

/// `GET /conversations` response
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationListResponse {
    /// Conversations, most recently updated first
    pub conversations: Vec<Conversation>,
}

/// `GET /conversations/:id` response
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationWithMessagesResponse {
    /// The conversation
    pub conversation: Conversation,
    /// Its messages, oldest first
    pub messages: Vec<Message>,
}

/// `POST /conversations` response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateConversationResponse {
    /// The new conversation
    pub conversation: Conversation,
    /// The first message; the key is omitted when none was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// `PATCH /conversations/:id` response
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationResponse {
    /// The updated conversation
    pub conversation: Conversation,
}

/// `DELETE /conversations/:id` response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConversationResponse {
    /// Always `true`
    pub deleted: bool,
}

/// `POST /conversations/:id/messages` response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The stored message
    pub message: Message,
}

// ============================================================================
// Validation
// ============================================================================

/// Check a rename title: 1 to 255 characters, counted as chars, not trimmed
///
/// # Errors
///
/// Returns `AppError::invalid_input` when the length is out of range
pub fn validate_title(title: &str) -> AppResult<()> {
    let length = title.chars().count();
    if (MIN_CONVERSATION_TITLE_CHARS..=MAX_CONVERSATION_TITLE_CHARS).contains(&length) {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "title must be between {MIN_CONVERSATION_TITLE_CHARS} and {MAX_CONVERSATION_TITLE_CHARS} characters"
        )))
    }
}

/// Check message content is non-empty
///
/// # Errors
///
/// Returns `AppError::invalid_input` for empty content
pub fn validate_content(content: &str) -> AppResult<()> {
    if content.is_empty() {
        Err(AppError::invalid_input("content must not be empty"))
    } else {
        Ok(())
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Conversation routes
pub struct ConversationRoutes;

impl ConversationRoutes {
    /// Create all conversation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/conversations",
                get(Self::list_conversations).post(Self::create_conversation),
            )
            .route(
                "/conversations/:id",
                get(Self::get_conversation)
                    .patch(Self::update_conversation)
                    .delete(Self::delete_conversation),
            )
            .route(
                "/conversations/:id/messages",
                post(Self::create_message),
            )
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&resources),
                session_middleware,
            ))
            .with_state(resources)
    }

    fn manager(resources: &ServerResources) -> ConversationManager {
        resources.database.conversations()
    }

    /// Load a conversation owned by the caller or fail with 404
    async fn owned_conversation(
        manager: &ConversationManager,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<Conversation> {
        manager
            .get_owned(conversation_id, user_id)
            .await?
            .ok_or_else(AppError::conversation_not_found)
    }

    /// `GET /conversations`
    async fn list_conversations(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
    ) -> Result<Response, AppError> {
        let conversations = Self::manager(&resources)
            .list_for_user(auth.user_id())
            .await?;

        Ok((StatusCode::OK, Json(ConversationListResponse { conversations })).into_response())
    }

    /// `GET /conversations/:id`
    async fn get_conversation(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(conversation_id): Path<String>,
    ) -> Result<Response, AppError> {
        let manager = Self::manager(&resources);
        let conversation =
            Self::owned_conversation(&manager, &conversation_id, auth.user_id()).await?;
        let messages = manager.list_messages(&conversation.id).await?;

        let response = ConversationWithMessagesResponse {
            conversation,
            messages,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// `POST /conversations`
    async fn create_conversation(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        ApiJson(request): ApiJson<CreateConversationRequest>,
    ) -> Result<Response, AppError> {
        let first_message = request.first_message.map(|m| m.content);
        if let Some(content) = &first_message {
            validate_content(content)?;
        }
        let title = request.title.unwrap_or_default();

        let (conversation, message) = Self::manager(&resources)
            .create(auth.user_id(), &title, first_message.as_deref())
            .await?;

        info!(
            user.id = %auth.user_id(),
            conversation.id = %conversation.id,
            with_first_message = message.is_some(),
            "Conversation created"
        );

        let response = CreateConversationResponse {
            conversation,
            message,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// `PATCH /conversations/:id`
    async fn update_conversation(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(conversation_id): Path<String>,
        ApiJson(request): ApiJson<UpdateConversationRequest>,
    ) -> Result<Response, AppError> {
        validate_title(&request.title)?;

        let manager = Self::manager(&resources);
        Self::owned_conversation(&manager, &conversation_id, auth.user_id()).await?;

        let conversation = manager
            .rename(&conversation_id, auth.user_id(), &request.title)
            .await?
            .ok_or_else(|| {
                AppError::store_inconsistency(error_messages::FAILED_TO_UPDATE_CONVERSATION)
            })?;

        info!(
            user.id = %auth.user_id(),
            conversation.id = %conversation.id,
            "Conversation renamed"
        );

        Ok((StatusCode::OK, Json(ConversationResponse { conversation })).into_response())
    }

    /// `DELETE /conversations/:id`
    async fn delete_conversation(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(conversation_id): Path<String>,
    ) -> Result<Response, AppError> {
        let manager = Self::manager(&resources);
        Self::owned_conversation(&manager, &conversation_id, auth.user_id()).await?;

        // A concurrent delete between the read and here leaves nothing to remove.
        let removed = manager.delete(&conversation_id, auth.user_id()).await?;

        info!(
            user.id = %auth.user_id(),
            conversation.id = %conversation_id,
            removed,
            "Conversation deleted"
        );

        Ok((
            StatusCode::OK,
            Json(DeleteConversationResponse { deleted: true }),
        )
            .into_response())
    }

    /// `POST /conversations/:id/messages`
    async fn create_message(
        State(resources): State<Arc<ServerResources>>,
        auth: AuthenticatedUser,
        Path(conversation_id): Path<String>,
        ApiJson(request): ApiJson<CreateMessageRequest>,
    ) -> Result<Response, AppError> {
        validate_content(&request.content)?;

        let manager = Self::manager(&resources);
        Self::owned_conversation(&manager, &conversation_id, auth.user_id()).await?;

        let new_message = NewMessage {
            role: request.role,
            content: request.content,
            model: request.model,
        };
        let message = manager
            .append_message(&conversation_id, &new_message)
            .await?
            .ok_or_else(|| AppError::store_inconsistency(error_messages::FAILED_TO_CREATE_MESSAGE))?;

        info!(
            user.id = %auth.user_id(),
            conversation.id = %conversation_id,
            message.id = %message.id,
            message.role = %message.role,
            "Message appended"
        );

        Ok((StatusCode::CREATED, Json(MessageResponse { message })).into_response())
    }
}
