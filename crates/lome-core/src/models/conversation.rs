// ABOUTME: Conversation and message models
// ABOUTME: A conversation belongs to one user; a message belongs to one conversation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A titled conversation owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Conversation id (UUID v4)
    pub id: String,
    /// Owning user, never changes after creation
    pub user_id: String,
    /// Title, may be empty
    pub title: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Bumped on rename and on every appended message
    pub updated_at: DateTime<Utc>,
}

/// Author role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Written by the end user
    User,
    /// Produced by the model
    Assistant,
    /// System prompt
    System,
}

impl MessageRole {
    /// Stored and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            other => Err(format!("unknown message role: {other}")),
        }
    }
}

/// A single immutable message inside a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id (UUID v4)
    pub id: String,
    /// Parent conversation
    pub conversation_id: String,
    /// Author role
    pub role: MessageRole,
    /// Non-empty text content
    pub content: String,
    /// Model that produced the message, serialized as `null` when absent
    pub model: Option<String>,
    /// Creation time, defines order within the conversation
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            assert_eq!(role.as_str().parse::<MessageRole>().unwrap(), role);
        }
        assert!("moderator".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_message_serializes_null_model() {
        let message = Message {
            id: "m1".into(),
            conversation_id: "c1".into(),
            role: MessageRole::Assistant,
            content: "hi".into(),
            model: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["conversationId"], "c1");
        assert_eq!(json["role"], "assistant");
        assert!(json.get("model").is_some_and(serde_json::Value::is_null));
    }
}
