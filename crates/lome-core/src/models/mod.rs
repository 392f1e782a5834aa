// ABOUTME: Core data models for conversations, messages, users and sessions
// ABOUTME: Serializable types shared by the store layer and HTTP handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Domain models. JSON field names are camelCase to match what the browser
//! client expects.

/// Conversations and messages
pub mod conversation;

/// Users, sessions and the resolved request identity
pub mod user;

pub use conversation::{Conversation, Message, MessageRole};
pub use user::{AuthSession, Session, User};
