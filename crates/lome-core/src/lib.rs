// ABOUTME: Core types and constants for the Lome chat API server
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

#![deny(unsafe_code)]

//! # Lome Core
//!
//! Foundation crate providing shared types and constants for the Lome chat
//! API server. It changes infrequently, so the server crate gets incremental
//! compilation benefits from keeping these types here.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Conversations, messages, users and sessions

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Conversation, Message, User, Session)
pub mod models;
