// ABOUTME: Route module organization for the Lome chat HTTP API
// ABOUTME: Route groups by domain plus shared extractors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Route module for the Lome chat server
//!
//! Each domain module holds its route definitions and thin handlers that
//! delegate to the database managers.

/// Chat streaming placeholder
pub mod chat;
/// Conversation and message routes
pub mod conversations;
/// Development-only persona routes
pub mod dev;
/// Authenticated-user and JSON body extractors
pub mod extractors;
/// Health check route
pub mod health;

pub use chat::ChatRoutes;
pub use conversations::ConversationRoutes;
pub use dev::DevRoutes;
pub use extractors::{ApiJson, AuthenticatedUser};
pub use health::HealthRoutes;
