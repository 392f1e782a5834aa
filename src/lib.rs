// ABOUTME: Main library entry point for the Lome chat API server
// ABOUTME: Conversation persistence with per-user ownership behind an axum HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

#![deny(unsafe_code)]

//! # Lome Chat Server
//!
//! Backend for the Lome chat web application. It stores conversations and
//! their messages, and only ever shows a user their own conversations.
//!
//! ## Architecture
//!
//! - **Config**: typed settings loaded from environment variables
//! - **Database**: `SQLite` schema and per-table managers
//! - **Auth**: resolves the session cookie into a user
//! - **Middleware**: session injection, dev-only gating, JSON error bodies, CORS, request tracing
//! - **Routes**: conversation, health, chat and dev endpoints
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lome_chat_server::config::environment::ServerConfig;
//! use lome_chat_server::database::Database;
//! use lome_chat_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ServerConfig::from_env()?);
//!     let database = Database::new(&config.database.url).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     lome_chat_server::server::run(resources).await
//! }
//! ```

/// Session resolution and cookie parsing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage and migrations
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared state handed to handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;
