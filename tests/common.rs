// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, server resources, users and session cookies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `lome_chat_server`

use anyhow::Result;
use axum::Router;
use chrono::Duration;
use lome_chat_server::{
    config::{environment::DatabaseConfig, DatabaseUrl, Environment, ServerConfig},
    database::{Database, NewUser},
    models::{Session, User},
    resources::ServerResources,
    server::build_router,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

/// Configuration pointing at an in-memory database
pub fn test_config(environment: Environment) -> ServerConfig {
    ServerConfig {
        environment,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        ..ServerConfig::default()
    }
}

/// Server resources over a fresh in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    create_test_server_resources_for(Environment::Testing).await
}

/// Server resources for a specific environment
pub async fn create_test_server_resources_for(
    environment: Environment,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = Arc::new(test_config(environment));
    Ok(Arc::new(ServerResources::new(database, config)))
}

/// Full application router, layers included
pub fn create_test_router(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}

/// Create a user with a unique email
pub async fn create_test_user(database: &Database) -> Result<User> {
    create_test_user_with_email(database, &format!("user-{}@example.com", Uuid::new_v4())).await
}

/// Create a user with a specific email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<User> {
    let user = database
        .users()
        .create_user(&NewUser {
            id: None,
            email: email.to_owned(),
            name: "Test User".to_owned(),
            email_verified: true,
            image: None,
        })
        .await?;
    Ok(user)
}

/// Issue a one-hour session for a user
pub async fn create_test_session(database: &Database, user_id: &str) -> Result<Session> {
    Ok(database
        .sessions()
        .create_session(user_id, Duration::hours(1))
        .await?)
}

/// `Cookie` header value carrying a session token
pub fn session_cookie(resources: &ServerResources, token: &str) -> String {
    format!("{}={token}", resources.config.session.cookie_name)
}

/// Create a user and return it with a ready-to-send cookie header value
pub async fn create_authenticated_user(resources: &ServerResources) -> Result<(User, String)> {
    let user = create_test_user(&resources.database).await?;
    let session = create_test_session(&resources.database, &user.id).await?;
    let cookie = session_cookie(resources, &session.token);
    Ok((user, cookie))
}
