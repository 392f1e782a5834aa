// ABOUTME: Session resolution for incoming requests
// ABOUTME: SessionResolver abstracts the authentication collaborator's read side
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! # Session Resolution
//!
//! Signup, login and logout belong to the authentication service. This server
//! only needs to answer "who sent this request?", which is what
//! [`SessionResolver`] does. The default [`DatabaseSessionResolver`] reads the
//! session cookie and looks the token up in the shared `sessions` table.

/// Cookie header parsing
pub mod cookies;

use crate::database::SessionManager;
use crate::errors::AppResult;
use crate::models::AuthSession;
use async_trait::async_trait;
use chrono::Utc;
use cookies::get_cookie_value;
use http::HeaderMap;
use sqlx::SqlitePool;
use tracing::debug;

/// Resolves the identity attached to a request
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Return the active session for these headers, or `None` if there is none
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be queried
    async fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<AuthSession>>;
}

/// Cookie-based resolver backed by the `sessions` and `users` tables
pub struct DatabaseSessionResolver {
    sessions: SessionManager,
    cookie_name: String,
}

impl DatabaseSessionResolver {
    /// Create a resolver reading `cookie_name`
    #[must_use]
    pub fn new(pool: SqlitePool, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions: SessionManager::new(pool),
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl SessionResolver for DatabaseSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> AppResult<Option<AuthSession>> {
        let Some(token) = get_cookie_value(headers, &self.cookie_name) else {
            debug!(cookie = %self.cookie_name, "No session cookie on request");
            return Ok(None);
        };

        let Some(auth) = self.sessions.find_by_token(&token).await? else {
            debug!("Session token not found");
            return Ok(None);
        };

        if auth.session.is_expired_at(Utc::now()) {
            debug!(session.id = %auth.session.id, user.id = %auth.user.id, "Session expired");
            return Ok(None);
        }

        Ok(Some(auth))
    }
}
