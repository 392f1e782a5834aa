// ABOUTME: Tower middleware resolving the request session once per request
// ABOUTME: Injects ExtractedSession into request extensions for route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Session Middleware
//!
//! Calls the configured [`SessionResolver`](crate::auth::SessionResolver) and
//! stores the outcome in request extensions. Anonymous requests pass through
//! and handlers decide whether an identity is required. A resolver failure is
//! a store failure and ends the request with the resolver's error.

use crate::errors::AppError;
use crate::models::AuthSession;
use crate::resources::ServerResources;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

/// Resolved identity for the current request, `None` when anonymous
#[derive(Debug, Clone, Default)]
pub struct ExtractedSession(pub Option<AuthSession>);

impl ExtractedSession {
    /// Get the session if available
    #[must_use]
    pub const fn get(&self) -> Option<&AuthSession> {
        self.0.as_ref()
    }

    /// The session, or `401 Unauthorized`
    ///
    /// # Errors
    ///
    /// Returns `AppError::unauthorized` when no session is attached
    pub fn require(&self) -> Result<&AuthSession, AppError> {
        self.0.as_ref().ok_or_else(AppError::unauthorized)
    }
}

/// Session middleware
///
/// Answers with the resolver's error instead of running the handler when
/// the session store cannot be read.
pub async fn session_middleware(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = match resources.session_resolver.resolve(req.headers()).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, path = %req.uri().path(), "Session resolution failed");
            return e.into_response();
        }
    };

    if let Some(ref auth) = session {
        tracing::Span::current().record("user_id", auth.user.id.as_str());
    }

    req.extensions_mut().insert(ExtractedSession(session));
    next.run(req).await
}
