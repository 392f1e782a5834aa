// ABOUTME: Custom axum extractors for authenticated users and JSON bodies
// ABOUTME: Rejections are AppErrors so every failure renders the standard JSON error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::errors::AppError;
use crate::middleware::ExtractedSession;
use crate::models::AuthSession;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Identity of the caller; rejects with `401 Unauthorized` when absent
///
/// Reads the [`ExtractedSession`] placed by the session middleware. Being a
/// parts extractor, it runs before any body extractor, so an anonymous
/// request is rejected before its body is looked at.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub AuthSession);

impl AuthenticatedUser {
    /// Id of the authenticated user
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<ExtractedSession>()
            .ok_or_else(AppError::unauthorized)
            .and_then(|extracted| extracted.require().cloned());

        if session.is_err() {
            debug!(path = %parts.uri.path(), "Rejecting anonymous request");
        }
        session.map(Self)
    }
}

/// JSON body whose parse failures become `400 {"error": "Invalid request"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        }
    }
}
