// ABOUTME: Development-only routes for local testing with seeded personas
// ABOUTME: Hidden behind the dev-only middleware, which answers 404 in production
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::constants::dev::{DEV_CREDITS, DEV_EMAIL_DOMAIN};
use crate::database::PersonaRecord;
use crate::errors::AppError;
use crate::middleware::dev_only_middleware;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Activity counters for a persona
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DevPersonaStats {
    /// Conversations owned
    pub conversation_count: i64,
    /// Messages across owned conversations
    pub message_count: i64,
}

/// A seeded developer persona
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DevPersona {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Email under the dev domain
    pub email: String,
    /// Whether the email is verified
    pub email_verified: bool,
    /// Avatar URL
    pub image: Option<String>,
    /// Activity counters
    pub stats: DevPersonaStats,
    /// Placeholder credit balance
    pub credits: String,
}

impl From<PersonaRecord> for DevPersona {
    fn from(record: PersonaRecord) -> Self {
        Self {
            id: record.user.id,
            name: record.user.name,
            email: record.user.email,
            email_verified: record.user.email_verified,
            image: record.user.image,
            stats: DevPersonaStats {
                conversation_count: record.conversation_count,
                message_count: record.message_count,
            },
            credits: DEV_CREDITS.to_owned(),
        }
    }
}

/// `GET /dev/personas` response
#[derive(Debug, Serialize, Deserialize)]
pub struct DevPersonasResponse {
    /// Personas ordered by email
    pub personas: Vec<DevPersona>,
}

/// Development routes
pub struct DevRoutes;

impl DevRoutes {
    /// Create the development routes, gated by environment
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/dev/personas", get(Self::list_personas))
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&resources),
                dev_only_middleware,
            ))
            .with_state(resources)
    }

    /// `GET /dev/personas`
    async fn list_personas(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let personas = resources
            .database
            .users()
            .list_personas(DEV_EMAIL_DOMAIN)
            .await?
            .into_iter()
            .map(DevPersona::from)
            .collect();

        Ok((StatusCode::OK, Json(DevPersonasResponse { personas })).into_response())
    }
}
