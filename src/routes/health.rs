// ABOUTME: Health check route for service monitoring
// ABOUTME: Unauthenticated liveness endpoint returning status and server time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /health` response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests
    pub status: String,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> Router {
        Router::new().route("/health", get(Self::health))
    }

    async fn health() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_owned(),
            timestamp: Utc::now(),
        })
    }
}
