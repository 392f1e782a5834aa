// ABOUTME: Middleware hiding development-only routes in production
// ABOUTME: Production requests get 404 before the handler or store is reached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Reject with `404 {"error": "Not Found"}` when running in production
pub async fn dev_only_middleware(
    State(resources): State<Arc<ServerResources>>,
    req: Request,
    next: Next,
) -> Response {
    if resources.config.environment.is_production() {
        debug!(path = %req.uri().path(), "Dev route requested in production");
        return AppError::route_not_found().into_response();
    }
    next.run(req).await
}
