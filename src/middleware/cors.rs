// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Allows the browser frontend to call the API with credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use super::tracing::request_id_header;
use crate::config::ServerConfig;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS for the frontend
///
/// Origins come from `CORS_ALLOWED_ORIGINS` or `FRONTEND_URL`. Credentials are
/// always allowed because the session travels in a cookie, so a `*` origin is
/// served by mirroring the request origin.
///
/// ```bash
/// export FRONTEND_URL="http://localhost:5173"
/// export CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins = &config.security.cors_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::ORIGIN,
            request_id_header(),
        ])
        .expose_headers([request_id_header()])
}
