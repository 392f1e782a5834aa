// ABOUTME: Response mapper giving framework-generated errors the JSON error body
// ABOUTME: Covers timeouts, method mismatches and extractor rejections that bypass AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::constants::error_messages;
use crate::errors::ErrorResponse;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

/// Rewrite error responses that are not JSON into `{"error": "..."}`
///
/// Status and headers are kept. Responses already carrying a JSON body,
/// which includes every `AppError`, pass through untouched.
pub async fn json_error_body(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    debug!(status = status.as_u16(), "Replacing non-JSON error body");
    let body = ErrorResponse {
        error: error_message(status).to_owned(),
        details: None,
    };
    let (mut parts, _) = response.into_parts();
    let (json_parts, json_body) = Json(body).into_response().into_parts();

    parts.headers.remove(header::CONTENT_LENGTH);
    if let Some(content_type) = json_parts.headers.get(header::CONTENT_TYPE) {
        parts
            .headers
            .insert(header::CONTENT_TYPE, content_type.clone());
    }
    Response::from_parts(parts, json_body)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn error_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => error_messages::INVALID_REQUEST,
        StatusCode::UNAUTHORIZED => error_messages::UNAUTHORIZED,
        StatusCode::NOT_FOUND => error_messages::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR => error_messages::INTERNAL_SERVER_ERROR,
        other => other
            .canonical_reason()
            .unwrap_or(error_messages::INTERNAL_SERVER_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_timeout_response_gets_json_body() {
        let response = Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .header("x-request-id", "req-1")
            .body(Body::empty())
            .unwrap();

        let mapped = json_error_body(response).await;

        assert_eq!(mapped.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(mapped.headers()["x-request-id"], "req-1");
        assert_eq!(
            mapped.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(body_json(mapped).await, json!({"error": "Request Timeout"}));
    }

    #[tokio::test]
    async fn test_plain_text_rejection_gets_json_body() {
        let response = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .header(header::CONTENT_LENGTH, "32")
            .body(Body::from("Invalid URL: Cannot parse `id`"))
            .unwrap();

        let mapped = json_error_body(response).await;

        assert_eq!(mapped.status(), StatusCode::BAD_REQUEST);
        assert!(mapped.headers().get(header::CONTENT_LENGTH).is_none());
        assert_eq!(body_json(mapped).await, json!({"error": "Invalid request"}));
    }

    #[tokio::test]
    async fn test_json_errors_and_successes_pass_through() {
        let app_error = crate::errors::AppError::unauthorized().into_response();
        let mapped = json_error_body(app_error).await;
        assert_eq!(body_json(mapped).await, json!({"error": "Unauthorized"}));

        let ok = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("fine"))
            .unwrap();
        let mapped = json_error_body(ok).await;
        assert_eq!(mapped.status(), StatusCode::OK);
        let bytes = to_bytes(mapped.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
