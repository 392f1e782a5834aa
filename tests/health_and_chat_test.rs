// ABOUTME: Integration tests for health, chat placeholder, fallback and HTTP layers
// ABOUTME: Checks unauthenticated endpoints, JSON error bodies, request ids and CORS headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_router, create_test_server_resources};
use helpers::axum_test::AxumTestRequest;
use lome_chat_server::routes::health::HealthResponse;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_reports_ok() {
    let resources = create_test_server_resources().await.unwrap();

    let health: HealthResponse = AxumTestRequest::get("/health")
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_chat_stream_not_implemented() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::post("/chat/stream")
        .json(&json!({"messages": []}))
        .send(create_test_router(&resources))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_IMPLEMENTED);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Not implemented"}));
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/nope")
        .send(create_test_router(&resources))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_unsupported_method_is_json_error() {
    let resources = create_test_server_resources().await.unwrap();
    let router = create_test_router(&resources);

    let response = AxumTestRequest::put("/conversations")
        .json(&json!({"title": "nope"}))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.header("x-request-id").is_some());
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Method Not Allowed"}));

    let response = AxumTestRequest::delete("/health").send(router).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Method Not Allowed"}));
}

#[tokio::test]
async fn test_request_id_generated_and_echoed() {
    let resources = create_test_server_resources().await.unwrap();
    let router = create_test_router(&resources);

    let response = AxumTestRequest::get("/health").send(router.clone()).await;
    let generated = response.header("x-request-id").expect("request id header");
    assert!(!generated.is_empty());

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "req-123")
        .send(router)
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("req-123"));
}

#[tokio::test]
async fn test_cors_allows_frontend_origin_with_credentials() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::options("/conversations")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send(create_test_router(&resources))
        .await;

    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("http://localhost:5173")
    );
    assert_eq!(
        response.header("access-control-allow-credentials").as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .header("origin", "https://evil.example")
        .send(create_test_router(&resources))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.header("access-control-allow-origin").is_none());
}
