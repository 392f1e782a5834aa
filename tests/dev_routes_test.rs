// ABOUTME: Integration tests for development-only routes
// ABOUTME: Persona listing with activity stats, hidden in production
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_router, create_test_server_resources_for, create_test_user_with_email};
use helpers::axum_test::AxumTestRequest;
use lome_chat_server::{
    config::Environment,
    database::NewMessage,
    models::MessageRole,
    routes::dev::DevPersonasResponse,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_dev_personas_hidden_in_production() {
    let resources = create_test_server_resources_for(Environment::Production)
        .await
        .unwrap();

    let response = AxumTestRequest::get("/dev/personas")
        .send(create_test_router(&resources))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_dev_personas_empty_without_seed() {
    let resources = create_test_server_resources_for(Environment::Development)
        .await
        .unwrap();
    create_test_user_with_email(&resources.database, "someone@example.com")
        .await
        .unwrap();

    let response: DevPersonasResponse = AxumTestRequest::get("/dev/personas")
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(response.personas.is_empty());
}

#[tokio::test]
async fn test_dev_personas_with_stats_ordered_by_email() {
    let resources = create_test_server_resources_for(Environment::Development)
        .await
        .unwrap();
    let bob = create_test_user_with_email(&resources.database, "bob@dev.lome-chat.com")
        .await
        .unwrap();
    let alice = create_test_user_with_email(&resources.database, "alice@dev.lome-chat.com")
        .await
        .unwrap();
    create_test_user_with_email(&resources.database, "mallory@example.com")
        .await
        .unwrap();

    let conversations = resources.database.conversations();
    let (first, _) = conversations
        .create(&alice.id, "one", Some("hello"))
        .await
        .unwrap();
    conversations
        .append_message(
            &first.id,
            &NewMessage {
                role: MessageRole::Assistant,
                content: "hi".to_owned(),
                model: Some("gpt-4".to_owned()),
            },
        )
        .await
        .unwrap();
    conversations.create(&alice.id, "two", None).await.unwrap();

    let response: DevPersonasResponse = AxumTestRequest::get("/dev/personas")
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    let emails: Vec<&str> = response.personas.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(emails, vec!["alice@dev.lome-chat.com", "bob@dev.lome-chat.com"]);

    let alice_persona = &response.personas[0];
    assert_eq!(alice_persona.id, alice.id);
    assert_eq!(alice_persona.stats.conversation_count, 2);
    assert_eq!(alice_persona.stats.message_count, 2);
    assert_eq!(alice_persona.credits, "$0.00");

    let bob_persona = &response.personas[1];
    assert_eq!(bob_persona.id, bob.id);
    assert_eq!(bob_persona.stats.conversation_count, 0);
    assert_eq!(bob_persona.stats.message_count, 0);
}

#[tokio::test]
async fn test_dev_personas_wire_format() {
    let resources = create_test_server_resources_for(Environment::Testing)
        .await
        .unwrap();
    create_test_user_with_email(&resources.database, "carol@dev.lome-chat.com")
        .await
        .unwrap();

    let body: Value = AxumTestRequest::get("/dev/personas")
        .send(create_test_router(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();

    let persona = &body["personas"][0];
    assert_eq!(persona["emailVerified"], true);
    assert_eq!(persona["stats"]["conversationCount"], 0);
    assert_eq!(persona["stats"]["messageCount"], 0);
    assert!(persona["image"].is_null());
}
