// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use lome_chat_server::config::{DatabaseUrl, Environment, LogLevel, ServerConfig};
use serial_test::serial;
use std::env;

const CONFIG_VARS: &[&str] = &[
    "HTTP_PORT",
    "HOST",
    "RUST_LOG",
    "ENVIRONMENT",
    "NODE_ENV",
    "CORS_ALLOWED_ORIGINS",
    "FRONTEND_URL",
    "DATABASE_URL",
    "SESSION_COOKIE_NAME",
    "REQUEST_TIMEOUT_SECS",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8787);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.security.cors_origins, vec!["http://localhost:5173"]);
    assert_eq!(config.session.cookie_name, "lome_session");
    assert_eq!(config.request_timeout_secs, 30);
    assert!(!config.database.url.is_memory());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_config_env();
    env::set_var("HTTP_PORT", "9100");
    env::set_var("HOST", "127.0.0.1");
    env::set_var("RUST_LOG", "debug");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example.com/,https://b.example.com");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("SESSION_COOKIE_NAME", "chat_sid");
    env::set_var("REQUEST_TIMEOUT_SECS", "5");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 9100);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.environment.is_production());
    assert_eq!(
        config.security.cors_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
    assert_eq!(config.database.url, DatabaseUrl::Memory);
    assert_eq!(config.session.cookie_name, "chat_sid");
    assert_eq!(config.request_timeout_secs, 5);
    assert!(config.summary().contains("Dev Routes: Disabled"));
}

#[test]
#[serial]
fn test_node_env_and_frontend_url_fallbacks() {
    clear_config_env();
    env::set_var("NODE_ENV", "test");
    env::set_var("FRONTEND_URL", "http://localhost:3000");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.environment, Environment::Testing);
    assert_eq!(config.security.cors_origins, vec!["http://localhost:3000"]);
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_config_env();

    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("HTTP_PORT");

    env::set_var("REQUEST_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());
    env::remove_var("REQUEST_TIMEOUT_SECS");

    env::set_var("DATABASE_URL", "postgres://localhost/chat");
    assert!(ServerConfig::from_env().is_err());
    clear_config_env();
}
