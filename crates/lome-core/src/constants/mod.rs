// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, error messages, sessions and dev tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Constants grouped by domain rather than kept in a single flat list.

/// Error messages returned in JSON error bodies
pub mod error_messages;

pub use error_messages::*;

/// Service identification
pub mod service_names {
    /// Service name used in structured logs
    pub const LOME_CHAT_SERVER: &str = "lome-chat-server";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port (matches the upstream worker port)
    pub const HTTP_PORT: u16 = 8787;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/lome_chat.db";
    /// Default frontend origin allowed by CORS
    pub const FRONTEND_URL: &str = "http://localhost:5173";
    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Validation limits
pub mod limits {
    /// Minimum conversation title length when renaming (characters)
    pub const MIN_CONVERSATION_TITLE_CHARS: usize = 1;
    /// Maximum conversation title length when renaming (characters)
    pub const MAX_CONVERSATION_TITLE_CHARS: usize = 255;
}

/// Session cookie and lifetime settings
pub mod session {
    /// Default name of the session cookie
    pub const DEFAULT_COOKIE_NAME: &str = "lome_session";
    /// Default lifetime of sessions issued by the dev seeder
    pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;
    /// Number of random bytes in a session token
    pub const TOKEN_BYTES: usize = 32;
}

/// Developer persona tooling
pub mod dev {
    /// Email domain reserved for development personas
    pub const DEV_EMAIL_DOMAIN: &str = "dev.lome-chat.com";
    /// Shared password for all dev personas. Only for local development.
    pub const DEV_PASSWORD: &str = "password123";
    /// Placeholder credit balance shown for personas
    pub const DEV_CREDITS: &str = "$0.00";
    /// Provider id used for email/password accounts
    pub const CREDENTIAL_PROVIDER_ID: &str = "credential";
}
