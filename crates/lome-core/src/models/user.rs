// ABOUTME: User and session models owned by the authentication collaborator
// ABOUTME: AuthSession is the identity attached to a request after resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user id
    pub id: String,
    /// Unique email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Whether the email address has been verified
    pub email_verified: bool,
    /// Avatar URL
    pub image: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last profile change
    pub updated_at: DateTime<Utc>,
}

/// A login session; the token is the cookie value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session id
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Bearer token, never serialized back to clients
    #[serde(skip_serializing, default)]
    pub token: String,
    /// Expiry time
    pub expires_at: DateTime<Utc>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Identity resolved for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Authenticated user
    pub user: User,
    /// Session that authenticated them
    pub session: Session,
}

impl AuthSession {
    /// Id of the authenticated user
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}
