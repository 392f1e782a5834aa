// ABOUTME: Shared server resources handed to every handler through axum state
// ABOUTME: Holds the database, the session resolver and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::auth::{DatabaseSessionResolver, SessionResolver};
use crate::config::ServerConfig;
use crate::database::Database;
use std::sync::Arc;

/// Immutable, shared state for the HTTP server
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle
    pub database: Arc<Database>,
    /// Identity resolution for incoming requests
    pub session_resolver: Arc<dyn SessionResolver>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Build resources with the cookie-backed session resolver
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let resolver =
            DatabaseSessionResolver::new(database.pool().clone(), config.session.cookie_name.clone());
        Self::with_resolver(database, config, Arc::new(resolver))
    }

    /// Build resources with a caller-supplied session resolver
    #[must_use]
    pub fn with_resolver(
        database: Database,
        config: Arc<ServerConfig>,
        session_resolver: Arc<dyn SessionResolver>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            session_resolver,
            config,
        }
    }
}
