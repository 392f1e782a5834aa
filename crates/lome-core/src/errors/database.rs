// ABOUTME: Structured error types for database operations
// ABOUTME: Connection, migration and row-mapping failures carry their context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or configure the connection pool
    #[error("Database connection failed: {context}")]
    ConnectionFailed {
        /// What was being attempted
        context: String,
    },

    /// Schema migration failed
    #[error("Database migration failed: {context}")]
    MigrationFailed {
        /// Failing migration step
        context: String,
    },

    /// A stored value could not be mapped back into a model
    #[error("Invalid stored value in {field}: {value}")]
    InvalidData {
        /// Column name
        field: &'static str,
        /// Offending value
        value: String,
    },
}
